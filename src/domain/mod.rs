//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod hierarchy;
pub mod lexer;
pub mod risk;
pub mod tree_traits;

pub use arena::{HierarchyArena, RepNode};
pub use builder::HierarchyBuilder;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use hierarchy::{Assignment, Hierarchy};
pub use risk::{RepView, RiskProfile};
pub use tree_traits::TreeNodeConvert;
