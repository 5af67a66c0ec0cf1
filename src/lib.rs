//! Sales lead assignment over a binary hierarchy of salespeople.
//!
//! A hierarchy is parsed from the legacy `0{Name|Variant}1{...}` format with
//! [`domain::HierarchyBuilder`]; [`domain::Hierarchy`] then hands each lead to the
//! eligible rep carrying the least risk and reports the company's total exposure.
//!
//! ```
//! use salestree::domain::{HierarchyBuilder, Lead};
//!
//! let mut hierarchy = HierarchyBuilder::new()
//!     .build("0{Blake|Sociopath}0{Ricky|Clueless}")
//!     .unwrap();
//! hierarchy
//!     .assign_to_best_rep(Lead::new("Acme", 2_000_000.0).unwrap())
//!     .unwrap();
//! assert_eq!(hierarchy.assignments()[0].rep, "Blake");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
