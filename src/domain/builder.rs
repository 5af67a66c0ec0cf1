//! Hierarchy builder for the legacy serialized salesperson format.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::HierarchyArena;
use crate::domain::entities::{Salesperson, Variant};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::hierarchy::Hierarchy;
use crate::domain::lexer::{Bit, Lexer};

/// Constructs a [`Hierarchy`] from strings like
/// `0{Blake|Sociopath}0{Ricky|Clueless}1{Dave|Loser}`.
///
/// Parsing is best effort: when the tree cannot take another node the
/// remaining input is dropped and the tree built so far is returned.
pub struct HierarchyBuilder {
    lexer: Lexer,
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self {
            lexer: Lexer::new(),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn build(&self, spec: &str) -> DomainResult<Hierarchy> {
        let mut tokens = self.lexer.tokens(spec);

        let first = tokens
            .next()
            .ok_or_else(|| DomainError::Parse("no salespeople parsed".to_string()))?;
        let mut arena = HierarchyArena::new();
        let root = arena.insert_root(Salesperson::new(
            first.name,
            first.variant.parse::<Variant>()?,
        ));
        let mut cursor = root;

        for token in tokens {
            let rep = Salesperson::new(token.name, token.variant.parse::<Variant>()?);
            match token.bit {
                Bit::Descend => match arena.attach_child(cursor, rep) {
                    Some(child) => cursor = child,
                    None => {
                        debug!(
                            "{} has no free slot for {}, stopping",
                            cursor_name(&arena, cursor),
                            token.name
                        );
                        break;
                    }
                },
                Bit::Sibling => {
                    if arena.attach_child(cursor, rep).is_none() {
                        debug!(
                            "{} has no free slot for {}, skipping",
                            cursor_name(&arena, cursor),
                            token.name
                        );
                        continue;
                    }
                    match climb_to_open_right(&arena, cursor) {
                        Some(next) => cursor = next,
                        None => {
                            debug!("walked past root after {}, stopping", token.name);
                            break;
                        }
                    }
                }
            }
        }

        debug!("built hierarchy with {} salespeople", arena.len());
        Ok(Hierarchy::new(arena, root))
    }
}

/// Nearest node from `start` upward (inclusive) still missing a right child.
fn climb_to_open_right(arena: &HierarchyArena, start: Index) -> Option<Index> {
    let mut current = Some(start);
    while let Some(idx) = current {
        match arena.get_node(idx) {
            Some(node) if node.right.is_some() => current = node.parent,
            _ => break,
        }
    }
    current
}

fn cursor_name(arena: &HierarchyArena, idx: Index) -> &str {
    arena
        .get_node(idx)
        .map(|n| n.data.name.as_str())
        .unwrap_or("?")
}
