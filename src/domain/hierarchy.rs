//! Accessor over a built sales hierarchy: lead assignment and risk totals.

use std::fmt;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::HierarchyArena;
use crate::domain::entities::Lead;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::risk::{RepView, RiskProfile};

/// A lead held by a rep, with the risk it currently contributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub rep: String,
    pub lead: Lead,
    pub risk: f64,
}

/// The sales organization, rooted at the top sales guy who runs everyone.
#[derive(Debug)]
pub struct Hierarchy {
    arena: HierarchyArena,
    root: Index,
}

impl Hierarchy {
    pub(crate) fn new(arena: HierarchyArena, root: Index) -> Self {
        Self { arena, root }
    }

    pub fn arena(&self) -> &HierarchyArena {
        &self.arena
    }

    pub fn root(&self) -> Option<RepView<'_>> {
        RepView::new(&self.arena, self.root)
    }

    /// All reps in pre-order (self, left, right).
    pub fn reps(&self) -> impl Iterator<Item = RepView<'_>> {
        self.arena
            .iter()
            .map(move |(idx, node)| RepView::from_node(&self.arena, idx, node))
    }

    /// First rep in pre-order with the given name.
    pub fn rep(&self, name: &str) -> Option<RepView<'_>> {
        self.reps().find(|rep| rep.name() == name)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.arena.depth()
    }

    pub fn leaf_names(&self) -> Vec<String> {
        self.arena.leaf_names()
    }

    /// Eligible rep with strictly minimal risk for `lead`.
    ///
    /// Ties go to the rep visited first in pre-order.
    #[instrument(level = "debug", skip_all, fields(lead = %lead))]
    pub fn best_rep(&self, lead: &Lead) -> Option<RepView<'_>> {
        let mut winner: Option<(RepView<'_>, f64)> = None;
        for rep in self.reps() {
            if !rep.can_take_lead(lead) {
                continue;
            }
            let risk = rep.risk(lead);
            match winner {
                Some((_, best)) if risk >= best => {}
                _ => winner = Some((rep, risk)),
            }
        }
        winner.map(|(rep, _)| rep)
    }

    /// Hand `lead` to the best eligible rep.
    pub fn assign_to_best_rep(&mut self, lead: Lead) -> DomainResult<()> {
        self.assign(lead).map(|_| ())
    }

    /// Like [`Hierarchy::assign_to_best_rep`], reporting who took the lead.
    #[instrument(level = "debug", skip_all, fields(lead = %lead))]
    pub fn assign(&mut self, lead: Lead) -> DomainResult<Assignment> {
        let (idx, risk) = self
            .best_rep(&lead)
            .map(|rep| (rep.index(), rep.risk(&lead)))
            .ok_or_else(|| DomainError::NoAvailableRep {
                lead: lead.to_string(),
            })?;

        let node = self
            .arena
            .get_node_mut(idx)
            .ok_or_else(|| DomainError::NoAvailableRep {
                lead: lead.to_string(),
            })?;
        debug!("assigning {} to {}", lead, node.data.name);
        node.current_lead = Some(lead.clone());
        Ok(Assignment {
            rep: node.data.name.clone(),
            lead,
            risk,
        })
    }

    /// Total risk the company carries given the current lead distribution.
    pub fn total_risk(&self) -> f64 {
        self.reps()
            .filter_map(|rep| rep.current_lead().map(|lead| rep.risk(lead)))
            .sum()
    }

    /// Busy reps and their leads, in pre-order.
    pub fn assignments(&self) -> Vec<Assignment> {
        self.reps()
            .filter_map(|rep| {
                rep.current_lead().map(|lead| Assignment {
                    rep: rep.name().to_string(),
                    lead: lead.clone(),
                    risk: rep.risk(lead),
                })
            })
            .collect()
    }
}

fn write_rep(f: &mut fmt::Formatter<'_>, rep: RepView<'_>) -> fmt::Result {
    write!(f, "({}|{}|{} ", rep.name(), rep.variant(), rep.success_rate())?;
    for child in [rep.left(), rep.right()].into_iter().flatten() {
        write_rep(f, child)?;
        f.write_str(" ")?;
    }
    f.write_str(")")
}

/// Nested dump `(name|Variant|rate <left> <right> )` for debugging.
impl fmt::Display for Hierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => write_rep(f, root),
            None => Ok(()),
        }
    }
}
