//! Success rate, eligibility and risk per salesperson variant.
//!
//! Rates are computed on every query from the live parent relationship,
//! never cached.

use generational_arena::Index;

use crate::domain::arena::{HierarchyArena, RepNode};
use crate::domain::entities::{Lead, Variant, SOCIOPATH_MIN_LEAD_VALUE};

pub const SOCIOPATH_RATE: f64 = 0.85;
pub const CLUELESS_UNDER_SOCIOPATH_RATE: f64 = 0.65;
pub const CLUELESS_RATE: f64 = 0.45;
pub const LOSER_RATE: f64 = 0.02;

/// Capability shared by every salesperson in the hierarchy.
pub trait RiskProfile {
    /// Probability in `[0, 1]` of closing a deal.
    fn success_rate(&self) -> f64;

    /// Whether this rep may take `lead` right now.
    fn can_take_lead(&self, lead: &Lead) -> bool;

    /// Expected loss for the company if this rep fails to close `lead`.
    fn risk(&self, lead: &Lead) -> f64 {
        lead.value() * (1.0 - self.success_rate())
    }
}

/// Read-only handle on one rep inside a hierarchy.
///
/// Carries the arena so rate rules can look at the manager.
#[derive(Debug, Clone, Copy)]
pub struct RepView<'a> {
    arena: &'a HierarchyArena,
    idx: Index,
    node: &'a RepNode,
}

impl<'a> RepView<'a> {
    pub fn new(arena: &'a HierarchyArena, idx: Index) -> Option<Self> {
        arena.get_node(idx).map(|node| Self { arena, idx, node })
    }

    pub(crate) fn from_node(arena: &'a HierarchyArena, idx: Index, node: &'a RepNode) -> Self {
        Self { arena, idx, node }
    }

    pub fn index(&self) -> Index {
        self.idx
    }

    pub fn name(&self) -> &'a str {
        &self.node.data.name
    }

    pub fn variant(&self) -> Variant {
        self.node.data.variant
    }

    pub fn current_lead(&self) -> Option<&'a Lead> {
        self.node.current_lead.as_ref()
    }

    pub fn parent(&self) -> Option<RepView<'a>> {
        self.node
            .parent
            .and_then(|parent| RepView::new(self.arena, parent))
    }

    pub fn left(&self) -> Option<RepView<'a>> {
        self.node.left.and_then(|idx| RepView::new(self.arena, idx))
    }

    pub fn right(&self) -> Option<RepView<'a>> {
        self.node.right.and_then(|idx| RepView::new(self.arena, idx))
    }

    fn parent_variant(&self) -> Option<Variant> {
        self.parent().map(|p| p.variant())
    }

    /// Loser rate halves once per consecutive Loser manager above this rep.
    fn loser_rate(&self) -> f64 {
        let mut rate = LOSER_RATE;
        let mut current = *self;
        while let Some(parent) = current.parent() {
            if parent.variant() != Variant::Loser {
                break;
            }
            rate /= 2.0;
            current = parent;
        }
        rate
    }
}

impl RiskProfile for RepView<'_> {
    fn success_rate(&self) -> f64 {
        match self.variant() {
            Variant::Sociopath => SOCIOPATH_RATE,
            Variant::Clueless => match self.parent_variant() {
                Some(Variant::Sociopath) => CLUELESS_UNDER_SOCIOPATH_RATE,
                _ => CLUELESS_RATE,
            },
            Variant::Loser => self.loser_rate(),
        }
    }

    fn can_take_lead(&self, lead: &Lead) -> bool {
        let idle = self.node.current_lead.is_none();
        match self.variant() {
            Variant::Sociopath => idle && lead.value() >= SOCIOPATH_MIN_LEAD_VALUE,
            Variant::Clueless | Variant::Loser => idle,
        }
    }
}
