use termtree::Tree;

use crate::domain::hierarchy::Hierarchy;
use crate::domain::risk::{RepView, RiskProfile};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for RepView<'_> {
    fn to_tree_string(&self) -> Tree<String> {
        let mut label = format!("{} ({}, {})", self.name(), self.variant(), self.success_rate());
        if let Some(lead) = self.current_lead() {
            label.push_str(&format!(" <- {}", lead));
        }

        // left before right, missing slots skipped
        let leaves: Vec<_> = [self.left(), self.right()]
            .into_iter()
            .flatten()
            .map(|c| c.to_tree_string())
            .collect();

        Tree::new(label).with_leaves(leaves)
    }
}

impl TreeNodeConvert for Hierarchy {
    fn to_tree_string(&self) -> Tree<String> {
        match self.root() {
            Some(root) => root.to_tree_string(),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::HierarchyBuilder;
    use crate::domain::entities::Lead;

    #[test]
    fn given_hierarchy_when_rendering_then_shows_reps_and_leads() {
        let mut hierarchy = HierarchyBuilder::new()
            .build("0{Blake|Sociopath}0{Ricky|Clueless}1{Dave|Loser}")
            .unwrap();
        hierarchy
            .assign_to_best_rep(Lead::new("Acme", 100.0).unwrap())
            .unwrap();

        let rendered = hierarchy.to_tree_string().to_string();

        assert!(rendered.starts_with("Blake (Sociopath, 0.85)\n"));
        assert!(rendered.contains("Ricky (Clueless, 0.65)"));
        assert!(rendered.contains("Dave (Loser, 0.02)"));
        assert_eq!(rendered.lines().count(), 3);
    }
}
