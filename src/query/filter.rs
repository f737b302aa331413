//! Relationship type/direction filtering

use super::types::{Direction, RelationshipFilter};
use crate::graph::Relationship;

/// Decides whether a relationship may be walked in a given direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPredicate {
    filter: RelationshipFilter,
}

impl FilterPredicate {
    pub fn new(filter: RelationshipFilter) -> Self {
        Self { filter }
    }

    /// `traversal` is `Outgoing` when the step goes from the relationship's
    /// start node to its end node, `Incoming` for the reverse.
    pub fn allows(&self, relationship: &Relationship, traversal: Direction) -> bool {
        match &self.filter {
            RelationshipFilter::Global(direction) => direction.admits(traversal),
            RelationshipFilter::Typed(pairs) => pairs.iter().any(|pair| {
                pair.rel_type == relationship.rel_type && pair.direction.admits(traversal)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::types::TypedDirection;

    fn rel(rel_type: &str) -> Relationship {
        Relationship::new("a".into(), "b".into(), rel_type)
    }

    #[test]
    fn test_global_direction_ignores_type() {
        let predicate = FilterPredicate::new(RelationshipFilter::Global(Direction::Outgoing));
        assert!(predicate.allows(&rel("R1"), Direction::Outgoing));
        assert!(predicate.allows(&rel("ANY"), Direction::Outgoing));
        assert!(!predicate.allows(&rel("R1"), Direction::Incoming));
    }

    #[test]
    fn test_typed_pairs() {
        let predicate = FilterPredicate::new(RelationshipFilter::Typed(vec![
            TypedDirection::new("R1", Direction::Outgoing),
            TypedDirection::new("R2", Direction::Both),
        ]));
        assert!(predicate.allows(&rel("R1"), Direction::Outgoing));
        assert!(!predicate.allows(&rel("R1"), Direction::Incoming));
        assert!(predicate.allows(&rel("R2"), Direction::Incoming));
        assert!(predicate.allows(&rel("R2"), Direction::Outgoing));
        assert!(!predicate.allows(&rel("R3"), Direction::Outgoing));
    }

    #[test]
    fn test_same_type_listed_twice_takes_union() {
        let predicate = FilterPredicate::new(RelationshipFilter::Typed(vec![
            TypedDirection::new("R1", Direction::Outgoing),
            TypedDirection::new("R1", Direction::Incoming),
        ]));
        assert!(predicate.allows(&rel("R1"), Direction::Outgoing));
        assert!(predicate.allows(&rel("R1"), Direction::Incoming));
    }
}
