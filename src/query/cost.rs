//! Relationship cost resolution

use super::config::{PathFinderConfig, DEFAULT_COST};
use crate::graph::Relationship;
use tracing::trace;

/// Derives the non-negative cost of walking a relationship.
///
/// With a cost property configured, a relationship holding a finite,
/// non-negative number under that name costs that number. Anything else
/// (no property configured, property absent, non-numeric, negative, NaN)
/// costs the default. The fallback is per relationship and never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct CostResolver {
    property: Option<String>,
    default_cost: f64,
}

impl CostResolver {
    pub fn new(property: Option<String>, default_cost: f64) -> Self {
        Self {
            property,
            default_cost,
        }
    }

    /// Every relationship costs the default
    pub fn uniform() -> Self {
        Self::new(None, DEFAULT_COST)
    }

    pub fn from_config(config: &PathFinderConfig) -> Self {
        Self::new(config.cost_property.clone(), config.default_cost)
    }

    /// Cost of a single relationship
    pub fn cost(&self, relationship: &Relationship) -> f64 {
        let Some(property) = &self.property else {
            return self.default_cost;
        };

        match relationship.property(property).and_then(|v| v.as_f64()) {
            Some(cost) if cost.is_finite() && cost >= 0.0 => cost,
            _ => {
                trace!(
                    relationship = %relationship.id,
                    property = %property,
                    "no usable cost, using default"
                );
                self.default_cost
            }
        }
    }
}

impl Default for CostResolver {
    fn default() -> Self {
        Self::uniform()
    }
}
