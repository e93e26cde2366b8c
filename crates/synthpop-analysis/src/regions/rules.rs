//! Candidate rules over latent traits.

use std::fmt;

use synthpop_core::models::{
    LatentTraits, RuleCondition, RuleOperator, SynthOutcome, TraitAttribute,
};

use super::quantiles::cut_points;

const OPERATORS: [RuleOperator; 2] = [RuleOperator::LessOrEqual, RuleOperator::Greater];

/// A subgroup predicate of depth at most 2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Threshold(RuleCondition),
    /// Two conditions on different attributes.
    Conjunction(RuleCondition, RuleCondition),
}

impl Rule {
    pub fn conditions(&self) -> Vec<RuleCondition> {
        match *self {
            Rule::Threshold(c) => vec![c],
            Rule::Conjunction(a, b) => vec![a, b],
        }
    }

    pub fn matches(&self, traits: &LatentTraits) -> bool {
        match self {
            Rule::Threshold(c) => c.matches(traits),
            Rule::Conjunction(a, b) => a.matches(traits) && b.matches(traits),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Threshold(c) => write!(f, "{c}"),
            Rule::Conjunction(a, b) => write!(f, "{a} AND {b}"),
        }
    }
}

/// All single-condition rules, then all two-attribute conjunctions, in
/// attribute declaration order.
pub fn generate_candidates(outcomes: &[SynthOutcome]) -> Vec<Rule> {
    let per_attribute: Vec<Vec<RuleCondition>> = TraitAttribute::ALL
        .iter()
        .map(|&attribute| {
            let values: Vec<f64> = outcomes
                .iter()
                .map(|o| attribute.value_of(&o.latent_traits))
                .collect();
            cut_points(&values)
                .into_iter()
                .flat_map(|threshold| {
                    OPERATORS
                        .iter()
                        .map(move |&op| RuleCondition::new(attribute, op, threshold))
                })
                .collect()
        })
        .collect();

    let mut rules: Vec<Rule> = per_attribute
        .iter()
        .flatten()
        .map(|&c| Rule::Threshold(c))
        .collect();

    for (i, left) in per_attribute.iter().enumerate() {
        for right in &per_attribute[i + 1..] {
            for &a in left {
                for &b in right {
                    rules.push(Rule::Conjunction(a, b));
                }
            }
        }
    }
    rules
}
