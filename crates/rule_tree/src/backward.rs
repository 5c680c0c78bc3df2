//! Backward reasoning: start from a conclusion and narrow the rule paths that
//! produce it until one remains or none does.

use crate::conf::BackwardMode;
use crate::domain::AttributeDomain;
use crate::error::ReasoningError;
use crate::provider::{Rejection, ValueProvider, request_valid_value};
use crate::tree::DecisionTree;
use crate::value::{AttributeValue, normalize};
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// `(attribute, value)` tests from the root down to one leaf.
pub type RulePath = Vec<(String, AttributeValue)>;

/// The tree flattened into conclusion -> paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulePaths {
    by_conclusion: BTreeMap<String, BTreeSet<RulePath>>,
}

impl RulePaths {
    pub fn from_tree(tree: &DecisionTree) -> Self {
        let mut paths = Self::default();
        paths.walk(tree, &mut Vec::new());
        paths
    }

    fn walk(&mut self, node: &DecisionTree, path: &mut RulePath) {
        match node {
            DecisionTree::Leaf(conclusion) => {
                self.by_conclusion
                    .entry(normalize(&conclusion.to_string()))
                    .or_default()
                    .insert(path.clone());
            }
            DecisionTree::Internal {
                attribute,
                children,
            } => {
                for (value, child) in children {
                    path.push((attribute.clone(), value.clone()));
                    self.walk(child, path);
                    path.pop();
                }
            }
        }
    }

    pub fn conclusions(&self) -> impl Iterator<Item = &str> {
        self.by_conclusion.keys().map(String::as_str)
    }

    pub fn paths_for(&self, goal: &str) -> Option<&BTreeSet<RulePath>> {
        self.by_conclusion.get(&normalize(goal))
    }

    pub fn len(&self) -> usize {
        self.by_conclusion.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_conclusion.is_empty()
    }
}

fn ask_predicate<P>(
    provider: &mut P,
    domain: &AttributeDomain,
    not_checked: &[&str],
) -> Result<String, ReasoningError>
where
    P: ValueProvider + ?Sized,
{
    loop {
        let name = normalize(&provider.choose_attribute(not_checked)?);
        let rejection = if !domain.contains_attribute(&name) {
            Rejection::UnknownPredicate(name)
        } else if !not_checked.contains(&name.as_str()) {
            Rejection::AlreadyQueried(name)
        } else {
            return Ok(name);
        };
        if !provider.can_retry() {
            return Err(rejection.into());
        }
        provider.rejected(&rejection);
    }
}

/// Whether `goal` stays reachable under the values `provider` supplies.
///
/// Each round the provider names a not yet checked predicate (the conclusion
/// attribute never counts as one) and its value; paths lacking that exact
/// test are dropped. `Ok(false)` once no path survives, `Ok(true)` once at
/// most one does or every predicate has been checked.
pub fn backward_reasoning<P>(
    tree: &DecisionTree,
    domain: &AttributeDomain,
    conclusion: &str,
    goal: &str,
    provider: &mut P,
) -> Result<bool, ReasoningError>
where
    P: ValueProvider + ?Sized,
{
    let paths = RulePaths::from_tree(tree);
    backward_over_paths(&paths, domain, conclusion, goal, BackwardMode::Narrow, provider)
}

/// Backward reasoning over an already flattened tree.
///
/// With [`BackwardMode::Confirm`] a single surviving path is not enough: its
/// remaining tests are asked for as well, so a contradicting answer still
/// yields `Ok(false)`.
pub fn backward_over_paths<P>(
    paths: &RulePaths,
    domain: &AttributeDomain,
    conclusion: &str,
    goal: &str,
    mode: BackwardMode,
    provider: &mut P,
) -> Result<bool, ReasoningError>
where
    P: ValueProvider + ?Sized,
{
    let mut candidates: Vec<&RulePath> = paths
        .paths_for(goal)
        .ok_or_else(|| ReasoningError::UnknownConclusion(goal.to_string()))?
        .iter()
        .collect();
    let conclusion = normalize(conclusion);
    let mut not_checked: Vec<&str> = domain.attributes().filter(|a| *a != conclusion).collect_vec();
    info!(
        goal,
        candidates = candidates.len(),
        predicates = %not_checked.iter().join(", "),
        ?mode,
        "backward reasoning"
    );

    loop {
        let unresolved = match mode {
            BackwardMode::Narrow => candidates.len() > 1,
            BackwardMode::Confirm => {
                candidates.len() > 1
                    || candidates
                        .iter()
                        .any(|path| path.iter().any(|(a, _)| not_checked.contains(&a.as_str())))
            }
        };
        if !unresolved {
            break;
        }
        if not_checked.is_empty() {
            debug!(
                remaining = candidates.len(),
                "every predicate checked; goal still consistent"
            );
            break;
        }

        let attribute = ask_predicate(provider, domain, &not_checked)?;
        let allowed: Vec<&AttributeValue> = domain
            .values(&attribute)
            .map(|values| values.iter().collect())
            .unwrap_or_default();
        let value = request_valid_value(provider, &attribute, &allowed)?;
        not_checked.retain(|a| *a != attribute);

        candidates.retain(|path| path.iter().any(|(a, v)| *a == attribute && *v == value));
        debug!(
            attribute = attribute.as_str(),
            value = %value,
            remaining = candidates.len(),
            "constraint applied"
        );
        if candidates.is_empty() {
            return Ok(false);
        }
    }
    Ok(true)
}
