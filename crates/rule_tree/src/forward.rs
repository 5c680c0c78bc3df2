use crate::error::ReasoningError;
use crate::provider::{ValueProvider, request_valid_value};
use crate::tree::DecisionTree;
use crate::value::AttributeValue;
use tracing::debug;

/// Walks from the root, asking `provider` for each tested attribute, until a leaf.
///
/// Accepted values are the branch values of the current node, so a known
/// value that was never seen on this path is re-asked (or rejected with
/// [`ReasoningError::InvalidValue`] when the provider cannot retry).
pub fn forward_reasoning<P>(
    tree: &DecisionTree,
    provider: &mut P,
) -> Result<AttributeValue, ReasoningError>
where
    P: ValueProvider + ?Sized,
{
    let mut node = tree;
    loop {
        let (attribute, children) = match node {
            DecisionTree::Leaf(conclusion) => {
                debug!(conclusion = %conclusion, "forward reasoning concluded");
                return Ok(conclusion.clone());
            }
            DecisionTree::Internal {
                attribute,
                children,
            } => (attribute, children),
        };

        let allowed = node.branch_values();
        let value = request_valid_value(provider, attribute, &allowed)?;
        debug!(attribute = attribute.as_str(), value = %value, "descending");

        node = children
            .get(&value)
            .ok_or_else(|| ReasoningError::UnreachableBranch {
                attribute: attribute.clone(),
                value,
            })?;
    }
}
