use crate::conf::BranchPolicy;
use crate::dataframe::EncodedColumn;
use crate::error::BuildError;
use crate::split::{SplitResult, SplitSelector};
use crate::table::{Subtable, Table};
use crate::value::{AttributeValue, normalize};
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Learned classification tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionTree {
    Leaf(AttributeValue),
    Internal {
        attribute: String,
        #[serde(with = "crate::serde::children")]
        children: BTreeMap<AttributeValue, DecisionTree>,
    },
}

impl DecisionTree {
    pub fn is_leaf(&self) -> bool {
        matches!(self, DecisionTree::Leaf(_))
    }

    pub fn attribute(&self) -> Option<&str> {
        match self {
            DecisionTree::Internal { attribute, .. } => Some(attribute),
            DecisionTree::Leaf(_) => None,
        }
    }

    pub fn child(&self, value: &AttributeValue) -> Option<&DecisionTree> {
        match self {
            DecisionTree::Internal { children, .. } => children.get(value),
            DecisionTree::Leaf(_) => None,
        }
    }

    /// Branch values of an internal node, empty for leaves.
    pub fn branch_values(&self) -> Vec<&AttributeValue> {
        match self {
            DecisionTree::Internal { children, .. } => children.keys().collect(),
            DecisionTree::Leaf(_) => Vec::new(),
        }
    }

    /// Number of internal levels; a lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            DecisionTree::Leaf(_) => 0,
            DecisionTree::Internal { children, .. } => {
                1 + children.values().map(|c| c.depth()).max().unwrap_or(0)
            }
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            DecisionTree::Leaf(_) => 1,
            DecisionTree::Internal { children, .. } => children.values().map(|c| c.n_leaves()).sum(),
        }
    }

    /// Attributes tested anywhere in the tree.
    pub fn attributes(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_attributes(&mut out);
        out
    }

    fn collect_attributes<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        if let DecisionTree::Internal {
            attribute,
            children,
        } = self
        {
            out.insert(attribute.as_str());
            for child in children.values() {
                child.collect_attributes(out);
            }
        }
    }

    /// Conclusions reachable at some leaf.
    pub fn conclusions(&self) -> BTreeSet<&AttributeValue> {
        match self {
            DecisionTree::Leaf(value) => BTreeSet::from([value]),
            DecisionTree::Internal { children, .. } => {
                children.values().flat_map(|c| c.conclusions()).collect()
            }
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match self {
            DecisionTree::Leaf(value) => writeln!(f, "{:indent$}=> {value}", ""),
            DecisionTree::Internal {
                attribute,
                children,
            } => {
                writeln!(f, "{:indent$}{attribute}", "")?;
                for (value, child) in children {
                    match child {
                        DecisionTree::Leaf(label) => {
                            writeln!(f, "{:w$}= {value} => {label}", "", w = indent + 2)?
                        }
                        DecisionTree::Internal { .. } => {
                            writeln!(f, "{:w$}= {value}", "", w = indent + 2)?;
                            child.fmt_indented(f, indent + 4)?;
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LeafReason {
    Pure,
    /// No attribute varies any more; the majority label was used.
    Exhausted,
}

/// Recursive ID3-style tree induction.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    policy: BranchPolicy,
    selector: SplitSelector,
}

impl TreeBuilder {
    pub fn new(policy: BranchPolicy) -> Self {
        Self {
            policy,
            selector: SplitSelector::default(),
        }
    }

    pub fn with_gain_tolerance(mut self, tolerance: f64) -> Self {
        self.selector.gain_tolerance = tolerance;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.selector.parallel = parallel;
        self
    }

    pub fn policy(&self) -> BranchPolicy {
        self.policy
    }

    /// Builds on the table's own conclusion column.
    pub fn build(&self, table: &Table) -> Result<DecisionTree, BuildError> {
        self.build_for(table, table.conclusion())
    }

    pub fn build_for(&self, table: &Table, conclusion: &str) -> Result<DecisionTree, BuildError> {
        let conclusion = normalize(conclusion);
        let conclusion = conclusion.as_str();
        if table.is_empty() {
            return Err(BuildError::EmptyTable);
        }
        let labels = table
            .column(conclusion)
            .ok_or_else(|| BuildError::UnknownAttribute(conclusion.to_string()))?;

        if self.policy.requires_boolean_attributes() {
            for name in table.attribute_names(conclusion) {
                if table.column(name).is_some_and(|c| !c.is_boolean()) {
                    return Err(BuildError::NonBooleanAttribute(name.to_string()));
                }
            }
        }

        let root = table.all_rows();
        if let Some(label) = root.single_value(labels) {
            debug!(label = %label, "training table is pure");
            return Ok(DecisionTree::Leaf(label.clone()));
        }
        let tree = self.grow(&root, conclusion, labels, 0)?;
        debug!(
            depth = tree.depth(),
            leaves = tree.n_leaves(),
            "tree built"
        );
        Ok(tree)
    }

    fn branch_values(&self, rows: &Subtable<'_>, column: &EncodedColumn) -> Vec<AttributeValue> {
        match self.policy {
            BranchPolicy::Observed => rows.distinct_values(column),
            BranchPolicy::Boolean => vec![AttributeValue::Bool(true), AttributeValue::Bool(false)],
        }
    }

    fn grow(
        &self,
        rows: &Subtable<'_>,
        conclusion: &str,
        labels: &EncodedColumn,
        depth: usize,
    ) -> Result<DecisionTree, BuildError> {
        let split = self.selector.select(rows, conclusion)?;
        let attribute = match &split {
            SplitResult::Exhausted => {
                let label = rows.majority_value(labels).ok_or(BuildError::EmptyTable)?;
                warn!(
                    depth,
                    rows = rows.len(),
                    label = %label,
                    reason = ?LeafReason::Exhausted,
                    "impure rows with no attribute left to split on; using majority label"
                );
                return Ok(DecisionTree::Leaf(label.clone()));
            }
            SplitResult::Informative { attribute, .. } | SplitResult::Fallback { attribute } => {
                attribute.clone()
            }
        };
        debug!(depth, rows = rows.len(), %split, "splitting");

        let column = rows
            .table()
            .column(&attribute)
            .ok_or_else(|| BuildError::UnknownAttribute(attribute.clone()))?;

        let mut children = BTreeMap::new();
        for value in self.branch_values(rows, column) {
            let subtable = rows.where_equals(column, &value);
            if subtable.is_empty() {
                debug!(attribute = attribute.as_str(), value = %value, "empty branch omitted");
                continue;
            }
            let child = match subtable.single_value(labels) {
                Some(label) => {
                    debug!(depth = depth + 1, label = %label, reason = ?LeafReason::Pure, "leaf");
                    DecisionTree::Leaf(label.clone())
                }
                None => self.grow(&subtable, conclusion, labels, depth + 1)?,
            };
            children.insert(value, child);
        }

        Ok(DecisionTree::Internal {
            attribute,
            children,
        })
    }
}

/// Builds with the default (observed-values) policy.
pub fn build_tree(table: &Table, conclusion: &str) -> Result<DecisionTree, BuildError> {
    TreeBuilder::default().build_for(table, conclusion)
}
