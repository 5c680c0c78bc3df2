use crate::backward::{RulePaths, backward_over_paths};
use crate::conf::BackwardMode;
use crate::domain::AttributeDomain;
use crate::error::{ReasoningError, RuleSetError};
use crate::forward::forward_reasoning;
use crate::provider::ValueProvider;
use crate::table::Table;
use crate::tree::{DecisionTree, TreeBuilder};
use crate::value::AttributeValue;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything reasoning needs: the tree, the value domains and which
/// attribute is the conclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub tree: DecisionTree,
    pub domain: AttributeDomain,
    pub conclusion: String,
}

impl RuleSet {
    /// Learns a tree from `table` on its conclusion column.
    pub fn create(table: &Table, builder: &TreeBuilder) -> Result<Self, RuleSetError> {
        let tree = builder.build(table)?;
        let ruleset = Self {
            tree,
            domain: AttributeDomain::from_table(table),
            conclusion: table.conclusion().to_string(),
        };
        info!(
            conclusion = ruleset.conclusion.as_str(),
            depth = ruleset.tree.depth(),
            leaves = ruleset.tree.n_leaves(),
            "ruleset created"
        );
        Ok(ruleset)
    }

    /// Every value the conclusion column took in training.
    pub fn possible_conclusions(&self) -> Vec<&AttributeValue> {
        self.domain
            .values(&self.conclusion)
            .map(|values| values.iter().collect())
            .unwrap_or_default()
    }

    pub fn forward<P: ValueProvider + ?Sized>(
        &self,
        provider: &mut P,
    ) -> Result<AttributeValue, ReasoningError> {
        forward_reasoning(&self.tree, provider)
    }

    pub fn backward<P: ValueProvider + ?Sized>(
        &self,
        goal: &str,
        provider: &mut P,
    ) -> Result<bool, ReasoningError> {
        self.backward_with(goal, BackwardMode::default(), provider)
    }

    pub fn backward_with<P: ValueProvider + ?Sized>(
        &self,
        goal: &str,
        mode: BackwardMode,
        provider: &mut P,
    ) -> Result<bool, ReasoningError> {
        let paths = RulePaths::from_tree(&self.tree);
        backward_over_paths(&paths, &self.domain, &self.conclusion, goal, mode, provider)
    }

    /// The conclusion and every tested attribute must be known to the domain.
    pub fn validate(&self) -> Result<(), RuleSetError> {
        if !self.domain.contains_attribute(&self.conclusion) {
            return Err(RuleSetError::Inconsistent(format!(
                "conclusion '{}' has no domain",
                self.conclusion
            )));
        }
        if let Some(missing) = self
            .tree
            .attributes()
            .into_iter()
            .find(|a| !self.domain.contains_attribute(a))
        {
            return Err(RuleSetError::Inconsistent(format!(
                "tree tests '{missing}' which has no domain"
            )));
        }
        if let Some(label) = self
            .tree
            .conclusions()
            .into_iter()
            .find(|c| !self.domain.contains(&self.conclusion, c))
        {
            return Err(RuleSetError::Inconsistent(format!(
                "leaf '{label}' is not a value of '{}'",
                self.conclusion
            )));
        }
        Ok(())
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), RuleSetError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RuleSetError> {
        let ruleset: RuleSet = serde_json::from_reader(reader)?;
        ruleset.validate()?;
        Ok(ruleset)
    }
}

/// Somewhere a ruleset can be kept between `create` and reasoning.
pub trait RuleSetStore {
    fn save(&self, ruleset: &RuleSet) -> Result<(), RuleSetError>;
    fn load(&self) -> Result<RuleSet, RuleSetError>;
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RuleSetStore for JsonFileStore {
    fn save(&self, ruleset: &RuleSet) -> Result<(), RuleSetError> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        ruleset.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn load(&self) -> Result<RuleSet, RuleSetError> {
        RuleSet::from_reader(BufReader::new(File::open(&self.path)?))
    }
}
