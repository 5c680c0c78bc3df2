use crate::conf::BranchPolicy;
use crate::dataframe::RuleTreeDataFrameExt;
use crate::forward::forward_reasoning;
use crate::provider::RowValues;
use crate::ruleset::RuleSet;
use crate::table::Table;
use crate::tree::TreeBuilder;
use estimators::api::{Estimator, FitError, PredictError};
use polars::prelude::*;

/// Information-gain classifier over categorical/boolean frames.
#[derive(Debug, Clone, Default)]
pub struct Id3Classifier {
    pub policy: BranchPolicy,
    pub ruleset: Option<RuleSet>,
}

impl Id3Classifier {
    pub fn new(policy: BranchPolicy) -> Self {
        Self {
            policy,
            ruleset: None,
        }
    }

    pub fn ruleset(&self) -> Option<&RuleSet> {
        self.ruleset.as_ref()
    }

    pub fn tree_info(&self) -> String {
        match &self.ruleset {
            Some(r) => r.tree.to_string(),
            None => "Tree not fitted".to_string(),
        }
    }
}

impl Estimator for Id3Classifier {
    fn _fit_impl(&mut self, x: &DataFrame, y: &DataFrame) -> Result<(), FitError> {
        if y.width() != 1 {
            return Err(FitError::InvalidInput(format!(
                "expected exactly one label column, got {}",
                y.width()
            )));
        }
        if x.height() != y.height() {
            return Err(FitError::InvalidInput(format!(
                "x has {} rows but y has {}",
                x.height(),
                y.height()
            )));
        }
        let conclusion = y.column_names_vec().remove(0);
        let xy = x.hstack(y.get_columns())?;
        let table =
            Table::new(&xy, &conclusion).map_err(|e| FitError::InvalidInput(e.to_string()))?;
        let ruleset = RuleSet::create(&table, &TreeBuilder::new(self.policy))
            .map_err(|e| FitError::Training(e.to_string()))?;
        self.ruleset = Some(ruleset);
        Ok(())
    }

    fn _predict_impl(&self, x: &DataFrame) -> Result<DataFrame, PredictError> {
        let ruleset = self.ruleset.as_ref().ok_or(PredictError::NotFitted)?;
        let frame = x
            .normalized()
            .map_err(|e| PredictError::InvalidInput(e.to_string()))?;

        let mut labels: Vec<String> = Vec::with_capacity(frame.height());
        for row_idx in 0..frame.height() {
            let row = frame
                .get_row_values(row_idx)
                .ok_or_else(|| PredictError::InvalidInput(format!("row {row_idx} is unreadable")))?;
            let label = forward_reasoning(&ruleset.tree, &mut RowValues::new(&row))
                .map_err(|e| PredictError::Unclassified {
                    row: row_idx,
                    reason: e.to_string(),
                })?;
            labels.push(label.to_string());
        }

        let out = Series::new(PlSmallStr::from_str(&ruleset.conclusion), labels);
        Ok(DataFrame::new(vec![out.into()])?)
    }

    fn is_fitted(&self) -> bool {
        self.ruleset.is_some()
    }
}
