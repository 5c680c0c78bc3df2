use crate::conf::GAIN_TOLERANCE;
use crate::dataframe::ordered_counts;
use crate::entropy::{entropy_of_counts, node_entropy};
use crate::error::BuildError;
use crate::table::Subtable;
use core::fmt;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub enum SplitResult {
    /// The attribute with the highest information gain.
    Informative { attribute: String, gain: f64 },
    /// No attribute gains anything; first attribute that still varies.
    Fallback { attribute: String },
    /// Every remaining attribute is constant over the rows.
    Exhausted,
}

impl SplitResult {
    pub fn attribute(&self) -> Option<&str> {
        match self {
            SplitResult::Informative { attribute, .. } => Some(attribute),
            SplitResult::Fallback { attribute } => Some(attribute),
            SplitResult::Exhausted => None,
        }
    }

    pub fn gain(&self) -> f64 {
        match self {
            SplitResult::Informative { gain, .. } => *gain,
            SplitResult::Fallback { .. } => 0.0,
            SplitResult::Exhausted => -f64::INFINITY,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, SplitResult::Exhausted)
    }
}

impl fmt::Display for SplitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitResult::Informative { attribute, gain } => {
                write!(f, "Informative(attribute: {attribute}, gain: {gain:.6})")
            }
            SplitResult::Fallback { attribute } => write!(f, "Fallback(attribute: {attribute})"),
            SplitResult::Exhausted => write!(f, "Exhausted"),
        }
    }
}

/// Information gain of partitioning `table` on `attribute`.
///
/// Clamped at zero: rounding can push a useless split a hair below it.
pub fn information_gain(
    table: &Subtable<'_>,
    attribute: &str,
    conclusion: &str,
) -> Result<f64, BuildError> {
    if table.is_empty() {
        return Ok(0.0);
    }
    let source = table.table();
    let attr_col = source
        .column(attribute)
        .ok_or_else(|| BuildError::UnknownAttribute(attribute.to_string()))?;
    let label_col = source
        .column(conclusion)
        .ok_or_else(|| BuildError::UnknownAttribute(conclusion.to_string()))?;

    let parent = node_entropy(table, conclusion)?;

    let mut partitions: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for &row in table.rows() {
        partitions
            .entry(attr_col.codes[row as usize])
            .or_default()
            .push(label_col.codes[row as usize]);
    }

    let total = table.len() as f64;
    let children: f64 = partitions
        .values()
        .map(|labels| {
            let (counts, _) = ordered_counts(labels.iter().copied());
            (labels.len() as f64 / total) * entropy_of_counts(&counts)
        })
        .sum();

    Ok((parent - children).max(0.0))
}

#[derive(Clone, Debug)]
pub struct SplitSelector {
    pub gain_tolerance: f64,
    pub parallel: bool,
}

impl Default for SplitSelector {
    fn default() -> Self {
        Self {
            gain_tolerance: GAIN_TOLERANCE,
            parallel: true,
        }
    }
}

impl SplitSelector {
    /// Gain of every attribute except `conclusion`, in column order.
    pub fn candidate_gains(
        &self,
        table: &Subtable<'_>,
        conclusion: &str,
    ) -> Result<Vec<(String, f64)>, BuildError> {
        let attributes = table.table().attribute_names(conclusion);
        let evaluate = |attribute: &&str| {
            information_gain(table, attribute, conclusion).map(|g| (attribute.to_string(), g))
        };
        if self.parallel {
            attributes.par_iter().map(evaluate).collect()
        } else {
            attributes.iter().map(evaluate).collect()
        }
    }

    pub fn select(&self, table: &Subtable<'_>, conclusion: &str) -> Result<SplitResult, BuildError> {
        if table.is_empty() {
            return Err(BuildError::EmptyTable);
        }
        let gains = self.candidate_gains(table, conclusion)?;
        if gains.is_empty() {
            return Err(BuildError::NoAttributes);
        }

        // Strict comparison keeps the earliest column on ties.
        let mut best: Option<(&str, f64)> = None;
        for (attribute, gain) in &gains {
            trace!(attribute = attribute.as_str(), gain, "candidate gain");
            if best.is_none_or(|(_, g)| *gain > g) {
                best = Some((attribute, *gain));
            }
        }

        if let Some((attribute, gain)) = best {
            if gain > self.gain_tolerance {
                return Ok(SplitResult::Informative {
                    attribute: attribute.to_string(),
                    gain,
                });
            }
        }

        let source = table.table();
        let fallback = gains.iter().find(|(attribute, _)| {
            source
                .column(attribute)
                .is_some_and(|c| table.distinct_count(c) > 1)
        });
        Ok(match fallback {
            Some((attribute, _)) => SplitResult::Fallback {
                attribute: attribute.clone(),
            },
            None => SplitResult::Exhausted,
        })
    }
}

/// [`SplitSelector::select`] with the default tolerance.
pub fn best_split(table: &Subtable<'_>, conclusion: &str) -> Result<SplitResult, BuildError> {
    SplitSelector::default().select(table, conclusion)
}
