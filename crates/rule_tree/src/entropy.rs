//! Shannon entropy of label distributions.

use crate::error::BuildError;
use crate::table::Subtable;

/// One term of the entropy sum: `-(count/total) * log2(count/total)`.
///
/// Zero when either argument is zero, so empty partitions contribute nothing.
pub fn entropy_term(count: usize, total: usize) -> f64 {
    if count == 0 || total == 0 {
        return 0.0;
    }
    let p = count as f64 / total as f64;
    -(p * p.log2())
}

/// Entropy of a label histogram.
pub fn entropy_of_counts(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    counts.iter().map(|&c| entropy_term(c, total)).sum()
}

/// Entropy of the `conclusion` column over the rows of `table`.
pub fn node_entropy(table: &Subtable<'_>, conclusion: &str) -> Result<f64, BuildError> {
    let column = table
        .table()
        .column(conclusion)
        .ok_or_else(|| BuildError::UnknownAttribute(conclusion.to_string()))?;
    let (counts, _) = table.value_counts(column);
    Ok(entropy_of_counts(&counts))
}
