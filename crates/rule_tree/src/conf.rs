use serde::{Deserialize, Serialize};

pub const DEFAULT_RULESET_FILE: &str = "ruleset.json";
/// Gains at or below this are treated as "no attribute discriminates".
pub const GAIN_TOLERANCE: f64 = 1e-12;

/// How a chosen attribute fans out into children.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum BranchPolicy {
    /// One child per value present in the current subtable.
    #[default]
    Observed,
    /// Exactly `true` and `false`; empty branches are left out.
    Boolean,
}

impl BranchPolicy {
    pub fn requires_boolean_attributes(&self) -> bool {
        matches!(self, BranchPolicy::Boolean)
    }
}

/// When backward reasoning may stop asking.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum BackwardMode {
    /// Stop as soon as at most one rule path is left.
    #[default]
    Narrow,
    /// Also ask for every test on the surviving path that is still unchecked.
    Confirm,
}
