use crate::table::Table;
use crate::value::{AttributeValue, normalize};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Distinct values observed per attribute (conclusion included).
///
/// Derived once from the training table and frozen afterwards; reasoning
/// uses it to validate what a value provider hands back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDomain {
    values: BTreeMap<String, BTreeSet<AttributeValue>>,
}

impl AttributeDomain {
    pub fn from_table(table: &Table) -> Self {
        let values = table
            .columns()
            .iter()
            .map(|c| (c.name.clone(), c.levels.iter().cloned().collect()))
            .collect();
        Self { values }
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn values(&self, attribute: &str) -> Option<&BTreeSet<AttributeValue>> {
        self.values.get(attribute)
    }

    pub fn contains_attribute(&self, attribute: &str) -> bool {
        self.values.contains_key(attribute)
    }

    pub fn contains(&self, attribute: &str, value: &AttributeValue) -> bool {
        self.values
            .get(attribute)
            .is_some_and(|set| set.contains(value))
    }

    /// Resolves raw user input to a known value of `attribute`.
    pub fn parse(&self, attribute: &str, raw: &str) -> Option<&AttributeValue> {
        self.values
            .get(&normalize(attribute))?
            .iter()
            .find(|v| v.matches_input(raw))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
