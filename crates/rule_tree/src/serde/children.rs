//! Custom serde for `BTreeMap<AttributeValue, DecisionTree>`.
//! JSON object keys must be strings, so children are written as ordered
//! `(value, subtree)` pairs instead.

use crate::tree::DecisionTree;
use crate::value::AttributeValue;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

pub fn serialize<S>(
    children: &BTreeMap<AttributeValue, DecisionTree>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let pairs: Vec<(&AttributeValue, &DecisionTree)> = children.iter().collect();
    pairs.serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<AttributeValue, DecisionTree>, D::Error>
where
    D: Deserializer<'de>,
{
    let pairs: Vec<(AttributeValue, DecisionTree)> = Vec::deserialize(deserializer)?;
    Ok(pairs.into_iter().collect())
}
