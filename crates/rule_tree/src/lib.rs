//! # Rule Tree
//!
//! Information-gain (ID3-style) decision trees over boolean and categorical
//! tables, plus two ways of reasoning with the learned rules.
//!
//! ## Key Features
//!
//! - **Entropy-driven induction**: one split per node, chosen by maximum
//!   information gain, grown until every branch is pure
//! - **Forward reasoning**: walk from the root, asking for each tested value
//! - **Backward reasoning**: start from a conclusion and narrow the rule
//!   paths that lead to it
//! - **Injectable answers**: every question goes through a [`provider::ValueProvider`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use rule_tree::provider::ScriptedValues;
//! use rule_tree::ruleset::RuleSet;
//! use rule_tree::table::Table;
//! use rule_tree::tree::TreeBuilder;
//!
//! let table = Table::from_rows(
//!     "play",
//!     &["weather", "play"],
//!     vec![
//!         vec!["sunny".into(), "yes".into()],
//!         vec!["sunny".into(), "yes".into()],
//!         vec!["rainy".into(), "no".into()],
//!     ],
//! )?;
//! let rules = RuleSet::create(&table, &TreeBuilder::default())?;
//!
//! let mut answers = ScriptedValues::new().with("weather", "sunny");
//! assert_eq!(rules.forward(&mut answers)?.to_string(), "yes");
//!
//! let mut answers = ScriptedValues::new().with("weather", "rainy");
//! assert!(rules.backward("no", &mut answers)?);
//! ```

pub mod backward;
pub mod conf;
pub mod dataframe;
pub mod domain;
pub mod entropy;
pub mod error;
pub mod estimator;
pub mod forward;
pub mod provider;
pub mod ruleset;
pub mod serde;
pub mod split;
pub mod table;
pub mod tree;
pub mod value;

pub use domain::AttributeDomain;
pub use error::{BuildError, ReasoningError, RuleSetError, TableError};
pub use ruleset::RuleSet;
pub use table::Table;
pub use tree::{DecisionTree, TreeBuilder};
pub use value::AttributeValue;
