//! Where reasoning sessions get their attribute values from.
//!
//! Both reasoners only ever talk to a [`ValueProvider`]. A console adapter,
//! a scripted queue of answers, and a table row all fit behind it.

use crate::error::ReasoningError;
use crate::table::Row;
use crate::value::{AttributeValue, normalize};
use std::fmt;

/// Why a provider's answer was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    UnknownPredicate(String),
    AlreadyQueried(String),
    InvalidValue { attribute: String, value: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnknownPredicate(name) => write!(f, "\"{name}\" is not a valid predicate"),
            Rejection::AlreadyQueried(name) => write!(f, "\"{name}\" has already been checked"),
            Rejection::InvalidValue { value, .. } => {
                write!(f, "\"{value}\" is not a valid predicate value")
            }
        }
    }
}

impl From<Rejection> for ReasoningError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::UnknownPredicate(name) => ReasoningError::UnknownPredicate(name),
            Rejection::AlreadyQueried(name) => ReasoningError::AlreadyQueried(name),
            Rejection::InvalidValue { attribute, value } => {
                ReasoningError::InvalidValue { attribute, value }
            }
        }
    }
}

pub trait ValueProvider {
    /// Value for `attribute`, as raw text; `allowed` lists the accepted values.
    fn request(
        &mut self,
        attribute: &str,
        allowed: &[&AttributeValue],
    ) -> Result<String, ReasoningError>;

    /// Next predicate to constrain during backward reasoning.
    fn choose_attribute(&mut self, candidates: &[&str]) -> Result<String, ReasoningError> {
        candidates
            .first()
            .map(|c| c.to_string())
            .ok_or_else(|| ReasoningError::ProviderExhausted("<predicate>".to_string()))
    }

    /// Whether a rejected answer may be asked for again.
    fn can_retry(&self) -> bool {
        false
    }

    /// Called before re-asking after a rejection.
    fn rejected(&mut self, _rejection: &Rejection) {}
}

/// Asks until the provider names a value in `allowed`, or fails when it cannot retry.
pub(crate) fn request_valid_value<P: ValueProvider + ?Sized>(
    provider: &mut P,
    attribute: &str,
    allowed: &[&AttributeValue],
) -> Result<AttributeValue, ReasoningError> {
    loop {
        let raw = provider.request(attribute, allowed)?;
        if let Some(value) = allowed.iter().find(|v| v.matches_input(&raw)) {
            return Ok((*value).clone());
        }
        let rejection = Rejection::InvalidValue {
            attribute: attribute.to_string(),
            value: normalize(&raw),
        };
        if !provider.can_retry() {
            return Err(rejection.into());
        }
        provider.rejected(&rejection);
    }
}

/// Pre-recorded `(attribute, value)` answers.
///
/// `request` hands out the first unused answer for the asked attribute;
/// `choose_attribute` names the attribute of the next unused answer, in
/// insertion order. With `retrying`, rejected answers are recorded and the
/// next answer is tried.
#[derive(Debug, Clone, Default)]
pub struct ScriptedValues {
    answers: Vec<(String, String)>,
    used: Vec<bool>,
    retry: bool,
    rejections: Vec<Rejection>,
}

impl ScriptedValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, A, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, V)>,
        A: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |acc, (a, v)| acc.with(a, v))
    }

    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.answers.push((attribute.into(), value.into()));
        self.used.push(false);
        self
    }

    pub fn retrying(mut self) -> Self {
        self.retry = true;
        self
    }

    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    pub fn remaining(&self) -> usize {
        self.used.iter().filter(|u| !**u).count()
    }
}

impl ValueProvider for ScriptedValues {
    fn request(
        &mut self,
        attribute: &str,
        _allowed: &[&AttributeValue],
    ) -> Result<String, ReasoningError> {
        let wanted = normalize(attribute);
        let slot = self
            .answers
            .iter()
            .zip(self.used.iter())
            .position(|((a, _), used)| !used && normalize(a) == wanted)
            .ok_or_else(|| ReasoningError::ProviderExhausted(attribute.to_string()))?;
        self.used[slot] = true;
        Ok(self.answers[slot].1.clone())
    }

    fn choose_attribute(&mut self, _candidates: &[&str]) -> Result<String, ReasoningError> {
        self.answers
            .iter()
            .zip(self.used.iter())
            .find(|(_, used)| !**used)
            .map(|((a, _), _)| a.clone())
            .ok_or_else(|| ReasoningError::ProviderExhausted("<predicate>".to_string()))
    }

    fn can_retry(&self) -> bool {
        self.retry
    }

    fn rejected(&mut self, rejection: &Rejection) {
        // A rejected predicate never reaches `request`, so retire its answer here.
        if let Rejection::UnknownPredicate(name) | Rejection::AlreadyQueried(name) = rejection {
            let wanted = normalize(name);
            if let Some(slot) = self
                .answers
                .iter()
                .zip(self.used.iter())
                .position(|((a, _), used)| !used && normalize(a) == wanted)
            {
                self.used[slot] = true;
            }
        }
        self.rejections.push(rejection.clone());
    }
}

/// Answers from one table row; used to classify rows without interaction.
#[derive(Debug, Clone)]
pub struct RowValues<'a> {
    row: &'a Row,
}

impl<'a> RowValues<'a> {
    pub fn new(row: &'a Row) -> Self {
        Self { row }
    }
}

impl ValueProvider for RowValues<'_> {
    fn request(
        &mut self,
        attribute: &str,
        _allowed: &[&AttributeValue],
    ) -> Result<String, ReasoningError> {
        self.row
            .get(attribute)
            .map(|v| v.to_string())
            .ok_or_else(|| ReasoningError::ProviderExhausted(attribute.to_string()))
    }
}
