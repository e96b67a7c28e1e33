//! Parameter values extracted from a matched path
//!
//! `Params` wraps the raw string captures and offers typed accessors with
//! conversion errors, the way handlers usually consume them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when reading a typed parameter
#[derive(Error, Debug, PartialEq)]
pub enum ParamError {
    #[error("Missing parameter: {0}")]
    Missing(String),
    #[error("Type conversion failed for parameter '{param}': {error}")]
    ConversionFailed { param: String, error: String },
}

/// Named parameter values of a matched route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(HashMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Get a parameter as a raw string
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|s| s.as_str())
    }

    /// Get a parameter converted to a specific type
    pub fn get_as<T>(&self, name: &str) -> Result<T, ParamError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let value = self
            .0
            .get(name)
            .ok_or_else(|| ParamError::Missing(name.to_string()))?;

        value.parse::<T>().map_err(|e| ParamError::ConversionFailed {
            param: name.to_string(),
            error: e.to_string(),
        })
    }

    /// Get a parameter as an integer
    pub fn get_int(&self, name: &str) -> Result<i64, ParamError> {
        self.get_as::<i64>(name)
    }

    /// Get a parameter as a UUID
    pub fn get_uuid(&self, name: &str) -> Result<Uuid, ParamError> {
        self.get_as::<Uuid>(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

impl From<HashMap<String, String>> for Params {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
