//! # Request Parameters
//!
//! [`QueryParams`] is the flat query map the wrapper serializes onto the URL.
//! [`RequestOptions`] bundles it with the per-call cancellation token and timeout.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use shared::PageRequest;
use tokio_util::sync::CancellationToken;

use crate::core::error::{AppError, Result};

/// Scalar query value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl ParamValue {
    fn render(&self) -> String {
        match self {
            ParamValue::Str(s) => s.clone(),
            ParamValue::Int(n) => n.to_string(),
            ParamValue::UInt(n) => n.to_string(),
            ParamValue::Float(n) => n.to_string(),
            ParamValue::Bool(b) => b.to_string(),
        }
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<&String> for ParamValue {
    fn from(v: &String) -> Self {
        ParamValue::Str(v.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::UInt(u64::from(v))
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        ParamValue::UInt(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

/// Ordered, flat query parameters. Absent values are never serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, ParamValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key` only when `value` is present.
    pub fn with_opt<V: Into<ParamValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// `page` and `size`.
    pub fn page(page: PageRequest) -> Self {
        Self::new().with("page", page.page).with("size", page.size)
    }

    /// Flatten a serializable filter struct. `null` fields are omitted; nested
    /// arrays or objects are rejected.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| AppError::Validation(format!("query parameters: {e}")))?;

        let object = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(Self::new()),
            other => {
                return Err(AppError::Validation(format!(
                    "query parameters must be an object, got {other}"
                )))
            }
        };

        let mut params = Self::new();
        for (key, value) in object {
            match value {
                Value::Null => {}
                Value::Bool(b) => params.insert(key, b),
                Value::String(s) => params.insert(key, s),
                Value::Number(n) => {
                    if let Some(u) = n.as_u64() {
                        params.insert(key, u);
                    } else if let Some(i) = n.as_i64() {
                        params.insert(key, i);
                    } else if let Some(f) = n.as_f64() {
                        params.insert(key, f);
                    }
                }
                Value::Array(_) | Value::Object(_) => {
                    return Err(AppError::Validation(format!(
                        "query parameter `{key}` must be a scalar"
                    )))
                }
            }
        }
        Ok(params)
    }

    /// Append all of `other`, its values winning on conflicts.
    pub fn merge(mut self, other: QueryParams) -> Self {
        for (key, value) in other.pairs {
            self.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Pairs rendered to strings, in insertion order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.pairs
            .iter()
            .map(|(k, v)| (k.clone(), v.render()))
            .collect()
    }
}

/// Per-call options for the request wrapper.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub params: QueryParams,
    pub cancel: Option<CancellationToken>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Attach `token` when one is given.
    pub fn maybe_cancel(mut self, token: Option<CancellationToken>) -> Self {
        if let Some(token) = token {
            self.cancel = Some(token);
        }
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl From<QueryParams> for RequestOptions {
    fn from(params: QueryParams) -> Self {
        Self::new().params(params)
    }
}
