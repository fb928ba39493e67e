//! Request validation from declarative per-field rule tables.

use crate::error::AppError;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// A single constraint on a field value.
#[derive(Clone, Copy, Debug)]
pub enum Rule {
    IsString,
    /// Value must be a string fully matching the pattern.
    Matches(&'static str),
    IsInt,
    Min(i64),
    IsUuid,
}

impl Rule {
    /// Constraint key reported in violation entries.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::IsString => "isString",
            Rule::Matches(_) => "matches",
            Rule::IsInt => "isInt",
            Rule::Min(_) => "min",
            Rule::IsUuid => "isUuid",
        }
    }

    pub fn message(&self, field: &str) -> String {
        match self {
            Rule::IsString => format!("{} must be a string", field),
            Rule::Matches(pattern) => format!("{} must match /{}/ regular expression", field, pattern),
            Rule::IsInt => format!("{} must be an integer number", field),
            Rule::Min(min) => format!("{} must not be less than {}", field, min),
            Rule::IsUuid => format!("{} must be a UUID", field),
        }
    }

    /// Missing values fail every rule; optionality is decided by the caller.
    fn check(&self, value: Option<&Value>) -> Result<bool, regex::Error> {
        let Some(v) = value else {
            return Ok(false);
        };
        Ok(match self {
            Rule::IsString => v.is_string(),
            Rule::Matches(pattern) => {
                let re = Regex::new(pattern)?;
                v.as_str().map(|s| re.is_match(s)).unwrap_or(false)
            }
            Rule::IsInt => as_integer(v).is_some(),
            Rule::Min(min) => v.as_f64().map(|n| n >= *min as f64).unwrap_or(false),
            Rule::IsUuid => v.as_str().map(is_hyphenated_uuid).unwrap_or(false),
        })
    }
}

/// Only the 36-character `8-4-4-4-12` form; simple, braced and urn forms are rejected.
fn is_hyphenated_uuid(s: &str) -> bool {
    s.len() == 36 && uuid::Uuid::try_parse(s).is_ok()
}

/// Integral JSON number as i64. Accepts `3.0` as well as `3`.
fn as_integer(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    let f = v.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Rules for one named field. Optional fields skip all rules when absent or null.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub optional: bool,
    pub rules: &'static [Rule],
}

/// One field that failed validation, with every rule it failed keyed by rule name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    #[schema(example = "details")]
    pub property: String,
    pub constraints: BTreeMap<String, String>,
}

pub struct RequestValidator;

impl RequestValidator {
    /// Check payload against rules in table order. Unknown payload keys are ignored.
    pub fn validate(
        payload: &Map<String, Value>,
        rules: &[FieldRule],
    ) -> Result<Vec<FieldViolation>, regex::Error> {
        let mut violations = Vec::new();
        for rule in rules {
            let value = payload.get(rule.field).filter(|v| !v.is_null());
            if value.is_none() && rule.optional {
                continue;
            }
            let mut constraints = BTreeMap::new();
            for r in rule.rules {
                if !r.check(value)? {
                    constraints.insert(r.name().to_string(), r.message(rule.field));
                }
            }
            if !constraints.is_empty() {
                violations.push(FieldViolation {
                    property: rule.field.to_string(),
                    constraints,
                });
            }
        }
        Ok(violations)
    }

    /// Keep only declared, non-null fields; integral numbers become plain integers.
    pub fn normalize(payload: Map<String, Value>, rules: &[FieldRule]) -> Map<String, Value> {
        let mut out = Map::new();
        for rule in rules {
            let Some(v) = payload.get(rule.field).filter(|v| !v.is_null()) else {
                continue;
            };
            let normalized = if rule.rules.iter().any(|r| matches!(r, Rule::IsInt)) {
                as_integer(v).map(Value::from).unwrap_or_else(|| v.clone())
            } else {
                v.clone()
            };
            out.insert(rule.field.to_string(), normalized);
        }
        out
    }
}

/// A validated request shape: a rule table plus the typed value it materializes into.
pub trait Shape: DeserializeOwned + Send {
    fn rules() -> &'static [FieldRule];

    /// Validate a raw payload and build the typed shape from it.
    fn from_payload(payload: Map<String, Value>) -> Result<Self, AppError> {
        let violations = RequestValidator::validate(&payload, Self::rules())
            .map_err(|e| AppError::server("Validation error", e))?;
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }
        let normalized = RequestValidator::normalize(payload, Self::rules());
        serde_json::from_value(Value::Object(normalized))
            .map_err(|e| AppError::server("Validation error", e))
    }
}
