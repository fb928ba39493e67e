//! Resource entity and the field invariants every persisted resource satisfies.

use crate::error::StoreError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Allowed characters for `owner` and `type`.
pub const NAME_PATTERN: &str = r"^[a-zA-Z0-9\s]+$";
/// Allowed characters for `details`.
pub const DETAILS_PATTERN: &str = r"^[a-zA-Z0-9\s,.-]+$";
pub const MIN_AMOUNT: i64 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: Uuid,
    #[schema(example = "John Doe")]
    pub owner: String,
    #[serde(rename = "type")]
    #[schema(example = "Book")]
    pub kind: String,
    #[schema(example = "The Great Gatsby")]
    pub details: String,
    #[schema(example = 10, minimum = 1)]
    pub amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Business fields of a resource before the store assigns id and timestamps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewResource {
    pub owner: String,
    pub kind: String,
    pub details: String,
    pub amount: i64,
}

/// Fields to replace on update. `None` leaves the stored value unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourcePatch {
    pub owner: Option<String>,
    pub kind: Option<String>,
    pub details: Option<String>,
    pub amount: Option<i64>,
}

/// Exact-match list filter; both fields combine with AND.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResourceFilter {
    /// The owner of the resource
    #[param(example = "John Doe")]
    pub owner: Option<String>,
    /// Type of resource
    #[serde(rename = "type")]
    #[param(example = "Book")]
    pub kind: Option<String>,
}

impl ResourceFilter {
    pub fn matches(&self, resource: &Resource) -> bool {
        self.owner.as_deref().map_or(true, |o| resource.owner == o)
            && self.kind.as_deref().map_or(true, |k| resource.kind == k)
    }
}

impl NewResource {
    pub fn check(&self) -> Result<(), StoreError> {
        check_fields(&self.owner, &self.kind, &self.details, self.amount)
    }
}

impl Resource {
    pub fn check(&self) -> Result<(), StoreError> {
        check_fields(&self.owner, &self.kind, &self.details, self.amount)
    }

    /// Apply supplied patch fields in place. Does not touch `updated_at`.
    pub fn apply(&mut self, patch: ResourcePatch) {
        if let Some(owner) = patch.owner {
            self.owner = owner;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(details) = patch.details {
            self.details = details;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
    }
}

impl ResourcePatch {
    /// Check only the fields that are present.
    pub fn check(&self) -> Result<(), StoreError> {
        if let Some(owner) = &self.owner {
            check_pattern("owner", owner, NAME_PATTERN)?;
        }
        if let Some(kind) = &self.kind {
            check_pattern("type", kind, NAME_PATTERN)?;
        }
        if let Some(details) = &self.details {
            check_pattern("details", details, DETAILS_PATTERN)?;
        }
        if let Some(amount) = self.amount {
            check_amount(amount)?;
        }
        Ok(())
    }
}

fn check_fields(owner: &str, kind: &str, details: &str, amount: i64) -> Result<(), StoreError> {
    check_pattern("owner", owner, NAME_PATTERN)?;
    check_pattern("type", kind, NAME_PATTERN)?;
    check_pattern("details", details, DETAILS_PATTERN)?;
    check_amount(amount)
}

fn check_pattern(field: &str, value: &str, pattern: &str) -> Result<(), StoreError> {
    let re = Regex::new(pattern).map_err(|e| StoreError::Invariant(e.to_string()))?;
    if value.is_empty() {
        return Err(StoreError::Invariant(format!("{} is required", field)));
    }
    if !re.is_match(value) {
        return Err(StoreError::Invariant(format!("{} contains invalid characters", field)));
    }
    Ok(())
}

fn check_amount(amount: i64) -> Result<(), StoreError> {
    if amount < MIN_AMOUNT {
        return Err(StoreError::Invariant(format!(
            "amount must be at least {}",
            MIN_AMOUNT
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> NewResource {
        NewResource {
            owner: "Brian".into(),
            kind: "Book".into(),
            details: "The Great Gatsby, 1st ed.".into(),
            amount: 10,
        }
    }

    #[test]
    fn accepts_valid_fields() {
        assert!(book().check().is_ok());
    }

    #[test]
    fn rejects_empty_and_bad_characters() {
        let mut r = book();
        r.owner = String::new();
        assert!(matches!(r.check(), Err(StoreError::Invariant(_))));

        let mut r = book();
        r.kind = "Book!".into();
        assert!(r.check().is_err());

        let mut r = book();
        r.details = "50% off".into();
        assert!(r.check().is_err());
    }

    #[test]
    fn rejects_amount_below_one() {
        let mut r = book();
        r.amount = 0;
        assert!(r.check().is_err());
    }

    #[test]
    fn patch_checks_only_present_fields() {
        assert!(ResourcePatch::default().check().is_ok());
        let patch = ResourcePatch {
            amount: Some(-1),
            ..Default::default()
        };
        assert!(patch.check().is_err());
    }

    #[test]
    fn filter_uses_and_semantics() {
        let now = Utc::now();
        let r = Resource {
            id: Uuid::new_v4(),
            owner: "Jane".into(),
            kind: "Book".into(),
            details: "Pride and Prejudice".into(),
            amount: 3,
            created_at: now,
            updated_at: now,
        };
        assert!(ResourceFilter::default().matches(&r));
        let f = ResourceFilter {
            owner: Some("Jane".into()),
            kind: Some("Book".into()),
        };
        assert!(f.matches(&r));
        let f = ResourceFilter {
            owner: Some("Jane".into()),
            kind: Some("Candle".into()),
        };
        assert!(!f.matches(&r));
    }
}
