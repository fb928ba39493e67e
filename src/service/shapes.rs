//! Request shapes for the resource routes: rule tables and typed payloads.

use crate::model::{NewResource, ResourceFilter, ResourcePatch, DETAILS_PATTERN, MIN_AMOUNT, NAME_PATTERN};
use crate::service::validation::{FieldRule, Rule, Shape};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

const RESOURCE_ID: FieldRule = FieldRule {
    field: "resourceId",
    optional: false,
    rules: &[Rule::IsUuid],
};

const fn name_field(field: &'static str, optional: bool) -> FieldRule {
    FieldRule {
        field,
        optional,
        rules: &[Rule::IsString, Rule::Matches(NAME_PATTERN)],
    }
}

const fn details_field(optional: bool) -> FieldRule {
    FieldRule {
        field: "details",
        optional,
        rules: &[Rule::IsString, Rule::Matches(DETAILS_PATTERN)],
    }
}

const fn amount_field(optional: bool) -> FieldRule {
    FieldRule {
        field: "amount",
        optional,
        rules: &[Rule::IsInt, Rule::Min(MIN_AMOUNT)],
    }
}

static RESOURCE_ID_RULES: [FieldRule; 1] = [RESOURCE_ID];

static CREATE_RULES: [FieldRule; 4] = [
    name_field("owner", false),
    name_field("type", false),
    details_field(false),
    amount_field(false),
];

static UPDATE_RULES: [FieldRule; 5] = [
    RESOURCE_ID,
    name_field("owner", true),
    name_field("type", true),
    details_field(true),
    amount_field(true),
];

static FILTER_RULES: [FieldRule; 2] = [name_field("owner", true), name_field("type", true)];

/// Identifies one resource by its storage id.
#[derive(Clone, Debug, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ResourceIdPayload {
    /// The ID of the resource
    #[schema(example = "3f1c2a8e-9b4d-4c7a-8f21-6d5e0b9a1c34")]
    #[param(example = "3f1c2a8e-9b4d-4c7a-8f21-6d5e0b9a1c34")]
    pub resource_id: Uuid,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreateResource {
    /// The owner of the resource
    #[schema(example = "John Doe")]
    pub owner: String,
    /// Type of resource
    #[serde(rename = "type")]
    #[schema(example = "Book")]
    pub kind: String,
    /// Details about the resource
    #[schema(example = "The Great Gatsby")]
    pub details: String,
    /// The number of resources
    #[schema(example = 10, minimum = 1)]
    pub amount: i64,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResource {
    /// The ID of the resource to update
    #[schema(example = "3f1c2a8e-9b4d-4c7a-8f21-6d5e0b9a1c34")]
    pub resource_id: Uuid,
    #[schema(example = "John Doe")]
    pub owner: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "Book")]
    pub kind: Option<String>,
    #[schema(example = "The Great Gatsby")]
    pub details: Option<String>,
    #[schema(minimum = 1)]
    pub amount: Option<i64>,
}

impl Shape for ResourceIdPayload {
    fn rules() -> &'static [FieldRule] {
        &RESOURCE_ID_RULES
    }
}

impl Shape for CreateResource {
    fn rules() -> &'static [FieldRule] {
        &CREATE_RULES
    }
}

impl Shape for UpdateResource {
    fn rules() -> &'static [FieldRule] {
        &UPDATE_RULES
    }
}

impl Shape for ResourceFilter {
    fn rules() -> &'static [FieldRule] {
        &FILTER_RULES
    }
}

impl From<CreateResource> for NewResource {
    fn from(c: CreateResource) -> Self {
        NewResource {
            owner: c.owner,
            kind: c.kind,
            details: c.details,
            amount: c.amount,
        }
    }
}

impl UpdateResource {
    /// Split into target id and patch. Empty strings and zero count as not supplied.
    pub fn into_patch(self) -> (Uuid, ResourcePatch) {
        let patch = ResourcePatch {
            owner: self.owner.filter(|s| !s.is_empty()),
            kind: self.kind.filter(|s| !s.is_empty()),
            details: self.details.filter(|s| !s.is_empty()),
            amount: self.amount.filter(|n| *n != 0),
        };
        (self.resource_id, patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde_json::{json, Map, Value};

    fn object(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => Map::new(),
        }
    }

    #[test]
    fn create_shape_materializes() {
        let payload = object(json!({
            "owner": "Brian",
            "type": "Book",
            "details": "The Great Gatsby",
            "amount": 10,
            "ignored": "yes"
        }));
        let create = CreateResource::from_payload(payload).unwrap();
        assert_eq!(create.kind, "Book");
        assert_eq!(create.amount, 10);
    }

    #[test]
    fn create_shape_reports_missing_details() {
        let payload = object(json!({ "owner": "Brian", "type": "Book", "amount": 3000 }));
        match CreateResource::from_payload(payload) {
            Err(AppError::Validation(violations)) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].property, "details");
                assert_eq!(
                    violations[0].constraints.get("isString").map(String::as_str),
                    Some("details must be a string")
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn update_shape_requires_resource_id_only() {
        let id = Uuid::new_v4();
        let payload = object(json!({ "resourceId": id.to_string(), "owner": "John" }));
        let (target, patch) = UpdateResource::from_payload(payload).unwrap().into_patch();
        assert_eq!(target, id);
        assert_eq!(patch.owner.as_deref(), Some("John"));
        assert!(patch.kind.is_none() && patch.details.is_none() && patch.amount.is_none());

        let missing = UpdateResource::from_payload(object(json!({ "owner": "John" })));
        assert!(matches!(missing, Err(AppError::Validation(v)) if v[0].property == "resourceId"));
    }

    #[test]
    fn filter_shape_rejects_bad_characters() {
        let payload = object(json!({ "type": "??%%" }));
        match ResourceFilter::from_payload(payload) {
            Err(AppError::Validation(violations)) => {
                assert_eq!(violations[0].property, "type");
                assert_eq!(
                    violations[0].constraints.get("matches").map(String::as_str),
                    Some(r"type must match /^[a-zA-Z0-9\s]+$/ regular expression")
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
