//! Request bodies and paging/search options.
//!
//! Every body carries a `"class"` key naming the server-side bean, and omits
//! options the caller left unset so the server applies its own defaults.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::validate::normalize_search_string;

// ── Enumerations ─────────────────────────────────────────────────────────────

/// Lifecycle status of a governed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementStatus {
    Draft,
    Prepared,
    Proposed,
    Approved,
    Rejected,
    ApprovedConcept,
    UnderDevelopment,
    DevelopmentComplete,
    ApprovedForDeployment,
    Standby,
    Active,
    Failed,
    Disabled,
    Complete,
    Deprecated,
    Other,
}

impl std::str::FromStr for ElementStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "DRAFT" => Self::Draft,
            "PREPARED" => Self::Prepared,
            "PROPOSED" => Self::Proposed,
            "APPROVED" => Self::Approved,
            "REJECTED" => Self::Rejected,
            "APPROVED_CONCEPT" => Self::ApprovedConcept,
            "UNDER_DEVELOPMENT" => Self::UnderDevelopment,
            "DEVELOPMENT_COMPLETE" => Self::DevelopmentComplete,
            "APPROVED_FOR_DEPLOYMENT" => Self::ApprovedForDeployment,
            "STANDBY" => Self::Standby,
            "ACTIVE" => Self::Active,
            "FAILED" => Self::Failed,
            "DISABLED" => Self::Disabled,
            "COMPLETE" => Self::Complete,
            "DEPRECATED" => Self::Deprecated,
            "OTHER" => Self::Other,
            other => return Err(format!("unknown element status '{other}'")),
        };
        Ok(status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SequencingOrder {
    Any,
    Guid,
    CreationDateRecent,
    CreationDateOldest,
    LastUpdateRecent,
    LastUpdateOldest,
    PropertyAscending,
    PropertyDescending,
}

// ── Element bodies ───────────────────────────────────────────────────────────

/// Body for creating an element. `P` is one of the typed property structs.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "class", rename = "NewElementRequestBody", rename_all = "camelCase")]
pub struct NewElementRequest<P> {
    #[serde(rename = "externalSourceGUID", skip_serializing_if = "Option::is_none")]
    pub external_source_guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_source_name: Option<String>,
    #[serde(rename = "anchorGUID", skip_serializing_if = "Option::is_none")]
    pub anchor_guid: Option<String>,
    pub is_own_anchor: bool,
    #[serde(rename = "anchorScopeGUID", skip_serializing_if = "Option::is_none")]
    pub anchor_scope_guid: Option<String>,
    #[serde(rename = "parentGUID", skip_serializing_if = "Option::is_none")]
    pub parent_guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_relationship_type_name: Option<String>,
    #[serde(rename = "parentAtEnd1", skip_serializing_if = "Option::is_none")]
    pub parent_at_end1: Option<bool>,
    pub properties: P,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_status: Option<ElementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<DateTime<Utc>>,
}

impl<P> NewElementRequest<P> {
    /// A stand-alone element that anchors itself.
    pub fn new(properties: P) -> Self {
        Self {
            external_source_guid: None,
            external_source_name: None,
            anchor_guid: None,
            is_own_anchor: true,
            anchor_scope_guid: None,
            parent_guid: None,
            parent_relationship_type_name: None,
            parent_at_end1: None,
            properties,
            initial_status: None,
            effective_time: None,
        }
    }

    /// Attach the new element to `parent_guid` through `relationship`.
    pub fn with_parent(mut self, parent_guid: impl Into<String>, relationship: impl Into<String>, parent_at_end1: bool) -> Self {
        self.parent_guid = Some(parent_guid.into());
        self.parent_relationship_type_name = Some(relationship.into());
        self.parent_at_end1 = Some(parent_at_end1);
        self
    }

    /// Anchor the new element to another element instead of itself.
    pub fn anchored_to(mut self, anchor_guid: impl Into<String>) -> Self {
        self.anchor_guid = Some(anchor_guid.into());
        self.is_own_anchor = false;
        self
    }

    pub fn with_status(mut self, status: ElementStatus) -> Self {
        self.initial_status = Some(status);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "class", rename = "UpdateElementRequestBody", rename_all = "camelCase")]
pub struct UpdateElementRequest<P> {
    /// `true` overlays the given properties; `false` replaces them all.
    pub merge_update: bool,
    pub properties: P,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<DateTime<Utc>>,
}

impl<P> UpdateElementRequest<P> {
    pub fn merge(properties: P) -> Self {
        Self { merge_update: true, properties, effective_time: None }
    }

    pub fn replace(properties: P) -> Self {
        Self { merge_update: false, properties, effective_time: None }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "DeleteRequestBody", rename_all = "camelCase")]
pub struct DeleteRequest {
    pub cascaded_delete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<DateTime<Utc>>,
}

impl DeleteRequest {
    pub fn cascaded() -> Self {
        Self { cascaded_delete: true, effective_time: None }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "class", rename = "UpdateStatusRequestBody", rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub new_status: ElementStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<DateTime<Utc>>,
}

// ── Relationship bodies ──────────────────────────────────────────────────────

/// Body for attaching two elements. Relationship properties are passed
/// through untouched, class key included.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "NewRelationshipRequestBody", rename_all = "camelCase")]
pub struct NewRelationshipRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<DateTime<Utc>>,
}

impl NewRelationshipRequest {
    pub fn with_properties(properties: Value) -> Self {
        Self { properties: Some(properties), effective_time: None }
    }
}

// ── Query bodies ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "SearchStringRequestBody", rename_all = "camelCase")]
pub struct SearchStringRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub limit_results_by_status: Vec<ElementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequencing_order: Option<SequencingOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequencing_property: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "FilterRequestBody", rename_all = "camelCase")]
pub struct FilterRequest {
    pub filter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub limit_results_by_status: Vec<ElementStatus>,
}

impl FilterRequest {
    pub fn new(filter: impl Into<String>) -> Self {
        Self { filter: filter.into(), ..Default::default() }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "GetRequestBody", rename_all = "camelCase")]
pub struct GetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of_time: Option<DateTime<Utc>>,
}

// ── Paging / search options ──────────────────────────────────────────────────

/// Paging window. A `page_size` of `0` falls back to the client default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOptions {
    pub start_from: u32,
    pub page_size: u32,
}

impl PageOptions {
    pub fn new(start_from: u32, page_size: u32) -> Self {
        Self { start_from, page_size }
    }

    pub(crate) fn query(&self, default_page_size: u32) -> Vec<(&'static str, String)> {
        let page_size = if self.page_size == 0 { default_page_size } else { self.page_size };
        vec![
            ("startFrom", self.start_from.to_string()),
            ("pageSize", page_size.to_string()),
        ]
    }
}

/// Options for `.../by-search-string` queries.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub search_string: Option<String>,
    pub starts_with: bool,
    pub ends_with: bool,
    pub ignore_case: bool,
    pub page: PageOptions,
    pub effective_time: Option<DateTime<Utc>>,
    pub as_of_time: Option<DateTime<Utc>>,
    pub limit_results_by_status: Vec<ElementStatus>,
    pub sequencing_order: Option<SequencingOrder>,
    pub sequencing_property: Option<String>,
}

impl SearchOptions {
    /// Search for `search`, starting-with, case-insensitive.
    /// `"*"` or an empty string matches everything.
    pub fn new(search: &str) -> Self {
        Self {
            search_string: normalize_search_string(Some(search)),
            starts_with: true,
            ignore_case: true,
            ..Default::default()
        }
    }

    pub fn all() -> Self {
        Self::new("*")
    }

    pub fn page(mut self, start_from: u32, page_size: u32) -> Self {
        self.page = PageOptions::new(start_from, page_size);
        self
    }

    pub(crate) fn query(&self, default_page_size: u32) -> Vec<(&'static str, String)> {
        let mut query = self.page.query(default_page_size);
        query.push(("startsWith", self.starts_with.to_string()));
        query.push(("endsWith", self.ends_with.to_string()));
        query.push(("ignoreCase", self.ignore_case.to_string()));
        query
    }

    pub(crate) fn body(&self) -> SearchStringRequest {
        SearchStringRequest {
            search_string: normalize_search_string(self.search_string.as_deref()),
            effective_time: self.effective_time,
            as_of_time: self.as_of_time,
            limit_results_by_status: self.limit_results_by_status.clone(),
            sequencing_order: self.sequencing_order,
            sequencing_property: self.sequencing_property.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[derive(Debug, Clone, Serialize)]
    #[serde(tag = "class", rename = "TestProperties", rename_all = "camelCase")]
    struct TestProperties {
        qualified_name: String,
    }

    fn props() -> TestProperties {
        TestProperties { qualified_name: "Test::One".into() }
    }

    #[test]
    fn new_element_minimal() {
        let body = serde_json::to_value(NewElementRequest::new(props())).unwrap();
        assert_eq!(
            body,
            json!({
                "class": "NewElementRequestBody",
                "isOwnAnchor": true,
                "properties": {"class": "TestProperties", "qualifiedName": "Test::One"}
            })
        );
    }

    #[test]
    fn new_element_with_parent_and_anchor() {
        let req = NewElementRequest::new(props())
            .anchored_to("anchor-1")
            .with_parent("parent-1", "CollectionMembership", true)
            .with_status(ElementStatus::Active);
        let body = serde_json::to_value(req).unwrap();
        assert_eq!(body["anchorGUID"], "anchor-1");
        assert_eq!(body["isOwnAnchor"], false);
        assert_eq!(body["parentGUID"], "parent-1");
        assert_eq!(body["parentRelationshipTypeName"], "CollectionMembership");
        assert_eq!(body["parentAtEnd1"], true);
        assert_eq!(body["initialStatus"], "ACTIVE");
    }

    #[test]
    fn update_and_delete_bodies() {
        let body = serde_json::to_value(UpdateElementRequest::merge(props())).unwrap();
        assert_eq!(body["class"], "UpdateElementRequestBody");
        assert_eq!(body["mergeUpdate"], true);
        assert_eq!(serde_json::to_value(UpdateElementRequest::replace(props())).unwrap()["mergeUpdate"], false);

        let body = serde_json::to_value(DeleteRequest::cascaded()).unwrap();
        assert_eq!(body, json!({"class": "DeleteRequestBody", "cascadedDelete": true}));
    }

    #[test]
    fn effective_time_is_rfc3339() {
        let req = GetRequest {
            effective_time: Some(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()),
            as_of_time: None,
        };
        let body = serde_json::to_value(req).unwrap();
        assert_eq!(body["class"], "GetRequestBody");
        assert_eq!(body["effectiveTime"], "2025-03-01T12:00:00Z");
        assert!(body.get("asOfTime").is_none());
    }

    #[test]
    fn status_update_body() {
        let body = serde_json::to_value(UpdateStatusRequest {
            new_status: ElementStatus::ApprovedForDeployment,
            effective_time: None,
        })
        .unwrap();
        assert_eq!(body, json!({"class": "UpdateStatusRequestBody", "newStatus": "APPROVED_FOR_DEPLOYMENT"}));
    }

    #[test]
    fn status_parses_loosely() {
        assert_eq!("active".parse::<ElementStatus>().unwrap(), ElementStatus::Active);
        assert_eq!("under-development".parse::<ElementStatus>().unwrap(), ElementStatus::UnderDevelopment);
        assert!("retired".parse::<ElementStatus>().is_err());
    }

    #[test]
    fn relationship_body_passes_properties() {
        let body = serde_json::to_value(NewRelationshipRequest::with_properties(
            json!({"class": "PeerLocationProperties", "label": "neighbour"}),
        ))
        .unwrap();
        assert_eq!(body["class"], "NewRelationshipRequestBody");
        assert_eq!(body["properties"]["label"], "neighbour");

        let empty = serde_json::to_value(NewRelationshipRequest::default()).unwrap();
        assert_eq!(empty, json!({"class": "NewRelationshipRequestBody"}));
    }

    #[test]
    fn search_body_carries_status_filter_and_sequencing() {
        let options = SearchOptions {
            limit_results_by_status: vec![ElementStatus::Active, ElementStatus::Draft],
            sequencing_order: Some(SequencingOrder::PropertyAscending),
            sequencing_property: Some("qualifiedName".into()),
            ..SearchOptions::new("Sales")
        };
        let body = serde_json::to_value(options.body()).unwrap();
        assert_eq!(
            body,
            json!({
                "class": "SearchStringRequestBody",
                "searchString": "Sales",
                "limitResultsByStatus": ["ACTIVE", "DRAFT"],
                "sequencingOrder": "PROPERTY_ASCENDING",
                "sequencingProperty": "qualifiedName"
            })
        );
    }

    #[test]
    fn wildcard_search_omits_search_string() {
        let body = serde_json::to_value(SearchOptions::all().body()).unwrap();
        assert_eq!(body, json!({"class": "SearchStringRequestBody"}));

        let body = serde_json::to_value(SearchOptions::new("Coco").body()).unwrap();
        assert_eq!(body["searchString"], "Coco");
    }

    #[test]
    fn search_query_parameters() {
        let query = SearchOptions::new("x").page(20, 0).query(50);
        assert_eq!(
            query,
            vec![
                ("startFrom", "20".to_string()),
                ("pageSize", "50".to_string()),
                ("startsWith", "true".to_string()),
                ("endsWith", "false".to_string()),
                ("ignoreCase", "true".to_string()),
            ]
        );
        assert_eq!(PageOptions::new(0, 10).query(50)[1], ("pageSize", "10".to_string()));
    }

    #[test]
    fn filter_body() {
        let body = serde_json::to_value(FilterRequest::new("Amsterdam")).unwrap();
        assert_eq!(body, json!({"class": "FilterRequestBody", "filter": "Amsterdam"}));
    }
}
