//! Location Arena OMVS: physical, secure and cyber locations and how they
//! relate to each other and to the elements found at them.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::client::ServerClient;
use crate::client::body::{DeleteRequest, GetRequest, NewElementRequest, NewRelationshipRequest, PageOptions, SearchOptions, UpdateElementRequest};
use crate::core::error::Result;

use super::ViewService;

const URL_MARKER: &str = "location-arena";
const LOCATIONS: &str = "locations";

/// Properties of a `Location` (or a subtype named in `type_name`, such as
/// `FixedLocation` or `CyberLocation`).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "LocationProperties", rename_all = "camelCase")]
pub struct LocationProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_projection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
}

impl LocationProperties {
    /// Named `[qualifier::]Location::Display-Name`, using the client's
    /// configured local qualifier.
    pub fn named(client: &ServerClient, display_name: &str) -> Result<Self> {
        Ok(Self {
            qualified_name: client.qualified_name("Location", display_name, None)?,
            display_name: Some(display_name.trim().to_string()),
            ..Default::default()
        })
    }

    pub fn new(qualified_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            display_name: Some(display_name.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocationArena {
    view: ViewService,
}

impl LocationArena {
    pub fn new(client: ServerClient) -> Self {
        Self { view: ViewService::new(client, URL_MARKER) }
    }

    pub fn client(&self) -> &ServerClient {
        self.view.client()
    }

    pub async fn create_location(&self, request: &NewElementRequest<LocationProperties>) -> Result<String> {
        self.view.create_element(LOCATIONS, request).await
    }

    /// Create from a caller-built `NewElementRequestBody`.
    pub async fn create_location_with_body(&self, body: &Value) -> Result<String> {
        self.view.create_element(LOCATIONS, body).await
    }

    pub async fn update_location(&self, location_guid: &str, request: &UpdateElementRequest<LocationProperties>) -> Result<()> {
        self.view.update_element(LOCATIONS, location_guid, request).await
    }

    pub async fn delete_location(&self, location_guid: &str, request: &DeleteRequest) -> Result<()> {
        self.view.delete_element(LOCATIONS, location_guid, request).await
    }

    pub async fn find_locations(&self, options: &SearchOptions) -> Result<Vec<Value>> {
        self.view.find_elements(LOCATIONS, options).await
    }

    pub async fn get_locations_by_name(&self, name: &str, page: PageOptions) -> Result<Vec<Value>> {
        self.view.elements_by_name(LOCATIONS, name, page).await
    }

    pub async fn get_location_by_guid(&self, location_guid: &str) -> Result<Option<Value>> {
        self.view.get_element(LOCATIONS, location_guid, &GetRequest::default()).await
    }

    // ── Relationships ─────────────────────────────────────────────────────

    pub async fn link_peer_locations(&self, location1_guid: &str, location2_guid: &str, request: &NewRelationshipRequest) -> Result<()> {
        self.view.attach(LOCATIONS, location1_guid, "peer-locations", location2_guid, request).await
    }

    pub async fn detach_peer_locations(&self, location1_guid: &str, location2_guid: &str) -> Result<()> {
        self.view
            .detach(LOCATIONS, location1_guid, "peer-locations", location2_guid, &DeleteRequest::default())
            .await
    }

    /// Make `nested_location_guid` part of `parent_location_guid`.
    pub async fn link_nested_location(&self, parent_location_guid: &str, nested_location_guid: &str, request: &NewRelationshipRequest) -> Result<()> {
        self.view
            .attach(LOCATIONS, parent_location_guid, "nested-locations", nested_location_guid, request)
            .await
    }

    pub async fn detach_nested_location(&self, parent_location_guid: &str, nested_location_guid: &str) -> Result<()> {
        self.view
            .detach(LOCATIONS, parent_location_guid, "nested-locations", nested_location_guid, &DeleteRequest::default())
            .await
    }

    /// Record that the element is known to be found at the location.
    pub async fn link_known_location(&self, element_guid: &str, location_guid: &str, request: &NewRelationshipRequest) -> Result<()> {
        self.view.attach("elements", element_guid, "known-locations", location_guid, request).await
    }

    pub async fn detach_known_location(&self, element_guid: &str, location_guid: &str) -> Result<()> {
        self.view
            .detach("elements", element_guid, "known-locations", location_guid, &DeleteRequest::default())
            .await
    }
}
