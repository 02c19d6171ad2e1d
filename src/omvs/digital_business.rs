//! Digital Business OMVS: business capabilities, the dependencies between
//! them and the digital resources that support them.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::client::ServerClient;
use crate::client::body::{DeleteRequest, GetRequest, NewElementRequest, NewRelationshipRequest, PageOptions, SearchOptions, UpdateElementRequest};
use crate::core::error::Result;

use super::ViewService;

const URL_MARKER: &str = "digital-business";
const CAPABILITIES: &str = "business-capabilities";

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "BusinessCapabilityProperties", rename_all = "camelCase")]
pub struct BusinessCapabilityProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Free-text classification, e.g. `BUSINESS_SERVICE` or `BUSINESS_AREA`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_capability_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
}

impl BusinessCapabilityProperties {
    pub fn named(client: &ServerClient, display_name: &str) -> Result<Self> {
        Ok(Self {
            qualified_name: client.qualified_name("BusinessCapability", display_name, None)?,
            display_name: Some(display_name.trim().to_string()),
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone)]
pub struct DigitalBusiness {
    view: ViewService,
}

impl DigitalBusiness {
    pub fn new(client: ServerClient) -> Self {
        Self { view: ViewService::new(client, URL_MARKER) }
    }

    pub fn client(&self) -> &ServerClient {
        self.view.client()
    }

    pub async fn create_business_capability(&self, request: &NewElementRequest<BusinessCapabilityProperties>) -> Result<String> {
        self.view.create_element(CAPABILITIES, request).await
    }

    pub async fn create_business_capability_with_body(&self, body: &Value) -> Result<String> {
        self.view.create_element(CAPABILITIES, body).await
    }

    pub async fn update_business_capability(
        &self,
        capability_guid: &str,
        request: &UpdateElementRequest<BusinessCapabilityProperties>,
    ) -> Result<()> {
        self.view.update_element(CAPABILITIES, capability_guid, request).await
    }

    pub async fn delete_business_capability(&self, capability_guid: &str, request: &DeleteRequest) -> Result<()> {
        self.view.delete_element(CAPABILITIES, capability_guid, request).await
    }

    pub async fn find_business_capabilities(&self, options: &SearchOptions) -> Result<Vec<Value>> {
        self.view.find_elements(CAPABILITIES, options).await
    }

    pub async fn get_business_capabilities_by_name(&self, name: &str, page: PageOptions) -> Result<Vec<Value>> {
        self.view.elements_by_name(CAPABILITIES, name, page).await
    }

    pub async fn get_business_capability_by_guid(&self, capability_guid: &str) -> Result<Option<Value>> {
        self.view.get_element(CAPABILITIES, capability_guid, &GetRequest::default()).await
    }

    /// `capability_guid` depends on `supporting_capability_guid`.
    pub async fn link_business_capability_dependency(
        &self,
        capability_guid: &str,
        supporting_capability_guid: &str,
        request: &NewRelationshipRequest,
    ) -> Result<()> {
        self.view
            .attach(CAPABILITIES, capability_guid, "dependencies", supporting_capability_guid, request)
            .await
    }

    pub async fn detach_business_capability_dependency(&self, capability_guid: &str, supporting_capability_guid: &str) -> Result<()> {
        self.view
            .detach(CAPABILITIES, capability_guid, "dependencies", supporting_capability_guid, &DeleteRequest::default())
            .await
    }

    /// Record that a digital resource (application, process, data set...)
    /// supports the capability.
    pub async fn link_digital_support(&self, capability_guid: &str, element_guid: &str, request: &NewRelationshipRequest) -> Result<()> {
        self.view
            .attach(CAPABILITIES, capability_guid, "digital-support", element_guid, request)
            .await
    }

    pub async fn detach_digital_support(&self, capability_guid: &str, element_guid: &str) -> Result<()> {
        self.view
            .detach(CAPABILITIES, capability_guid, "digital-support", element_guid, &DeleteRequest::default())
            .await
    }
}
