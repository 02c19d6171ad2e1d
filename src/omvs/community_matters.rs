//! Community Matters OMVS.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::client::ServerClient;
use crate::client::body::{DeleteRequest, GetRequest, NewElementRequest, PageOptions, SearchOptions, UpdateElementRequest};
use crate::core::error::Result;

use super::ViewService;

const URL_MARKER: &str = "community-matters";
const COMMUNITIES: &str = "communities";

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "CommunityProperties", rename_all = "camelCase")]
pub struct CommunityProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
}

impl CommunityProperties {
    pub fn named(client: &ServerClient, display_name: &str) -> Result<Self> {
        Ok(Self {
            qualified_name: client.qualified_name("Community", display_name, None)?,
            display_name: Some(display_name.trim().to_string()),
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone)]
pub struct CommunityMatters {
    view: ViewService,
}

impl CommunityMatters {
    pub fn new(client: ServerClient) -> Self {
        Self { view: ViewService::new(client, URL_MARKER) }
    }

    pub fn client(&self) -> &ServerClient {
        self.view.client()
    }

    pub async fn create_community(&self, request: &NewElementRequest<CommunityProperties>) -> Result<String> {
        self.view.create_element(COMMUNITIES, request).await
    }

    pub async fn create_community_with_body(&self, body: &Value) -> Result<String> {
        self.view.create_element(COMMUNITIES, body).await
    }

    pub async fn update_community(&self, community_guid: &str, request: &UpdateElementRequest<CommunityProperties>) -> Result<()> {
        self.view.update_element(COMMUNITIES, community_guid, request).await
    }

    pub async fn delete_community(&self, community_guid: &str, request: &DeleteRequest) -> Result<()> {
        self.view.delete_element(COMMUNITIES, community_guid, request).await
    }

    pub async fn find_communities(&self, options: &SearchOptions) -> Result<Vec<Value>> {
        self.view.find_elements(COMMUNITIES, options).await
    }

    pub async fn get_communities_by_name(&self, name: &str, page: PageOptions) -> Result<Vec<Value>> {
        self.view.elements_by_name(COMMUNITIES, name, page).await
    }

    pub async fn get_community_by_guid(&self, community_guid: &str) -> Result<Option<Value>> {
        self.view.get_element(COMMUNITIES, community_guid, &GetRequest::default()).await
    }
}
