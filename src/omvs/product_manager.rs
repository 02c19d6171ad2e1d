//! Product Manager OMVS: digital products, the catalogs that publish them,
//! their dependencies and the people responsible for them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::client::ServerClient;
use crate::client::body::{
    DeleteRequest, ElementStatus, GetRequest, NewElementRequest, NewRelationshipRequest, PageOptions, SearchOptions,
    UpdateElementRequest, UpdateStatusRequest,
};
use crate::client::validate::validate_guid;
use crate::core::error::Result;

use super::ViewService;

const URL_MARKER: &str = "product-manager";
const PRODUCTS: &str = "digital-products";
const CATALOGS: &str = "digital-product-catalogs";

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "DigitalProductProperties", rename_all = "camelCase")]
pub struct DigitalProductProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_life: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_version_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdraw_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
}

impl DigitalProductProperties {
    /// Named `[qualifier::]DigitalProduct::Display-Name`, using the client's
    /// configured local qualifier.
    pub fn named(client: &ServerClient, display_name: &str) -> Result<Self> {
        Ok(Self {
            qualified_name: client.qualified_name("DigitalProduct", display_name, None)?,
            display_name: Some(display_name.trim().to_string()),
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "DigitalProductCatalogProperties", rename_all = "camelCase")]
pub struct DigitalProductCatalogProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
}

impl DigitalProductCatalogProperties {
    /// See [`crate::omvs::location_arena::LocationProperties::named`].
    pub fn named(client: &ServerClient, display_name: &str) -> Result<Self> {
        Ok(Self {
            qualified_name: client.qualified_name("DigitalProductCatalog", display_name, None)?,
            display_name: Some(display_name.trim().to_string()),
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProductManager {
    view: ViewService,
}

impl ProductManager {
    pub fn new(client: ServerClient) -> Self {
        Self { view: ViewService::new(client, URL_MARKER) }
    }

    pub fn client(&self) -> &ServerClient {
        self.view.client()
    }

    // ── Digital products ──────────────────────────────────────────────────

    pub async fn create_digital_product(&self, request: &NewElementRequest<DigitalProductProperties>) -> Result<String> {
        self.view.create_element(PRODUCTS, request).await
    }

    pub async fn create_digital_product_with_body(&self, body: &Value) -> Result<String> {
        self.view.create_element(PRODUCTS, body).await
    }

    pub async fn update_digital_product(&self, product_guid: &str, request: &UpdateElementRequest<DigitalProductProperties>) -> Result<()> {
        self.view.update_element(PRODUCTS, product_guid, request).await
    }

    pub async fn update_digital_product_status(&self, product_guid: &str, status: ElementStatus) -> Result<()> {
        validate_guid("product_guid", product_guid)?;
        let body = UpdateStatusRequest { new_status: status, effective_time: None };
        self.view.post_void(&[PRODUCTS, product_guid, "update-status"], &[], &body).await
    }

    pub async fn delete_digital_product(&self, product_guid: &str, request: &DeleteRequest) -> Result<()> {
        self.view.delete_element(PRODUCTS, product_guid, request).await
    }

    pub async fn find_digital_products(&self, options: &SearchOptions) -> Result<Vec<Value>> {
        self.view.find_elements(PRODUCTS, options).await
    }

    pub async fn get_digital_products_by_name(&self, name: &str, page: PageOptions) -> Result<Vec<Value>> {
        self.view.elements_by_name(PRODUCTS, name, page).await
    }

    pub async fn get_digital_product_by_guid(&self, product_guid: &str) -> Result<Option<Value>> {
        self.view.get_element(PRODUCTS, product_guid, &GetRequest::default()).await
    }

    /// `consumer_product_guid` depends on `provider_product_guid`.
    pub async fn link_product_dependency(
        &self,
        consumer_product_guid: &str,
        provider_product_guid: &str,
        request: &NewRelationshipRequest,
    ) -> Result<()> {
        self.view
            .attach(PRODUCTS, consumer_product_guid, "product-dependencies", provider_product_guid, request)
            .await
    }

    pub async fn detach_product_dependency(&self, consumer_product_guid: &str, provider_product_guid: &str) -> Result<()> {
        self.view
            .detach(PRODUCTS, consumer_product_guid, "product-dependencies", provider_product_guid, &DeleteRequest::default())
            .await
    }

    pub async fn link_product_manager(&self, product_guid: &str, manager_role_guid: &str, request: &NewRelationshipRequest) -> Result<()> {
        self.view
            .attach(PRODUCTS, product_guid, "product-managers", manager_role_guid, request)
            .await
    }

    pub async fn detach_product_manager(&self, product_guid: &str, manager_role_guid: &str) -> Result<()> {
        self.view
            .detach(PRODUCTS, product_guid, "product-managers", manager_role_guid, &DeleteRequest::default())
            .await
    }

    // ── Catalogs ──────────────────────────────────────────────────────────

    pub async fn create_digital_product_catalog(&self, request: &NewElementRequest<DigitalProductCatalogProperties>) -> Result<String> {
        self.view.create_element(CATALOGS, request).await
    }

    pub async fn update_digital_product_catalog(
        &self,
        catalog_guid: &str,
        request: &UpdateElementRequest<DigitalProductCatalogProperties>,
    ) -> Result<()> {
        self.view.update_element(CATALOGS, catalog_guid, request).await
    }

    pub async fn delete_digital_product_catalog(&self, catalog_guid: &str, request: &DeleteRequest) -> Result<()> {
        self.view.delete_element(CATALOGS, catalog_guid, request).await
    }

    pub async fn find_digital_product_catalogs(&self, options: &SearchOptions) -> Result<Vec<Value>> {
        self.view.find_elements(CATALOGS, options).await
    }

    pub async fn get_digital_product_catalogs_by_name(&self, name: &str, page: PageOptions) -> Result<Vec<Value>> {
        self.view.elements_by_name(CATALOGS, name, page).await
    }

    pub async fn get_digital_product_catalog_by_guid(&self, catalog_guid: &str) -> Result<Option<Value>> {
        self.view.get_element(CATALOGS, catalog_guid, &GetRequest::default()).await
    }

    /// Publish a product in a catalog.
    pub async fn add_product_to_catalog(&self, catalog_guid: &str, product_guid: &str, request: &NewRelationshipRequest) -> Result<()> {
        self.view.attach(CATALOGS, catalog_guid, "products", product_guid, request).await
    }

    pub async fn remove_product_from_catalog(&self, catalog_guid: &str, product_guid: &str) -> Result<()> {
        self.view
            .detach(CATALOGS, catalog_guid, "products", product_guid, &DeleteRequest::default())
            .await
    }
}
