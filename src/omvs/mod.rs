//! Open Metadata View Services.
//!
//! Each OMVS lives under `{platform}/servers/{view}/api/open-metadata/{marker}`
//! and follows the same endpoint grammar:
//!
//! ```text
//! POST {collection}                                   create       -> guid
//! POST {collection}/{guid}/update                     update
//! POST {collection}/{guid}/delete                     delete
//! POST {collection}/{guid}/retrieve                   get by guid  -> element
//! POST {collection}/by-search-string                  find         -> elements
//! POST {collection}/by-name                           by name      -> elements
//! POST {collection}/{guid1}/{relationship}/{guid2}/attach|detach
//! ```
//!
//! [`ViewService`] implements that grammar once; the managers name the
//! collections and relationships of their domain.

pub mod actor_manager;
pub mod community_matters;
pub mod digital_business;
pub mod feedback_manager;
pub mod location_arena;
pub mod product_manager;

use reqwest::Url;
use serde::Serialize;
use serde_json::Value;

use crate::client::body::{DeleteRequest, FilterRequest, GetRequest, NewRelationshipRequest, PageOptions, SearchOptions};
use crate::client::response::{element_from, elements_from, guid_from};
use crate::client::validate::{validate_guid, validate_name};
use crate::client::{ServerClient, with_query};
use crate::core::error::Result;

/// One view service: a client plus its URL marker.
#[derive(Debug, Clone)]
pub struct ViewService {
    client: ServerClient,
    marker: &'static str,
}

impl ViewService {
    pub fn new(client: ServerClient, marker: &'static str) -> Self {
        Self { client, marker }
    }

    pub fn client(&self) -> &ServerClient {
        &self.client
    }

    pub fn marker(&self) -> &'static str {
        self.marker
    }

    pub fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
        Ok(with_query(self.client.view_service_url(self.marker, segments)?, query))
    }

    /// POST `body` and return the checked JSON response.
    pub async fn post<B>(&self, segments: &[&str], query: &[(&str, String)], body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(segments, query)?;
        self.client.post(url, body).await
    }

    /// POST expecting a `GUIDResponse`.
    pub async fn post_for_guid<B>(&self, segments: &[&str], query: &[(&str, String)], body: &B) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let json = self.post(segments, query, body).await?;
        guid_from(&json)
    }

    /// POST expecting a `VoidResponse`.
    pub async fn post_void<B>(&self, segments: &[&str], query: &[(&str, String)], body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.post(segments, query, body).await.map(|_| ())
    }

    /// POST expecting a list of elements, paged by query parameters.
    pub async fn list<B>(&self, segments: &[&str], page: PageOptions, body: &B) -> Result<Vec<Value>>
    where
        B: Serialize + ?Sized,
    {
        let query = page.query(self.client.page_size());
        let json = self.post(segments, &query, body).await?;
        Ok(elements_from(json))
    }

    // ── Collection grammar ────────────────────────────────────────────────

    pub async fn create_element<B>(&self, collection: &str, body: &B) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        self.post_for_guid(&[collection], &[], body).await
    }

    pub async fn update_element<B>(&self, collection: &str, guid: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        validate_guid("guid", guid)?;
        self.post_void(&[collection, guid, "update"], &[], body).await
    }

    pub async fn delete_element(&self, collection: &str, guid: &str, request: &DeleteRequest) -> Result<()> {
        validate_guid("guid", guid)?;
        self.post_void(&[collection, guid, "delete"], &[], request).await
    }

    /// `None` when the server answers without an element.
    pub async fn get_element(&self, collection: &str, guid: &str, request: &GetRequest) -> Result<Option<Value>> {
        validate_guid("guid", guid)?;
        let json = self.post(&[collection, guid, "retrieve"], &[], request).await?;
        Ok(element_from(json))
    }

    pub async fn find_elements(&self, collection: &str, options: &SearchOptions) -> Result<Vec<Value>> {
        let query = options.query(self.client.page_size());
        let json = self.post(&[collection, "by-search-string"], &query, &options.body()).await?;
        Ok(elements_from(json))
    }

    pub async fn elements_by_name(&self, collection: &str, name: &str, page: PageOptions) -> Result<Vec<Value>> {
        validate_name("name", name)?;
        self.list(&[collection, "by-name"], page, &FilterRequest::new(name.trim())).await
    }

    pub async fn attach(
        &self,
        collection: &str,
        guid1: &str,
        relationship: &str,
        guid2: &str,
        request: &NewRelationshipRequest,
    ) -> Result<()> {
        validate_guid("guid1", guid1)?;
        validate_guid("guid2", guid2)?;
        self.post_void(&[collection, guid1, relationship, guid2, "attach"], &[], request).await
    }

    pub async fn detach(
        &self,
        collection: &str,
        guid1: &str,
        relationship: &str,
        guid2: &str,
        request: &DeleteRequest,
    ) -> Result<()> {
        validate_guid("guid1", guid1)?;
        validate_guid("guid2", guid2)?;
        self.post_void(&[collection, guid1, relationship, guid2, "detach"], &[], request).await
    }
}
