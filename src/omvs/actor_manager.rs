//! Actor Manager OMVS: the people, teams and systems that act on metadata,
//! the roles they hold and the user identities they log in with.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::client::ServerClient;
use crate::client::body::{DeleteRequest, GetRequest, NewElementRequest, NewRelationshipRequest, PageOptions, SearchOptions, UpdateElementRequest};
use crate::core::error::Result;

use super::ViewService;

const URL_MARKER: &str = "actor-manager";
const PROFILES: &str = "actor-profiles";
const ROLES: &str = "actor-roles";
const IDENTITIES: &str = "user-identities";

/// Properties of an actor profile. Set `type_name` to `Person`, `Team` or
/// `ITProfile` to create a subtype.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "ActorProfileProperties", rename_all = "camelCase")]
pub struct ActorProfileProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
}

impl ActorProfileProperties {
    /// See [`crate::omvs::location_arena::LocationProperties::named`].
    pub fn named(client: &ServerClient, display_name: &str) -> Result<Self> {
        Ok(Self {
            qualified_name: client.qualified_name("ActorProfile", display_name, None)?,
            display_name: Some(display_name.trim().to_string()),
            ..Default::default()
        })
    }
}

/// Properties of an actor role (`PersonRole`, `TeamLeader`, `TeamMember`...).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "ActorRoleProperties", rename_all = "camelCase")]
pub struct ActorRoleProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_identifier: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
}

impl ActorRoleProperties {
    pub fn named(client: &ServerClient, display_name: &str) -> Result<Self> {
        Ok(Self {
            qualified_name: client.qualified_name("ActorRole", display_name, None)?,
            display_name: Some(display_name.trim().to_string()),
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "UserIdentityProperties", rename_all = "camelCase")]
pub struct UserIdentityProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinguished_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone)]
pub struct ActorManager {
    view: ViewService,
}

impl ActorManager {
    pub fn new(client: ServerClient) -> Self {
        Self { view: ViewService::new(client, URL_MARKER) }
    }

    pub fn client(&self) -> &ServerClient {
        self.view.client()
    }

    // ── Actor profiles ────────────────────────────────────────────────────

    pub async fn create_actor_profile(&self, request: &NewElementRequest<ActorProfileProperties>) -> Result<String> {
        self.view.create_element(PROFILES, request).await
    }

    pub async fn create_actor_profile_with_body(&self, body: &Value) -> Result<String> {
        self.view.create_element(PROFILES, body).await
    }

    pub async fn update_actor_profile(&self, profile_guid: &str, request: &UpdateElementRequest<ActorProfileProperties>) -> Result<()> {
        self.view.update_element(PROFILES, profile_guid, request).await
    }

    pub async fn delete_actor_profile(&self, profile_guid: &str, request: &DeleteRequest) -> Result<()> {
        self.view.delete_element(PROFILES, profile_guid, request).await
    }

    pub async fn find_actor_profiles(&self, options: &SearchOptions) -> Result<Vec<Value>> {
        self.view.find_elements(PROFILES, options).await
    }

    pub async fn get_actor_profiles_by_name(&self, name: &str, page: PageOptions) -> Result<Vec<Value>> {
        self.view.elements_by_name(PROFILES, name, page).await
    }

    pub async fn get_actor_profile_by_guid(&self, profile_guid: &str) -> Result<Option<Value>> {
        self.view.get_element(PROFILES, profile_guid, &GetRequest::default()).await
    }

    // ── Actor roles ───────────────────────────────────────────────────────

    pub async fn create_actor_role(&self, request: &NewElementRequest<ActorRoleProperties>) -> Result<String> {
        self.view.create_element(ROLES, request).await
    }

    pub async fn create_actor_role_with_body(&self, body: &Value) -> Result<String> {
        self.view.create_element(ROLES, body).await
    }

    pub async fn update_actor_role(&self, role_guid: &str, request: &UpdateElementRequest<ActorRoleProperties>) -> Result<()> {
        self.view.update_element(ROLES, role_guid, request).await
    }

    pub async fn delete_actor_role(&self, role_guid: &str, request: &DeleteRequest) -> Result<()> {
        self.view.delete_element(ROLES, role_guid, request).await
    }

    pub async fn find_actor_roles(&self, options: &SearchOptions) -> Result<Vec<Value>> {
        self.view.find_elements(ROLES, options).await
    }

    pub async fn get_actor_roles_by_name(&self, name: &str, page: PageOptions) -> Result<Vec<Value>> {
        self.view.elements_by_name(ROLES, name, page).await
    }

    pub async fn get_actor_role_by_guid(&self, role_guid: &str) -> Result<Option<Value>> {
        self.view.get_element(ROLES, role_guid, &GetRequest::default()).await
    }

    // ── User identities ───────────────────────────────────────────────────

    pub async fn create_user_identity(&self, request: &NewElementRequest<UserIdentityProperties>) -> Result<String> {
        self.view.create_element(IDENTITIES, request).await
    }

    pub async fn create_user_identity_with_body(&self, body: &Value) -> Result<String> {
        self.view.create_element(IDENTITIES, body).await
    }

    pub async fn update_user_identity(&self, identity_guid: &str, request: &UpdateElementRequest<UserIdentityProperties>) -> Result<()> {
        self.view.update_element(IDENTITIES, identity_guid, request).await
    }

    pub async fn delete_user_identity(&self, identity_guid: &str, request: &DeleteRequest) -> Result<()> {
        self.view.delete_element(IDENTITIES, identity_guid, request).await
    }

    pub async fn find_user_identities(&self, options: &SearchOptions) -> Result<Vec<Value>> {
        self.view.find_elements(IDENTITIES, options).await
    }

    pub async fn get_user_identities_by_name(&self, name: &str, page: PageOptions) -> Result<Vec<Value>> {
        self.view.elements_by_name(IDENTITIES, name, page).await
    }

    pub async fn get_user_identity_by_guid(&self, identity_guid: &str) -> Result<Option<Value>> {
        self.view.get_element(IDENTITIES, identity_guid, &GetRequest::default()).await
    }

    // ── Relationships ─────────────────────────────────────────────────────

    /// Appoint a person to a role.
    pub async fn link_person_role_appointment(&self, person_guid: &str, role_guid: &str, request: &NewRelationshipRequest) -> Result<()> {
        self.view
            .attach(PROFILES, person_guid, "person-role-appointments", role_guid, request)
            .await
    }

    pub async fn detach_person_role_appointment(&self, person_guid: &str, role_guid: &str) -> Result<()> {
        self.view
            .detach(PROFILES, person_guid, "person-role-appointments", role_guid, &DeleteRequest::default())
            .await
    }

    /// Associate a user identity with the profile of the actor that uses it.
    pub async fn link_profile_identity(&self, profile_guid: &str, identity_guid: &str, request: &NewRelationshipRequest) -> Result<()> {
        self.view
            .attach(PROFILES, profile_guid, "profile-identity", identity_guid, request)
            .await
    }

    pub async fn detach_profile_identity(&self, profile_guid: &str, identity_guid: &str) -> Result<()> {
        self.view
            .detach(PROFILES, profile_guid, "profile-identity", identity_guid, &DeleteRequest::default())
            .await
    }

    pub async fn link_peer_person(&self, person1_guid: &str, person2_guid: &str, request: &NewRelationshipRequest) -> Result<()> {
        self.view.attach(PROFILES, person1_guid, "peer-persons", person2_guid, request).await
    }

    pub async fn detach_peer_person(&self, person1_guid: &str, person2_guid: &str) -> Result<()> {
        self.view
            .detach(PROFILES, person1_guid, "peer-persons", person2_guid, &DeleteRequest::default())
            .await
    }

    /// Make `sub_team_guid` part of `super_team_guid`.
    pub async fn link_team_structure(&self, super_team_guid: &str, sub_team_guid: &str, request: &NewRelationshipRequest) -> Result<()> {
        self.view
            .attach(PROFILES, super_team_guid, "team-structures", sub_team_guid, request)
            .await
    }

    pub async fn detach_team_structure(&self, super_team_guid: &str, sub_team_guid: &str) -> Result<()> {
        self.view
            .detach(PROFILES, super_team_guid, "team-structures", sub_team_guid, &DeleteRequest::default())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_properties_omit_unset() {
        let props = ActorRoleProperties {
            qualified_name: "PersonRole::Data-Steward".into(),
            head_count: Some(2),
            type_name: Some("PersonRole".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(props).unwrap(),
            json!({
                "class": "ActorRoleProperties",
                "qualifiedName": "PersonRole::Data-Steward",
                "headCount": 2,
                "typeName": "PersonRole"
            })
        );
    }

    #[test]
    fn identity_properties() {
        let props = UserIdentityProperties {
            qualified_name: "UserIdentity::erinoverview".into(),
            user_id: Some("erinoverview".into()),
            ..Default::default()
        };
        let body = serde_json::to_value(props).unwrap();
        assert_eq!(body["class"], "UserIdentityProperties");
        assert_eq!(body["userId"], "erinoverview");
    }
}
