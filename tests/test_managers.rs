//! Integration tests for the element managers: URLs, query strings and
//! request bodies as they reach the platform, and how responses come back.
//!
//! Run with:
//!   cargo test --test test_managers

mod common;

use serde_json::json;

use common::{StubServer, element, element_response, elements_response, guid_response, view_path, void_response};
use egeria_client::omvs::actor_manager::{ActorManager, ActorProfileProperties};
use egeria_client::omvs::community_matters::{CommunityMatters, CommunityProperties};
use egeria_client::omvs::digital_business::{BusinessCapabilityProperties, DigitalBusiness};
use egeria_client::omvs::location_arena::{LocationArena, LocationProperties};
use egeria_client::omvs::product_manager::{DigitalProductProperties, ProductManager};
use egeria_client::{
    Config, DeleteRequest, EgeriaError, ElementStatus, NewElementRequest, NewRelationshipRequest, PageOptions, SearchOptions,
    ServerClient, UpdateElementRequest,
};

// ── Location Arena ────────────────────────────────────────────────────────────

#[tokio::test]
async fn location_create_posts_typed_body() {
    let stub = StubServer::json(vec![guid_response("loc-1")]);
    let arena = LocationArena::new(stub.client());

    let props = LocationProperties::new("Location::Amsterdam", "Amsterdam");
    let guid = arena.create_location(&NewElementRequest::new(props)).await.unwrap();
    let requests = stub.finish();

    assert_eq!(guid, "loc-1");
    let req = &requests[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.path(), format!("{}/locations", view_path("location-arena")));
    assert_eq!(
        req.json(),
        json!({
            "class": "NewElementRequestBody",
            "isOwnAnchor": true,
            "properties": {
                "class": "LocationProperties",
                "qualifiedName": "Location::Amsterdam",
                "displayName": "Amsterdam"
            }
        })
    );
}

#[tokio::test]
async fn named_properties_carry_local_qualifier() {
    let stub = StubServer::json(vec![guid_response("loc-1"), guid_response("com-1")]);
    let mut config = Config::for_platform(stub.url());
    config.defaults.local_qualifier = Some("Coco".into());
    let client = ServerClient::from_config(&config).unwrap();

    let arena = LocationArena::new(client.clone());
    let props = LocationProperties::named(arena.client(), " Amsterdam HQ ").unwrap();
    arena.create_location(&NewElementRequest::new(props)).await.unwrap();

    let communities = CommunityMatters::new(client);
    let props = CommunityProperties::named(communities.client(), "Data Stewards").unwrap();
    communities.create_community(&NewElementRequest::new(props)).await.unwrap();
    let requests = stub.finish();

    let body = requests[0].json();
    assert_eq!(body["properties"]["qualifiedName"], "Coco::Location::Amsterdam-HQ");
    assert_eq!(body["properties"]["displayName"], "Amsterdam HQ");
    assert_eq!(requests[1].json()["properties"]["qualifiedName"], "Coco::Community::Data-Stewards");
}

#[tokio::test]
async fn location_find_sends_paging_and_search_flags() {
    let stub = StubServer::json(vec![elements_response(vec![
        element("loc-1", "Location::Amsterdam"),
        element("loc-2", "Location::Amstelveen"),
    ])]);
    let arena = LocationArena::new(stub.client());

    let found = arena.find_locations(&SearchOptions::new("Amst").page(10, 25)).await.unwrap();
    let requests = stub.finish();

    assert_eq!(found.len(), 2);
    assert_eq!(found[1]["elementHeader"]["guid"], "loc-2");

    let req = &requests[0];
    assert_eq!(req.path(), format!("{}/locations/by-search-string", view_path("location-arena")));
    assert_eq!(req.query("startFrom").as_deref(), Some("10"));
    assert_eq!(req.query("pageSize").as_deref(), Some("25"));
    assert_eq!(req.query("startsWith").as_deref(), Some("true"));
    assert_eq!(req.query("endsWith").as_deref(), Some("false"));
    assert_eq!(req.query("ignoreCase").as_deref(), Some("true"));
    assert_eq!(req.json(), json!({"class": "SearchStringRequestBody", "searchString": "Amst"}));
}

#[tokio::test]
async fn wildcard_search_omits_search_string() {
    let stub = StubServer::json(vec![json!({"class": "OpenMetadataRootElementsResponse", "relatedHTTPCode": 200})]);
    let arena = LocationArena::new(stub.client());

    let found = arena.find_locations(&SearchOptions::all()).await.unwrap();
    let requests = stub.finish();

    assert!(found.is_empty());
    assert_eq!(requests[0].json(), json!({"class": "SearchStringRequestBody"}));
    assert_eq!(requests[0].query("pageSize").as_deref(), Some("0"));
}

#[tokio::test]
async fn location_relationships_use_attach_and_detach() {
    let stub = StubServer::json(vec![void_response(), void_response(), void_response()]);
    let arena = LocationArena::new(stub.client());

    arena
        .link_nested_location("parent-1", "child-1", &NewRelationshipRequest::default())
        .await
        .unwrap();
    arena.detach_peer_locations("loc-1", "loc-2").await.unwrap();
    arena
        .link_known_location("asset-9", "loc-1", &NewRelationshipRequest::default())
        .await
        .unwrap();
    let requests = stub.finish();

    let base = view_path("location-arena");
    assert_eq!(requests[0].path(), format!("{base}/locations/parent-1/nested-locations/child-1/attach"));
    assert_eq!(requests[0].json(), json!({"class": "NewRelationshipRequestBody"}));
    assert_eq!(requests[1].path(), format!("{base}/locations/loc-1/peer-locations/loc-2/detach"));
    assert_eq!(requests[1].json()["class"], "DeleteRequestBody");
    assert_eq!(requests[2].path(), format!("{base}/elements/asset-9/known-locations/loc-1/attach"));
}

#[tokio::test]
async fn get_by_guid_returns_none_without_element() {
    let stub = StubServer::json(vec![
        element_response(element("loc-1", "Location::Amsterdam")),
        json!({"class": "OpenMetadataRootElementResponse", "relatedHTTPCode": 200}),
    ]);
    let arena = LocationArena::new(stub.client());

    let found = arena.get_location_by_guid("loc-1").await.unwrap().expect("element");
    let missing = arena.get_location_by_guid("loc-2").await.unwrap();
    let requests = stub.finish();

    assert_eq!(found["properties"]["qualifiedName"], "Location::Amsterdam");
    assert!(missing.is_none());
    assert_eq!(requests[0].path(), format!("{}/locations/loc-1/retrieve", view_path("location-arena")));
    assert_eq!(requests[0].json(), json!({"class": "GetRequestBody"}));
}

// ── Community Matters ─────────────────────────────────────────────────────────

#[tokio::test]
async fn community_update_and_delete() {
    let stub = StubServer::json(vec![void_response(), void_response()]);
    let communities = CommunityMatters::new(stub.client());

    let props = CommunityProperties {
        qualified_name: "Community::Data".into(),
        mission: Some("Share data practices".into()),
        ..Default::default()
    };
    communities
        .update_community("com-1", &UpdateElementRequest::merge(props))
        .await
        .unwrap();
    communities
        .delete_community("com-1", &DeleteRequest::cascaded())
        .await
        .unwrap();
    let requests = stub.finish();

    let base = view_path("community-matters");
    assert_eq!(requests[0].path(), format!("{base}/communities/com-1/update"));
    let body = requests[0].json();
    assert_eq!(body["class"], "UpdateElementRequestBody");
    assert_eq!(body["mergeUpdate"], true);
    assert_eq!(body["properties"]["mission"], "Share data practices");
    assert!(body["properties"].get("displayName").is_none());

    assert_eq!(requests[1].path(), format!("{base}/communities/com-1/delete"));
    assert_eq!(requests[1].json(), json!({"class": "DeleteRequestBody", "cascadedDelete": true}));
}

#[tokio::test]
async fn community_by_name_uses_filter_body() {
    let stub = StubServer::json(vec![json!({"relatedHTTPCode": 200, "elementList": [element("com-1", "Community::Data")]})]);
    let communities = CommunityMatters::new(stub.client());

    let found = communities
        .get_communities_by_name(" Community::Data ", PageOptions::new(0, 5))
        .await
        .unwrap();
    let requests = stub.finish();

    assert_eq!(found.len(), 1);
    assert_eq!(requests[0].path(), format!("{}/communities/by-name", view_path("community-matters")));
    assert_eq!(requests[0].json(), json!({"class": "FilterRequestBody", "filter": "Community::Data"}));
    assert_eq!(requests[0].query("pageSize").as_deref(), Some("5"));
}

// ── Digital Business ──────────────────────────────────────────────────────────

#[tokio::test]
async fn business_capability_create_and_dependency() {
    let stub = StubServer::json(vec![guid_response("cap-1"), void_response()]);
    let business = DigitalBusiness::new(stub.client());

    let props = BusinessCapabilityProperties {
        qualified_name: "BusinessCapability::Payments".into(),
        business_capability_type: Some("BUSINESS_SERVICE".into()),
        ..Default::default()
    };
    let request = NewElementRequest::new(props).with_status(ElementStatus::Active);
    assert_eq!(business.create_business_capability(&request).await.unwrap(), "cap-1");

    let rel = NewRelationshipRequest::with_properties(json!({"class": "BusinessCapabilityDependencyProperties", "label": "needs"}));
    business
        .link_business_capability_dependency("cap-1", "cap-2", &rel)
        .await
        .unwrap();
    let requests = stub.finish();

    let base = view_path("digital-business");
    assert_eq!(requests[0].path(), format!("{base}/business-capabilities"));
    assert_eq!(requests[0].json()["initialStatus"], "ACTIVE");
    assert_eq!(requests[0].json()["properties"]["businessCapabilityType"], "BUSINESS_SERVICE");
    assert_eq!(requests[1].path(), format!("{base}/business-capabilities/cap-1/dependencies/cap-2/attach"));
    assert_eq!(requests[1].json()["properties"]["label"], "needs");
}

// ── Product Manager ───────────────────────────────────────────────────────────

#[tokio::test]
async fn product_status_update_and_catalog_membership() {
    let stub = StubServer::json(vec![void_response(), void_response()]);
    let products = ProductManager::new(stub.client());

    products
        .update_digital_product_status("prod-1", ElementStatus::ApprovedForDeployment)
        .await
        .unwrap();
    products.remove_product_from_catalog("cat-1", "prod-1").await.unwrap();
    let requests = stub.finish();

    let base = view_path("product-manager");
    assert_eq!(requests[0].path(), format!("{base}/digital-products/prod-1/update-status"));
    assert_eq!(
        requests[0].json(),
        json!({"class": "UpdateStatusRequestBody", "newStatus": "APPROVED_FOR_DEPLOYMENT"})
    );
    assert_eq!(requests[1].path(), format!("{base}/digital-product-catalogs/cat-1/products/prod-1/detach"));
}

#[tokio::test]
async fn product_dates_serialize_as_rfc3339() {
    use chrono::TimeZone;

    let stub = StubServer::json(vec![guid_response("prod-1")]);
    let products = ProductManager::new(stub.client());

    let props = DigitalProductProperties {
        qualified_name: "DigitalProduct::Sales".into(),
        introduction_date: Some(chrono::Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap()),
        ..Default::default()
    };
    products.create_digital_product(&NewElementRequest::new(props)).await.unwrap();
    let requests = stub.finish();

    let body = requests[0].json();
    assert_eq!(body["properties"]["class"], "DigitalProductProperties");
    assert_eq!(body["properties"]["introductionDate"], "2025-01-31T00:00:00Z");
}

// ── Actor Manager ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn actor_profile_create_with_parent_and_role_appointment() {
    let stub = StubServer::json(vec![guid_response("person-1"), void_response()]);
    let actors = ActorManager::new(stub.client());

    let props = ActorProfileProperties {
        qualified_name: "Person::Erin".into(),
        display_name: Some("Erin Overview".into()),
        type_name: Some("Person".into()),
        ..Default::default()
    };
    let request = NewElementRequest::new(props)
        .anchored_to("org-1")
        .with_parent("org-1", "TeamMembership", true);
    assert_eq!(actors.create_actor_profile(&request).await.unwrap(), "person-1");

    actors
        .link_person_role_appointment("person-1", "role-1", &NewRelationshipRequest::default())
        .await
        .unwrap();
    let requests = stub.finish();

    let base = view_path("actor-manager");
    let body = requests[0].json();
    assert_eq!(requests[0].path(), format!("{base}/actor-profiles"));
    assert_eq!(body["anchorGUID"], "org-1");
    assert_eq!(body["isOwnAnchor"], false);
    assert_eq!(body["parentRelationshipTypeName"], "TeamMembership");
    assert_eq!(body["properties"]["typeName"], "Person");
    assert_eq!(
        requests[1].path(),
        format!("{base}/actor-profiles/person-1/person-role-appointments/role-1/attach")
    );
}

#[tokio::test]
async fn raw_body_create_is_passed_through() {
    let stub = StubServer::json(vec![guid_response("id-1")]);
    let actors = ActorManager::new(stub.client());

    let body = json!({
        "class": "NewElementRequestBody",
        "isOwnAnchor": true,
        "properties": {"class": "UserIdentityProperties", "qualifiedName": "UserIdentity::erin", "userId": "erin"}
    });
    actors.create_user_identity_with_body(&body).await.unwrap();
    let requests = stub.finish();

    assert_eq!(requests[0].path(), format!("{}/user-identities", view_path("actor-manager")));
    assert_eq!(requests[0].json(), body);
}

#[tokio::test]
async fn server_exception_surfaces_from_manager() {
    let stub = StubServer::json(vec![json!({
        "class": "GUIDResponse",
        "relatedHTTPCode": 400,
        "exceptionErrorMessageId": "OMAG-COMMON-400-016",
        "exceptionErrorMessage": "The qualifiedName is not unique"
    })]);
    let actors = ActorManager::new(stub.client());

    let err = actors
        .create_actor_role(&NewElementRequest::new(Default::default()))
        .await
        .unwrap_err();
    stub.finish();

    match err {
        EgeriaError::InvalidParameter { reason, .. } => assert!(reason.contains("OMAG-COMMON-400-016")),
        other => panic!("expected InvalidParameter, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_guid_in_response_is_an_error() {
    let stub = StubServer::json(vec![void_response()]);
    let communities = CommunityMatters::new(stub.client());

    let err = communities
        .create_community(&NewElementRequest::new(CommunityProperties::default()))
        .await
        .unwrap_err();
    stub.finish();
    assert!(matches!(err, EgeriaError::Api(ref r) if r.message.contains("guid")));
}
