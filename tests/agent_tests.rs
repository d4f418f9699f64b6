//! Integration tests for the agent service.

use freshservice::resources::{AgentDetails, AgentListFilter, AgentRole, AgentState, ResourceError};
use freshservice::{ApiKey, Client, FreshserviceConfig, FreshserviceDomain, HostUrl};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(server: &MockServer) -> Client {
    let config = FreshserviceConfig::builder()
        .domain(FreshserviceDomain::new("acme").unwrap())
        .api_key(ApiKey::new("test-api-key").unwrap())
        .api_host(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();

    Client::new(&config).unwrap()
}

fn agent_fixture(id: u64, active: bool) -> serde_json::Value {
    json!({
        "id": id,
        "first_name": "Sam",
        "last_name": "Ops",
        "occasional": false,
        "email": "sam@example.com",
        "department_ids": [3],
        "member_of": [9],
        "roles": [{"role_id": 1, "assignment_scope": "entire_helpdesk", "groups": []}],
        "time_format": "24h",
        "active": active,
        "last_login_at": "2024-03-01T08:00:00Z",
        "created_at": "2023-06-01T00:00:00Z",
        "updated_at": "2024-03-01T08:00:00Z"
    })
}

#[tokio::test]
async fn test_list_with_state_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/agents"))
        .and(query_param("state", "occasional"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "agents": [agent_fixture(1, true), agent_fixture(2, true)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let filter = AgentListFilter {
        state: Some(AgentState::Occasional),
        ..Default::default()
    };
    let (agents, next) = client.agents().list(Some(&filter)).await.unwrap();

    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0].member_of, Some(vec![9]));
    assert!(next.is_none());
}

#[tokio::test]
async fn test_create_validates_role_scope() {
    let server = MockServer::start().await;
    let client = create_client(&server);

    let details = AgentDetails {
        email: Some("new@example.com".to_string()),
        roles: Some(vec![AgentRole {
            role_id: 1,
            assignment_scope: "galaxy".to_string(),
            groups: None,
        }]),
        ..Default::default()
    };
    let result = client.agents().create(&details).await;

    assert!(matches!(result, Err(ResourceError::Validation(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_and_get() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/agents"))
        .and(body_json(json!({
            "first_name": "Sam",
            "email": "sam@example.com",
            "roles": [{"role_id": 1, "assignment_scope": "entire_helpdesk"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"agent": agent_fixture(12, true)})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/agents/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"agent": agent_fixture(12, true)})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let details = AgentDetails {
        first_name: Some("Sam".to_string()),
        email: Some("sam@example.com".to_string()),
        roles: Some(vec![AgentRole {
            role_id: 1,
            assignment_scope: "entire_helpdesk".to_string(),
            groups: None,
        }]),
        ..Default::default()
    };
    let created = client.agents().create(&details).await.unwrap();
    assert_eq!(created.id, Some(12));

    let fetched = client.agents().get(12).await.unwrap();
    assert_eq!(fetched.email.as_deref(), Some("sam@example.com"));
    assert!(fetched.last_login_at.is_some());
}

#[tokio::test]
async fn test_lifecycle_actions() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/agents/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"agent": agent_fixture(12, false)})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v2/agents/12/reactivate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"agent": agent_fixture(12, true)})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v2/agents/12/convert_to_requester"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"agent": agent_fixture(12, false)})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/agents/12/forget"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let agents = client.agents();

    assert_eq!(agents.deactivate(12).await.unwrap().active, Some(false));
    assert_eq!(agents.reactivate(12).await.unwrap().active, Some(true));
    assert_eq!(agents.convert_to_requester(12).await.unwrap().id, Some(12));
    agents.delete(12).await.unwrap();
}
