/// Integration tests with a mocked Copper API
/// Exercises both actions end to end over real HTTP without hitting Copper
use copper_actions::auth::CopperAuth;
use copper_actions::copper_client::CopperClient;
use copper_actions::errors::ActionError;
use copper_actions::http::ReqwestInvoker;
use copper_actions::models::{AddressInput, CustomFieldInput, LeadUpdateInput, PersonInput};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to create a client pointing at the mock server
fn create_test_client(base_url: String) -> CopperClient<ReqwestInvoker> {
    let invoker = ReqwestInvoker::new(Duration::from_secs(5)).unwrap();
    CopperClient::new(invoker, CopperAuth::new("test_key", "owner@example.com"))
        .with_base_url(base_url)
}

fn ada() -> PersonInput {
    PersonInput {
        name: "Ada Lovelace".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_person_success() {
    let mock_server = MockServer::start().await;

    let created = json!({"id": 27140359, "name": "Ada Lovelace"});

    Mock::given(method("POST"))
        .and(path("/people"))
        .and(header("X-PW-AccessToken", "test_key"))
        .and(header("X-PW-Application", "developer_api"))
        .and(header("X-PW-UserEmail", "owner@example.com"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "name": "Ada Lovelace",
            "emails": [{"email": "ada@example.com", "category": "work"}],
            "tags": ["math"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&created))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());
    let input = PersonInput {
        email: Some("ada@example.com".to_string()),
        tags: vec!["math".to_string()],
        ..ada()
    };

    let result = client.create_person(&input).await;

    assert_eq!(result.unwrap(), created);
}

#[tokio::test]
async fn test_create_person_bad_request_includes_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/people"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid email"})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());
    let err = client.create_person(&ada()).await.unwrap_err();

    assert_eq!(err.to_string(), r#"Bad request: {"message":"Invalid email"}"#);
}

#[tokio::test]
async fn test_create_person_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/people"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "token revoked at 10:02"})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());
    let err = client.create_person(&ada()).await.unwrap_err();

    assert_eq!(err, ActionError::AuthenticationFailed);
    assert_eq!(
        err.to_string(),
        "Authentication failed. Please check your API key and user email."
    );
}

#[tokio::test]
async fn test_create_person_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/people"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());
    let err = client.create_person(&ada()).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Error creating person: request failed with status code 500"
    );
}

#[tokio::test]
async fn test_create_person_without_name_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());
    let result = client.create_person(&PersonInput::default()).await;

    assert!(matches!(result, Err(ActionError::Validation(_))));
}

#[tokio::test]
async fn test_transport_failure() {
    // Nothing listens on the discard port
    let client = create_test_client("http://127.0.0.1:9".to_string());
    let err = client.create_person(&ada()).await.unwrap_err();

    assert!(err.to_string().starts_with("Error creating person: "));
}

#[tokio::test]
async fn test_update_lead_success() {
    let mock_server = MockServer::start().await;

    let updated = json!({"id": 8982702, "name": "Acme renewal", "status_id": 208231});

    Mock::given(method("PUT"))
        .and(path("/leads/8982702"))
        .and(header("X-PW-AccessToken", "test_key"))
        .and(header("X-PW-Application", "developer_api"))
        .and(header("X-PW-UserEmail", "owner@example.com"))
        .and(body_json(json!({
            "name": "Acme renewal",
            "status_id": 208231,
            "email": null,
            "address": {"street": "Main St"},
            "custom_fields": [{"custom_field_definition_id": 42, "value": "gold"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&updated))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());
    let input = LeadUpdateInput {
        name: Some("Acme renewal".to_string()),
        status_id: Some(208231),
        email: Some("ignored@example.com".to_string()),
        clear_email: true,
        address: AddressInput {
            street: Some("Main St".to_string()),
            ..Default::default()
        },
        custom_fields: vec![
            CustomFieldInput::default(),
            CustomFieldInput::new(42, "gold"),
            CustomFieldInput::default(),
        ],
        ..LeadUpdateInput::new("8982702")
    };

    let result = client.update_lead(&input).await;

    assert_eq!(result.unwrap(), updated);
}

#[tokio::test]
async fn test_update_lead_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/leads/404404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"success": false})))
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());
    let input = LeadUpdateInput {
        title: Some("CTO".to_string()),
        ..LeadUpdateInput::new("404404")
    };

    let err = client.update_lead(&input).await.unwrap_err();

    assert_eq!(err, ActionError::LeadNotFound("404404".to_string()));
    assert!(err.to_string().contains("404404"));
}

#[tokio::test]
async fn test_update_lead_forbidden() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/leads/7"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());
    let input = LeadUpdateInput {
        clear_phone: true,
        ..LeadUpdateInput::new("7")
    };

    let err = client.update_lead(&input).await.unwrap_err();

    assert_eq!(err, ActionError::AccessForbidden);
}

#[tokio::test]
async fn test_update_lead_unmapped_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/leads/7"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());
    let input = LeadUpdateInput {
        details: Some("Met at conference".to_string()),
        ..LeadUpdateInput::new("7")
    };

    let err = client.update_lead(&input).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Error updating lead: request failed with status code 429"
    );
}

#[tokio::test]
async fn test_update_lead_with_no_fields_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());
    let input = LeadUpdateInput {
        name: Some(String::new()),
        email: Some(String::new()),
        address: AddressInput {
            city: Some(String::new()),
            ..Default::default()
        },
        ..LeadUpdateInput::new("8982702")
    };

    let err = client.update_lead(&input).await.unwrap_err();

    assert_eq!(err, ActionError::NoFieldsProvided);
    assert_eq!(
        err.to_string(),
        "No fields provided for update. Please specify at least one field to update."
    );
}

#[tokio::test]
async fn test_concurrent_updates_are_independent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(10)
        .mount(&mock_server)
        .await;

    let client = create_test_client(mock_server.uri());

    let mut handles = vec![];
    for i in 0..10 {
        let client = client.clone();
        let handle = tokio::spawn(async move {
            let input = LeadUpdateInput {
                assignee_id: Some(i),
                ..LeadUpdateInput::new(format!("lead-{}", i))
            };
            client.update_lead(&input).await
        });
        handles.push(handle);
    }

    for handle in handles {
        let result = handle.await.unwrap();
        assert!(result.is_ok());
    }
}
