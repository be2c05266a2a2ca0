//! Query and transport behavior against a mocked API.

use autotask_api::{
    AutotaskClient, AutotaskError, Credentials, Payload, Query, Record, Role, Ticket,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> Credentials {
    Credentials::new("unused.invalid", "api@example.com", "hunter2", "CODE")
}

fn client_for(server: &MockServer) -> AutotaskClient {
    AutotaskClient::with_base_url(&credentials(), &server.uri()).unwrap()
}

const ACTIVE_SEARCH: &str = r#"{"filter":[{"op":"eq","field":"isActive","value":"1"}]}"#;

#[tokio::test]
async fn test_read_returns_single_entity_unmodified() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/Widgets/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client.read("Widgets/7").await.unwrap();
    assert_eq!(
        payload,
        Payload::Entity(Record::from_value(json!({"id": 7})).unwrap())
    );
}

#[tokio::test]
async fn test_credential_headers_sent_on_every_request() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/Roles/query"))
        .and(header("ApiIntegrationCode", "CODE"))
        .and(header("UserName", "api@example.com"))
        .and(header("Secret", "hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let roles = Role::query_active(&client).await.unwrap();
    assert!(roles.is_empty());
}

#[tokio::test]
async fn test_query_active_sends_implicit_is_active_filter() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/Roles/query"))
        .and(query_param("search", ACTIVE_SEARCH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 1, "name": "Engineer"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let roles = Role::query_active(&client).await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].get_str("name"), Some("Engineer"));
}

#[tokio::test]
async fn test_pagination_merges_items_in_fetch_order() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let next = format!("{}/next-page", server.uri());
    Mock::given(method("GET"))
        .and(path("/Roles/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 1}, {"id": 2}],
            "pageDetails": {"nextPageUrl": next}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/next-page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 3}, {"id": 4}],
            "pageDetails": {"nextPageUrl": null}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let roles = Role::query_active(&client).await.unwrap();
    let ids: Vec<i64> = roles.iter().filter_map(Record::id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_single_page_returned_unchanged() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/Roles/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 9}],
            "pageDetails": {"count": 1}
        })))
        .mount(&server)
        .await;

    let roles = Role::query_active(&client).await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].id(), Some(9));
}

#[tokio::test]
async fn test_errors_key_raises_api_error_with_payload() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/Roles/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errors": ["x"]})))
        .mount(&server)
        .await;

    let err = Role::query_active(&client).await.unwrap_err();
    match err {
        AutotaskError::Api {
            errors,
            status_code,
        } => {
            assert_eq!(errors, vec![json!("x")]);
            assert_eq!(status_code, Some(200));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_errors_key_wins_over_http_status() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/Roles/query"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"errors": [{"message": "bad filter"}]})),
        )
        .mount(&server)
        .await;

    let err = Role::query_active(&client).await.unwrap_err();
    assert!(matches!(
        err,
        AutotaskError::Api {
            status_code: Some(400),
            ..
        }
    ));
}

#[tokio::test]
async fn test_transient_server_error_is_retried_for_reads() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    // First attempt fails, retry succeeds.
    Mock::given(method("GET"))
        .and(path("/Roles/query"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Roles/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"id": 1}]})))
        .expect(1)
        .mount(&server)
        .await;

    let roles = Role::query_active(&client).await.unwrap();
    assert_eq!(roles.len(), 1);
}

#[tokio::test]
async fn test_creates_are_never_retried() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/Tickets"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/Tickets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"itemId": 1})))
        .expect(0)
        .mount(&server)
        .await;

    let mut params = Record::new();
    params.insert("title", "once only");
    let err = Ticket::add(&client, &params).await.unwrap_err();
    assert!(matches!(err, AutotaskError::Http(_)));
}

#[tokio::test]
async fn test_field_info_unwraps_fields_envelope() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/Tickets/entityInformation/fields"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fields": [
                {"name": "issueType", "isPickList": true},
                {"name": "title", "isPickList": false}
            ]
        })))
        .mount(&server)
        .await;

    let fields = Ticket::field_info(&client).await.unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].get_str("name"), Some("issueType"));
}

#[tokio::test]
async fn test_query_without_items_is_rejected() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/Roles/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let err = Role::query_active(&client).await.unwrap_err();
    assert!(matches!(err, AutotaskError::UnexpectedResponse(_)));
}
