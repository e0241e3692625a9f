//! REST integration tests against a mock service

use amino_client::http::HttpClientConfig;
use amino_client::{
    ApiErrorKind, Client, ClientConfig, DeviceIdentity, DeviceSource, Error, HmacSigner,
    OutgoingMessage, Sorting, Target,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client(server: &MockServer) -> Client {
    let config = ClientConfig::new()
        .with_http(HttpClientConfig::new(server.uri()))
        .with_device(DeviceSource::Fixed(DeviceIdentity::new("DEV", "SIG", "UA")))
        .with_signer(Arc::new(HmacSigner::new(b"test-key").unwrap()))
        .with_socket_on_login(false);
    Client::new(config).await.unwrap()
}

async fn logged_in_client(server: &MockServer) -> Client {
    Mock::given(method("POST"))
        .and(path("/g/s/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sid": "SID",
            "account": {"uid": "u-1"},
            "userProfile": {"uid": "u-1", "nickname": "ferris"}
        })))
        .mount(server)
        .await;

    let client = client(server).await;
    client.login("ferris@example.com", "secret").await.unwrap();
    client
}

#[tokio::test]
async fn test_login_then_authenticated_read() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/g/s/user-profile/u-2"))
        .and(header("NDCAUTH", "sid=SID"))
        .and(header("NDCDEVICEID", "DEV"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userProfile": {"uid": "u-2", "nickname": "crab"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    assert!(client.is_authenticated());
    assert_eq!(client.user_id().unwrap(), "u-1");

    let profile = client.get_user_info("u-2").await.unwrap();
    assert_eq!(profile.uid, "u-2");
    assert_eq!(profile.nickname.as_deref(), Some("crab"));
}

#[tokio::test]
async fn test_status_code_maps_to_error_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/g/s/user-profile/gone"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "api:statuscode": 225,
            "api:message": "This user is unavailable"
        })))
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let err = client.get_user_info("gone").await.unwrap_err();
    assert_eq!(err.api_kind(), Some(&ApiErrorKind::UserUnavailable));
}

#[tokio::test]
async fn test_login_failure_leaves_client_logged_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/g/s/auth/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "api:statuscode": 200,
            "api:message": "Invalid password"
        })))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let err = client.login("ferris@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, Error::Api(_)));
    assert!(!client.is_authenticated());
    assert!(matches!(client.sub_client("42"), Err(Error::NotLoggedIn)));
}

#[tokio::test]
async fn test_signed_message_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/x42/s/chat/thread/c-1/message"))
        .and(header_exists("NDC-MSG-SIG"))
        .and(body_partial_json(json!({
            "content": "hello",
            "type": 0,
            "clientRefId": 7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let community = client.sub_client("42").unwrap();
    community
        .send_message("c-1", &OutgoingMessage::text("hello").with_client_ref_id(7))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_community_reads_share_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x42/s/blog/b-1/comment"))
        .and(query_param("sort", "vote"))
        .and(query_param("start", "0"))
        .and(query_param("size", "10"))
        .and(header("NDCAUTH", "sid=SID"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "commentList": [
                {"commentId": "cm-1", "content": "nice"},
                {"commentId": "cm-2", "content": "agreed"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let community = client.sub_client("42").unwrap();
    let comments = community
        .get_blog_comments(&Target::Blog("b-1".into()), Sorting::Top, 0, 10)
        .await
        .unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[1].content.as_deref(), Some("agreed"));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/g/s/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    client.logout().await.unwrap();
    assert!(!client.is_authenticated());
    assert!(matches!(client.user_id(), Err(Error::NotLoggedIn)));
}
