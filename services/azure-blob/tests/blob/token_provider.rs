use blobgate_azure_blob::ClientSecretTokenProvider;
use blobgate_core::{ErrorKind, ProvideToken, TokenCache};
use http::Method;
use pretty_assertions::assert_eq;

use crate::{credentials, FakeAzure, TOKEN, TOKEN_URL};

#[tokio::test]
async fn test_returns_access_token_field() {
    let fake = FakeAzure::new();
    fake.token_responds(200, r#"{"access_token":"tok123"}"#);

    let provider = ClientSecretTokenProvider::new(credentials());
    let token = provider.get_access_token(&fake.context()).await.unwrap();

    assert_eq!(token.value(), "tok123");
    assert_eq!(token.expires_at(), None);
}

#[tokio::test]
async fn test_sends_client_credentials_form() {
    let fake = FakeAzure::new();

    let provider = ClientSecretTokenProvider::new(credentials());
    let token = provider.provide_token(&fake.context()).await.unwrap();
    assert_eq!(token.value(), TOKEN);
    assert!(token.expires_at().is_some());

    let requests = fake.requests();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.uri, TOKEN_URL);
    assert_eq!(
        req.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );

    let form: Vec<(String, String)> = form_urlencoded::parse(&req.body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        form,
        vec![
            ("grant_type".to_string(), "client_credentials".to_string()),
            ("client_id".to_string(), "client_id".to_string()),
            ("client_secret".to_string(), "client_secret".to_string()),
            (
                "scope".to_string(),
                "https://storage.azure.com/.default".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn test_custom_authority_host() {
    let fake = FakeAzure::new();

    let provider = ClientSecretTokenProvider::new(credentials())
        .with_authority_host("https://login.microsoftonline.us/");
    provider.provide_token(&fake.context()).await.unwrap();

    assert_eq!(
        fake.requests()[0].uri,
        "https://login.microsoftonline.us/tenant_id/oauth2/v2.0/token"
    );
}

#[tokio::test]
async fn test_error_status_is_auth_error() {
    let fake = FakeAzure::new();
    fake.token_responds(400, "");

    let provider = ClientSecretTokenProvider::new(credentials());
    let err = provider.get_access_token(&fake.context()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Auth);
}

#[tokio::test]
async fn test_error_body_is_reported() {
    let fake = FakeAzure::new();
    fake.token_responds(
        401,
        r#"{"error":"invalid_client","error_description":"AADSTS7000215"}"#,
    );

    let provider = ClientSecretTokenProvider::new(credentials());
    let err = provider.get_access_token(&fake.context()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Auth);
    assert!(err.to_string().contains("AADSTS7000215"));
}

#[tokio::test]
async fn test_missing_access_token_is_auth_error() {
    let fake = FakeAzure::new();
    fake.token_responds(200, r#"{"token_type":"Bearer"}"#);

    let provider = ClientSecretTokenProvider::new(credentials());
    let err = provider.get_access_token(&fake.context()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Auth);
    assert!(err.to_string().contains("token_type"));
}

#[tokio::test]
async fn test_transport_failure_is_auth_error() {
    let fake = FakeAzure::new();
    fake.break_transport();

    let provider = ClientSecretTokenProvider::new(credentials());
    let err = provider.get_access_token(&fake.context()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Auth);
    assert!(err.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_every_call_fetches_a_new_token() {
    let fake = FakeAzure::new();
    let ctx = fake.context();

    let provider = ClientSecretTokenProvider::new(credentials());
    provider.provide_token(&ctx).await.unwrap();
    provider.provide_token(&ctx).await.unwrap();

    assert_eq!(fake.requests().len(), 2);
}

#[tokio::test]
async fn test_token_cache_fetches_once() {
    let fake = FakeAzure::new();
    let ctx = fake.context();

    let provider = TokenCache::new(ClientSecretTokenProvider::new(credentials()));
    provider.provide_token(&ctx).await.unwrap();
    provider.provide_token(&ctx).await.unwrap();

    assert_eq!(fake.requests().len(), 1);
}
