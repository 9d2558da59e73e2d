use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;
use user_client::UserClientError;
use user_client::UserServiceClient;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;

async fn spawn_user_service() -> String {
    let authenticator = Arc::new(
        Authenticator::new(
            b"test-secret-key-for-jwt-signing-at-least-32-bytes",
            Duration::hours(10),
        )
        .unwrap(),
    );
    let user_service = Arc::new(UserService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::clone(&authenticator),
    ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let address = format!("http://{}", listener.local_addr().unwrap());

    let router = create_router(user_service, authenticator);
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server error");
    });

    address
}

#[tokio::test]
async fn test_ping_returns_user_test() {
    let address = spawn_user_service().await;
    let client = UserServiceClient::new(address);

    assert_eq!(client.ping().await.unwrap(), "user-test");
}

#[tokio::test]
async fn test_ping_wrong_base_path() {
    let address = spawn_user_service().await;
    let client = UserServiceClient::new(format!("{}/nowhere", address));

    let result = client.ping().await;
    assert!(matches!(result, Err(UserClientError::UnexpectedStatus(404))));
}

#[tokio::test]
async fn test_ping_unreachable_service() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = UserServiceClient::new(address);

    assert!(matches!(
        client.ping().await,
        Err(UserClientError::Transport(_))
    ));
}
