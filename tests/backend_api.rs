//! Клиент бэкенда против поднятого wiremock-сервера.

use serde_json::json;
use wiremock::matchers::{body_json_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cinema_booking::config::{ApiConfig, CircuitBreakerConfig};
use cinema_booking::models::UserUpdate;
use cinema_booking::services::backend::{BackendClient, MovieQuery};
use cinema_booking::services::{ApiError, CircuitState};

fn client(base_url: &str) -> BackendClient {
    BackendClient::from_config(
        &ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        },
        &CircuitBreakerConfig {
            failure_threshold: 3,
            cooldown_secs: 60,
        },
    )
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json_string(
            json!({"username": "demo", "password": "secret"}).to_string(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-123",
            "user": {
                "id": 1,
                "username": "demo",
                "email": "demo@example.com",
                "is_admin": false,
                "is_active": true,
                "created_at": null
            }
        })))
        .mount(&server)
        .await;

    let response = client(&server.uri()).login("demo", "secret").await.unwrap();
    assert_eq!(response.token, "tok-123");
    assert_eq!(response.user.username, "demo");
}

#[tokio::test]
async fn wrong_credentials_map_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client(&server.uri()).login("demo", "wrong").await.err().unwrap();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn movie_listing_passes_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies"))
        .and(query_param("genre", "Sci-Fi"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "movies": [{
                "id": 1,
                "title": "Inception",
                "description": "",
                "duration": 148,
                "release_date": null,
                "genre": "Sci-Fi",
                "rating": 8.8,
                "poster_url": "https://posters.example/inception.jpg",
                "price": 200.0
            }],
            "total": 1,
            "total_pages": 1
        })))
        .mount(&server)
        .await;

    let list = client(&server.uri())
        .movies(&MovieQuery {
            genre: Some("Sci-Fi".to_string()),
            limit: Some(10),
            ..MovieQuery::default()
        })
        .await
        .unwrap();

    assert_eq!(list.total, 1);
    assert_eq!(list.movies[0].title, "Inception");
}

#[tokio::test]
async fn admin_user_update_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users/7"))
        .and(header("authorization", "Bearer admin-tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "username": "renamed",
            "email": "renamed@example.com",
            "is_admin": false,
            "is_active": true,
            "created_at": null
        })))
        .mount(&server)
        .await;

    let user = client(&server.uri())
        .update_user(
            "admin-tok",
            7,
            &UserUpdate {
                username: Some("renamed".to_string()),
                ..UserUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(user.username, "renamed");
}

#[tokio::test]
async fn forbidden_and_validation_statuses_are_distinguished() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"detail": "username taken"})),
        )
        .mount(&server)
        .await;

    let client = client(&server.uri());

    let err = client.delete_user("tok", 1).await.err().unwrap();
    assert!(matches!(err, ApiError::Forbidden));

    let err = client
        .register(&cinema_booking::models::RegisterRequest {
            username: "demo".to_string(),
            email: "demo@example.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .err()
        .unwrap();
    match err {
        ApiError::Validation(detail) => assert_eq!(detail, "username taken"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failures_open_the_breaker() {
    // Порт без слушателя: каждый вызов - транспортная ошибка.
    let client = client("http://127.0.0.1:1");

    for _ in 0..3 {
        let err = client.featured_movies().await.err().unwrap();
        assert!(matches!(err, ApiError::Network(_)));
    }
    assert_eq!(client.breaker().get_state(), CircuitState::Open);

    let err = client.featured_movies().await.err().unwrap();
    assert!(matches!(err, ApiError::Breaker));
}

#[tokio::test]
async fn server_errors_do_not_trip_the_breaker() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies/featured"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client(&server.uri());
    for _ in 0..5 {
        let err = client.featured_movies().await.err().unwrap();
        assert!(matches!(err, ApiError::Gateway));
    }
    assert_eq!(client.breaker().get_state(), CircuitState::Closed);
}
