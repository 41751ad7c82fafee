//! HTTP contract tests: the router is served on an ephemeral port and driven
//! with a real client.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use route_weather_core::provider::openweather::OpenWeatherProvider;
use route_weather_core::{
    CurrentConditions, ProviderError, ProviderId, WeatherProvider, WeatherResult, WeatherService,
};
use route_weather_server::create_router;
use route_weather_server::http::{ALLOW_HEADERS, ALLOW_METHODS};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Counts calls and answers with a fixed observation.
#[derive(Debug, Default)]
struct CountingProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl WeatherProvider for CountingProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenWeather
    }

    async fn current_conditions(&self, _query: &str) -> Result<CurrentConditions, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CurrentConditions {
            temp_c: Some(21.4),
            humidity_pct: Some(60.0),
            condition_code: Some(800),
            description: Some("clear sky".into()),
            icon: Some("01n".into()),
            ..Default::default()
        })
    }
}

async fn spawn_app(provider: Arc<dyn WeatherProvider>) -> SocketAddr {
    let app = create_router(WeatherService::new(provider));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

fn assert_cors(headers: &reqwest::header::HeaderMap) {
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], ALLOW_METHODS);
    assert_eq!(headers["access-control-allow-headers"], ALLOW_HEADERS);

    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    for m in ["GET", "POST", "PUT", "DELETE"] {
        assert!(methods.contains(m), "missing {m}");
    }
    let allowed = headers["access-control-allow-headers"].to_str().unwrap();
    assert!(allowed.contains("content-type"));
    assert!(allowed.contains("authorization"));
}

#[tokio::test]
async fn lookup_with_empty_origin() {
    let provider = Arc::new(CountingProvider::default());
    let addr = spawn_app(provider.clone()).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/weather"))
        .json(&json!({ "origin": "", "destination": "Auckland - NZAKL" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_cors(res.headers());

    let body: Value = res.json().await.unwrap();
    assert!(body["origin"].is_null());
    assert_eq!(body["destination"]["location"], "Auckland - NZAKL");
    assert_eq!(body["destination"]["temp_c"], 21);
    assert_eq!(body["destination"]["severity"], "calm");
    assert_eq!(body["destination"]["icon"], "01n");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_object_returns_two_nulls() {
    let provider = Arc::new(CountingProvider::default());
    let addr = spawn_app(provider.clone()).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/weather"))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "origin": null, "destination": null }));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let provider = Arc::new(CountingProvider::default());
    let addr = spawn_app(provider.clone()).await;
    let client = reqwest::Client::new();

    for body in ["not json", "", r#"{"origin": 7}"#, r#"["Mumbai"]"#] {
        let res = client
            .post(format!("http://{addr}/weather"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body {body:?}");
        assert_cors(res.headers());
        let json: Value = res.json().await.unwrap();
        assert!(json["error"].is_string(), "body {body:?}");
    }

    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn preflight_is_empty_success_without_credentials() {
    let addr = spawn_app(Arc::new(OpenWeatherProvider::unconfigured())).await;

    let res = reqwest::Client::new()
        .request(Method::OPTIONS, format!("http://{addr}/weather"))
        .header("origin", "https://dashboard.example")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_cors(res.headers());
    assert!(res.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_route_still_carries_cors_headers() {
    let addr = spawn_app(Arc::new(CountingProvider::default())).await;

    let res = reqwest::get(format!("http://{addr}/nope")).await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_cors(res.headers());
}

#[tokio::test]
async fn health_check() {
    let addr = spawn_app(Arc::new(CountingProvider::default())).await;

    let res = reqwest::get(format!("http://{addr}/health")).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn missing_api_key_falls_back_for_each_slot() {
    let addr = spawn_app(Arc::new(OpenWeatherProvider::unconfigured())).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/weather"))
        .json(&json!({ "origin": "Nhava Sheva Port/Mumbai - INJNP", "destination": "Jebel Ali" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body["origin"],
        serde_json::to_value(WeatherResult::fallback("Nhava Sheva Port/Mumbai - INJNP")).unwrap()
    );
    assert_eq!(
        body["destination"],
        serde_json::to_value(WeatherResult::fallback("Jebel Ali")).unwrap()
    );
}

#[tokio::test]
async fn end_to_end_against_mock_provider() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Pune,IN"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weather": [{ "id": 741, "description": "fog", "icon": "50d" }],
            "main": { "temp": 24.5, "feels_like": 25.1, "humidity": 94 },
            "visibility": 8000,
            "wind": { "speed": 10, "deg": 359 }
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&upstream)
        .await;

    let provider = OpenWeatherProvider::new("KEY".into()).with_base_url(upstream.uri());
    let addr = spawn_app(Arc::new(provider)).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/weather"))
        .json(&json!({ "origin": "Pune, MH", "destination": "Atlantis Port" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();

    assert_eq!(
        body["origin"],
        json!({
            "location": "Pune, MH",
            "temp_c": 25,
            "description": "fog",
            "icon": "50d",
            "humidity": 94,
            "wind_speed": 36,
            "wind_dir": "N",
            "feels_like": 25,
            "visibility": 8,
            "conditions_code": 741,
            "severity": "moderate"
        })
    );
    assert_eq!(
        body["destination"],
        serde_json::to_value(WeatherResult::fallback("Atlantis Port")).unwrap()
    );
}
