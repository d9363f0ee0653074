//! A stand-in weather endpoint for integration tests.
//!
//! Serves whatever status and body the test sets, and records the query
//! string of every request it receives.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

/// Body for 68 °F, 50 %, sea-level pressure and 25 mph wind
pub const MILD_WEATHER: &str = r#"{
    "coord": {"lon": -74.006, "lat": 40.7128},
    "weather": [{"id": 800, "main": "Clear"}],
    "main": {"temp": 68.0, "feels_like": 67.1, "pressure": 1013.25, "humidity": 50},
    "wind": {"speed": 25.0, "deg": 200},
    "name": "New York"
}"#;

#[derive(Default)]
struct Inner {
    status: Option<StatusCode>,
    body: String,
    requests: Vec<HashMap<String, String>>,
}

/// Handle to a running fake weather endpoint
#[derive(Clone)]
pub struct FakeWeather {
    pub addr: SocketAddr,
    inner: Arc<Mutex<Inner>>,
}

impl FakeWeather {
    /// Endpoint URL to put in `WeatherConfig::endpoint`
    pub fn endpoint(&self) -> String {
        format!("http://{}/data/2.5/weather", self.addr)
    }

    /// Answer subsequent requests with `status` and `body`
    pub fn respond_with(&self, status: StatusCode, body: &str) {
        let mut inner = self.inner.lock();
        inner.status = Some(status);
        inner.body = body.to_string();
    }

    /// Query strings received so far
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.inner.lock().requests.clone()
    }
}

async fn weather(
    State(inner): State<Arc<Mutex<Inner>>>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let mut inner = inner.lock();
    inner.requests.push(query);
    (inner.status.unwrap_or(StatusCode::OK), inner.body.clone())
}

/// Start a fake weather endpoint on an ephemeral port
pub async fn start(body: &str) -> FakeWeather {
    let inner = Arc::new(Mutex::new(Inner {
        status: Some(StatusCode::OK),
        body: body.to_string(),
        requests: Vec::new(),
    }));

    let app = Router::new()
        .route("/data/2.5/weather", get(weather))
        .with_state(inner.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake weather endpoint");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Fake weather endpoint failed");
    });

    FakeWeather { addr, inner }
}
