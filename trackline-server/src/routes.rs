//! HTTP surface: the latest frame, network stats and input events.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::{mpsc, watch};
use tracing::warn;
use trackline_core::prelude::{Frame, InputEvent, PathEnd, PathGraph};

#[derive(Clone)]
pub struct AppState {
    pub events: mpsc::Sender<InputEvent>,
    pub frames: watch::Receiver<Frame>,
    pub network: Arc<NetworkSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub paths: usize,
    pub links: usize,
    pub total_length: f64,
    /// Path ends with no connection, where a train turns around.
    pub dead_ends: usize,
}

impl NetworkSummary {
    pub fn of(graph: &PathGraph) -> Self {
        let dead_ends = graph
            .paths()
            .iter()
            .flat_map(|path| [PathEnd::Start, PathEnd::End].map(|end| path.connections(end)))
            .filter(|connections| connections.is_empty())
            .count();

        Self {
            paths: graph.path_count(),
            links: graph.link_count(),
            total_length: graph.paths().iter().map(|path| path.length()).sum(),
            dead_ends,
        }
    }
}

/// Body of `POST /events`: either an event name or a keyboard code.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EventRequest {
    Named { event: String },
    Key { key: String },
}

impl EventRequest {
    fn resolve(&self) -> Result<InputEvent, ApiError> {
        match self {
            EventRequest::Named { event } => event
                .parse()
                .map_err(|_| ApiError::UnknownEvent(event.clone())),
            EventRequest::Key { key } => {
                InputEvent::from_key_code(key).ok_or_else(|| ApiError::UnknownEvent(key.clone()))
            }
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    UnknownEvent(String),
    AnimationStopped,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::UnknownEvent(name) => {
                (StatusCode::BAD_REQUEST, format!("unknown input event '{name}'"))
            }
            ApiError::AnimationStopped => (
                StatusCode::SERVICE_UNAVAILABLE,
                "animation is not running".to_string(),
            ),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/network", get(network))
        .route("/frame", get(frame))
        .route("/events", post(push_event))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn network(State(state): State<AppState>) -> Json<NetworkSummary> {
    Json(state.network.as_ref().clone())
}

async fn frame(State(state): State<AppState>) -> Json<Frame> {
    let frame = *state.frames.borrow();
    Json(frame)
}

async fn push_event(
    State(state): State<AppState>,
    Json(request): Json<EventRequest>,
) -> Result<StatusCode, ApiError> {
    let event = request.resolve()?;
    state.events.send(event).await.map_err(|_| {
        warn!(%event, "dropping input event, animation loop is gone");
        ApiError::AnimationStopped
    })?;
    Ok(StatusCode::ACCEPTED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;
    use trackline_core::prelude::*;

    const NETWORK: &str = r#"{
        "pathsInput": [
            {"id": 0, "origin": {"x": 0, "y": 0}, "destination": {"x": 10, "y": 0}},
            {"id": 1, "origin": {"x": 10, "y": 0}, "destination": {"x": 10, "y": 4}}
        ],
        "connectionsInput": [[[0, 1], [1, 0]]]
    }"#;

    fn state() -> (AppState, mpsc::Receiver<InputEvent>) {
        let graph = build_path_graph(&NetworkInput::from_json_str(NETWORK).unwrap()).unwrap();
        let frame = Frame {
            tick: 5,
            path_id: 1,
            distance: 2.0,
            direction: Direction::Forward,
            turn: TurnDirection::Left,
            x: 10.0,
            y: 2.0,
        };
        let (events, event_rx) = mpsc::channel(4);
        let (_frame_tx, frames) = watch::channel(frame);
        let state = AppState {
            events,
            frames,
            network: Arc::new(NetworkSummary::of(&graph)),
        };
        (state, event_rx)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_event(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/events")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[test]
    fn summary_counts_dead_ends() {
        let graph = build_path_graph(&NetworkInput::from_json_str(NETWORK).unwrap()).unwrap();
        let summary = NetworkSummary::of(&graph);
        assert_eq!(summary.paths, 2);
        assert_eq!(summary.links, 1);
        assert_eq!(summary.total_length, 14.0);
        assert_eq!(summary.dead_ends, 2);
    }

    #[tokio::test]
    async fn frame_returns_the_latest_frame() {
        let (state, _rx) = state();
        let response = router(state)
            .oneshot(Request::builder().uri("/frame").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["tick"], 5);
        assert_eq!(json["path_id"], 1);
        assert_eq!(json["direction"], "forward");
    }

    #[tokio::test]
    async fn events_by_name_and_key_are_forwarded() {
        let (state, mut rx) = state();
        let app = router(state);

        let response = app
            .clone()
            .oneshot(post_event(r#"{"event": "turn-right"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(rx.recv().await, Some(InputEvent::TurnRight));

        let response = app
            .oneshot(post_event(r#"{"key": "ArrowDown"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(rx.recv().await, Some(InputEvent::Backward));
    }

    #[tokio::test]
    async fn unknown_event_is_a_bad_request() {
        let (state, mut rx) = state();
        let response = router(state)
            .oneshot(post_event(r#"{"event": "jump"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"]
            .as_str()
            .unwrap()
            .contains("jump"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn network_reports_the_summary() {
        let (state, _rx) = state();
        let response = router(state)
            .oneshot(Request::builder().uri("/network").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let summary: NetworkSummary = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(summary.paths, 2);
    }
}
