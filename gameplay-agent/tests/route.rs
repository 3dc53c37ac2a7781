use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use gameplay::games::breakthrough::{initial_board, invert, Action, Breakthrough, BLACK};
use gameplay::GameState;
use gameplay_agent::agents;
use gameplay_agent::config::AgentKind;
use gameplay_agent::{app, AgentError, Fresh, MoveSelector, PlayerAi};

#[derive(Default)]
struct Fixed;

impl PlayerAi for Fixed {
    type Board = Value;
    type Move = Vec<u32>;
    type Error = Infallible;

    fn make_move(&mut self, _board: Value) -> Result<Vec<u32>, Infallible> {
        Ok(vec![0, 1])
    }
}

#[derive(Default)]
struct Counter {
    calls: u32,
}

impl PlayerAi for Counter {
    type Board = Value;
    type Move = u32;
    type Error = Infallible;

    fn make_move(&mut self, _board: Value) -> Result<u32, Infallible> {
        self.calls += 1;
        Ok(self.calls)
    }
}

#[derive(Default)]
struct Panics;

impl PlayerAi for Panics {
    type Board = Value;
    type Move = ();
    type Error = Infallible;

    fn make_move(&mut self, _board: Value) -> Result<(), Infallible> {
        panic!("boom");
    }
}

#[derive(Default)]
struct ByteKeys;

impl PlayerAi for ByteKeys {
    type Board = Value;
    type Move = HashMap<Vec<u8>, u8>;
    type Error = Infallible;

    fn make_move(&mut self, _board: Value) -> Result<HashMap<Vec<u8>, u8>, Infallible> {
        Ok(HashMap::from([(vec![1, 2], 3)]))
    }
}

fn with_agent(selector: impl MoveSelector + 'static) -> Router {
    app(Some(Arc::new(selector)), true)
}

async fn post(app: Router, body: impl Into<Body>) -> (StatusCode, String) {
    let request = Request::post("/").body(body.into()).unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn returns_the_agents_move_as_json() {
    let app = with_agent(Fresh::<Fixed>::new());
    let (status, body) = post(app, r#"{"anything": [1, 2, 3]}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[0,1]");
}

#[tokio::test]
async fn ignores_the_content_type() {
    let app = with_agent(Fresh::<Fixed>::new());
    let request = Request::post("/")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("[]"))
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[0,1]");
}

#[tokio::test]
async fn builds_a_new_agent_for_every_request() {
    let app = with_agent(Fresh::<Counter>::new());
    for _ in 0..3 {
        let (status, body) = post(app.clone(), "null").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "1");
    }
}

#[tokio::test]
async fn malformed_bodies_fail() {
    let app = with_agent(Fresh::<Fixed>::new());
    let (status, _) = post(app, "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn fails_without_an_agent() {
    let app = app(None, true);
    let (status, body) = post(app, "[]").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "No agent is configured.");
}

#[tokio::test]
async fn agent_failures_are_server_errors() {
    let app = with_agent(|_board: Value| -> Result<Value, AgentError> {
        Err(AgentError::Agent("no idea".into()))
    });
    let (status, body) = post(app, "[]").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Agent failed: no idea");
}

#[tokio::test]
async fn panicking_agents_are_server_errors() {
    let app = with_agent(Fresh::<Panics>::new());
    let (status, body) = post(app.clone(), "[]").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.starts_with("Agent task did not finish"), "{}", body);

    // The server keeps answering after a panic.
    let (status, _) = post(app, "[]").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn moves_that_cannot_be_encoded_are_server_errors() {
    let app = with_agent(Fresh::<ByteKeys>::new());
    let (status, body) = post(app, "[]").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Move could not be encoded: key must be a string");
}

#[tokio::test]
async fn only_post_is_routed() {
    let app = with_agent(Fresh::<Fixed>::new());
    let request = Request::get("/").body(Body::empty()).unwrap();
    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn health_check() {
    let (status, body) = send(
        app(None, false),
        Request::get("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn allows_cross_origin_callers() {
    let app = with_agent(Fresh::<Fixed>::new());
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn random_agent_answers_a_breakthrough_board() {
    let app = app(agents::selector(AgentKind::Random, 1), true);
    let board = serde_json::to_string(&initial_board()).unwrap();
    let (status, body) = post(app, board).await;
    assert_eq!(status, StatusCode::OK);

    let action: Action = serde_json::from_str(&body).unwrap();
    assert!(Breakthrough::new(initial_board(), BLACK).valid_action(&action));
}

#[tokio::test]
async fn white_moves_come_from_the_inverted_board() {
    let app = app(agents::selector(AgentKind::Mcts, 3), true);
    let mut state = Breakthrough::default();
    state
        .apply_action(&"a2a3".parse::<Action>().unwrap())
        .unwrap();
    state
        .apply_action(&"f5f4".parse::<Action>().unwrap())
        .unwrap();

    let board = json!(invert(state.board())).to_string();
    let (status, body) = post(app, board).await;
    assert_eq!(status, StatusCode::OK);

    let action: Action = serde_json::from_str(&body).unwrap();
    assert!(state.valid_action(&action.mirror()));
}

#[tokio::test]
async fn boards_of_the_wrong_shape_fail() {
    let app = app(agents::selector(AgentKind::Random, 1), true);
    let (status, body) = post(app, r#"{"board": [null, 1]}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.starts_with("Board does not match"));
}
