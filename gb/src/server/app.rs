//! Axum app: state, router, and request handlers.
//!
//! Routes:
//! - `GET /` renders the goal form
//! - `GET /static/script.js` serves the form's script
//! - `POST /break_down_goal` runs one goal through the [`GoalDecomposer`]

use std::sync::Arc;

use axum::extract::{Form, FromRequest, Multipart, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{debug, error};

use super::response::{error_response, form_rejection, multipart_rejection};
use crate::planning::GoalDecomposer;
use crate::prompts::INDEX_SCRIPT;

/// Shared state for the HTTP server
///
/// The decomposer (and the provider client inside it) is built once at
/// startup and shared read-only by every request.
#[derive(Clone)]
pub struct AppState {
    pub(crate) decomposer: Arc<GoalDecomposer>,
}

impl AppState {
    pub fn new(decomposer: Arc<GoalDecomposer>) -> Self {
        Self { decomposer }
    }
}

/// Form body of `POST /break_down_goal`; a missing field reads as empty
#[derive(Debug, Deserialize)]
pub(crate) struct GoalForm {
    #[serde(default)]
    goal: String,
}

/// The `goal` field of a `POST /break_down_goal` body
///
/// Accepts `application/x-www-form-urlencoded` and `multipart/form-data`.
/// A body without the field yields an empty goal.
pub(crate) struct GoalInput(pub(crate) String);

impl<S> FromRequest<S> for GoalInput
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(form) = Form::<GoalForm>::from_request(req, state)
                .await
                .map_err(form_rejection)?;
            return Ok(Self(form.goal));
        }

        debug!("GoalInput::from_request: multipart body");
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| multipart_rejection(e.body_text()))?;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_rejection(e.body_text()))?
        {
            if field.name() == Some("goal") {
                let goal = field.text().await.map_err(|e| multipart_rejection(e.body_text()))?;
                return Ok(Self(goal));
            }
        }
        Ok(Self(String::new()))
    }
}

/// Builds the Axum router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/static/script.js", get(script))
        .route("/break_down_goal", post(break_down_goal))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Response {
    debug!("index: called");
    let max = state.decomposer.config().max_goal_length;
    match state.decomposer.prompts().index_page(max) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render index page");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("An error occurred: {}", e))
        }
    }
}

async fn script() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript; charset=utf-8")], INDEX_SCRIPT)
}

async fn break_down_goal(State(state): State<AppState>, GoalInput(goal): GoalInput) -> Response {
    debug!(goal_len = goal.len(), "break_down_goal: called");

    match state.decomposer.submit_goal(&goal).await {
        Ok(value) => Json(value).into_response(),
        Err(e) => e.into_response(),
    }
}
