use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use tracing::log::{info, warn};
use video_frame_notifier::invocation::{invoke, InvocationBody, InvocationEvent, InvocationResponse};
use video_frame_notifier::job_outcome::Payload;

pub struct NotificationRoutes;

impl NotificationRoutes {
    pub fn notifications(app_state: AppState) -> Router {
        Router::new().route("/", post(notification_handler)).with_state(app_state)
    }

    pub fn invocations(app_state: AppState) -> Router {
        Router::new().route("/", post(invocation_handler)).with_state(app_state)
    }
}

/// The request body is the job record; the HTTP status mirrors `statusCode`.
async fn notification_handler(
    State(app_state): State<AppState>,
    body: String,
) -> (StatusCode, Json<InvocationBody>) {
    info!("POST /notifications");

    let payload = if body.trim().is_empty() { Payload::Missing } else { Payload::Text(body) };
    let response = InvocationResponse::from(app_state.notifier.handle(payload).await);
    let status_code = StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status_code, Json(response.body))
}

/// Event in, `{statusCode, body}` out. Transport status is always 200.
async fn invocation_handler(
    State(app_state): State<AppState>,
    body: String,
) -> Json<InvocationResponse> {
    info!("POST /invocations");

    let event = match serde_json::from_str::<InvocationEvent>(&body) {
        Ok(event) => event,
        Err(error) => {
            warn!("Undecodable invocation event: {}", error);
            InvocationEvent::default()
        },
    };

    Json(invoke(&app_state.notifier, event).await)
}
