use crate::controller::health::routes::HealthRoutes;
use crate::controller::notification::routes::NotificationRoutes;
use crate::state::AppState;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderName;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;

pub struct Routes;

impl Routes {
    pub fn routes(app_state: &AppState) -> Router {
        Router::new()
            .nest("/health", HealthRoutes::routes())
            .nest("/notifications", NotificationRoutes::notifications(app_state.clone()))
            .nest("/invocations", NotificationRoutes::invocations(app_state.clone()))
            .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION, HeaderName::from_static("api-key")]))
            .layer(CatchPanicLayer::new())
    }
}
