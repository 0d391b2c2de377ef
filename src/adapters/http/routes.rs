//! Axum router for the relay endpoints.
//!
//! Paths and methods are preserved exactly for frontend compatibility.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_session, detect_emergency, find_hospitals, get_session_messages, get_task_status,
    send_and_process, submit_tool_outputs, AppState,
};

/// Create the relay router.
///
/// # Routes
///
/// ## Polling API
/// - `POST /create-session` - create an engine session
/// - `POST /send-and-process` - append a message and start a task
/// - `GET /get-task-status/:sessionId/:taskId` - poll a task
/// - `POST /submit-tool-outputs` - return tool results to a pending task
/// - `GET /get-session-messages/:sessionId` - list session messages
///
/// ## Tool endpoints
/// - `POST /detect-emergency` - keyword emergency screen
/// - `POST /find-hospitals` - nearby-hospital lookup
pub fn relay_router(state: AppState) -> Router {
    Router::new()
        .route("/create-session", post(create_session))
        .route("/send-and-process", post(send_and_process))
        .route("/get-task-status/:session_id/:task_id", get(get_task_status))
        .route("/submit-tool-outputs", post(submit_tool_outputs))
        .route("/get-session-messages/:session_id", get(get_session_messages))
        .route("/detect-emergency", post(detect_emergency))
        .route("/find-hospitals", post(find_hospitals))
        .with_state(state)
}
