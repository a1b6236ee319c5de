//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Path as UrlPath, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{delete, get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::schedule::{ClassEntry, EntryId, ScheduleError};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Body of every failed `/distance` response.
pub const DISTANCE_FAILURE_MESSAGE: &str = "Failed to fetch distance data";

/// Create the application router.
///
/// Requests that match no route are served from `public_dir`, with 404 for
/// missing files.
pub fn create_router(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/distance", get(distance))
        .route("/schedule", get(schedule_table).post(add_class_form))
        .route("/schedule/:id/delete", post(remove_class_form))
        .route("/api/schedule", get(list_schedule).post(add_class))
        .route("/api/schedule/:index", delete(remove_class))
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Distance proxy: relay the provider's JSON for one origin/destination pair.
///
/// Every failure, whatever its cause, gets the same 500 body.
async fn distance(
    State(state): State<AppState>,
    Query(query): Query<DistanceQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .maps
        .fetch_raw(&query.origin, &query.destination, &query.mode)
        .await
        .map(Json)
        .map_err(|e| AppError::Upstream {
            message: format!(
                "distance provider request failed ({} -> {} by {}): {e}",
                query.origin, query.destination, query.mode
            ),
        })
}

/// Schedule page with the add-class form.
async fn index_page(State(state): State<AppState>) -> Result<Response, AppError> {
    render_index(&state, FormView::empty(), None, StatusCode::OK).await
}

/// Schedule table fragment.
async fn schedule_table(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let rows = schedule_row_views(&state).await;
    let html = ScheduleTableTemplate { rows }
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;
    Ok(Html(html))
}

/// Add a class from the HTML form.
///
/// On success the browser is sent back to the schedule page, which renders
/// the new schedule from scratch. On failure the page is re-rendered with the
/// submitted values and an inline message.
async fn add_class_form(
    State(state): State<AppState>,
    Form(form): Form<AddClassForm>,
) -> Result<Response, AppError> {
    let entry = match form.to_entry() {
        Ok(entry) => entry,
        Err(e) => {
            let message = format!("Error: {e}");
            return render_index(
                &state,
                FormView::from_form(&form),
                Some(message),
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await;
        }
    };

    let result = state.schedule.write().await.add(entry);
    match result {
        Ok(id) => {
            info!(%id, name = %form.name.trim(), "class added");
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            info!(error = %e, "class rejected");
            let message = format!("Error: {}", e.user_message());
            render_index(
                &state,
                FormView::from_form(&form),
                Some(message),
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await
        }
    }
}

/// Remove a class from the HTML table by id.
///
/// An id that is no longer scheduled (double submit, stale page) is logged
/// and otherwise ignored.
async fn remove_class_form(State(state): State<AppState>, UrlPath(id): UrlPath<u64>) -> Redirect {
    let result = state.schedule.write().await.remove_by_id(EntryId::new(id));
    match result {
        Ok(removed) => info!(id, name = %removed.name, "class removed"),
        Err(e) => warn!(error = %e, "ignoring removal of unscheduled class"),
    }
    Redirect::to("/")
}

/// Current schedule with travel times.
async fn list_schedule(State(state): State<AppState>) -> Json<ScheduleResponse> {
    Json(schedule_response(&state).await)
}

/// Add a class from JSON and return the re-rendered schedule.
///
/// A body that does not decode as a class gets the same JSON error envelope
/// as a rejected class.
async fn add_class(
    State(state): State<AppState>,
    payload: Result<Json<ClassEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<ScheduleResponse>), AppError> {
    let Json(entry) = payload.map_err(|rejection| AppError::Unprocessable {
        message: rejection.body_text(),
    })?;
    let name = entry.name.clone();
    let result = state.schedule.write().await.add(entry);
    let id = result.map_err(AppError::from)?;
    info!(%id, %name, "class added");

    Ok((StatusCode::CREATED, Json(schedule_response(&state).await)))
}

/// Remove the class at a position and return the re-rendered schedule.
///
/// Out-of-range positions are logged and leave the schedule unchanged.
async fn remove_class(
    State(state): State<AppState>,
    UrlPath(index): UrlPath<usize>,
) -> Json<ScheduleResponse> {
    let result = state.schedule.write().await.remove(index);
    match result {
        Ok(removed) => info!(index, name = %removed.name, "class removed"),
        Err(e) => warn!(error = %e, "ignoring removal of unscheduled class"),
    }
    Json(schedule_response(&state).await)
}

async fn schedule_row_views(state: &AppState) -> Vec<ScheduleRowView> {
    let (_, resolved) = state.render_schedule().await;
    resolved
        .iter()
        .enumerate()
        .map(|(i, (class, travel_time))| ScheduleRowView::new(i, class, travel_time))
        .collect()
}

async fn schedule_response(state: &AppState) -> ScheduleResponse {
    let (revision, resolved) = state.render_schedule().await;
    let classes = resolved
        .iter()
        .enumerate()
        .map(|(i, (class, travel_time))| ScheduleRow::new(i, class, travel_time))
        .collect();
    ScheduleResponse { revision, classes }
}

async fn render_index(
    state: &AppState,
    form: FormView,
    message: Option<String>,
    status: StatusCode,
) -> Result<Response, AppError> {
    let rows = schedule_row_views(state).await;
    let template = IndexTemplate {
        rows,
        form,
        message,
    };
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok((status, Html(html)).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Unprocessable { message: String },
    Conflict { message: String },
    Internal { message: String },
    /// Provider failure behind the distance proxy. `message` is logged, never sent.
    Upstream { message: String },
}

impl From<ScheduleError> for AppError {
    fn from(e: ScheduleError) -> Self {
        match e {
            ScheduleError::InvalidTimeRange { .. } => AppError::Unprocessable {
                message: e.user_message().to_string(),
            },
            ScheduleError::Duplicate { .. } => AppError::Conflict {
                message: e.user_message().to_string(),
            },
            // Removals never surface as errors; they are logged and ignored.
            ScheduleError::IndexOutOfBounds { .. } | ScheduleError::UnknownEntry(_) => {
                AppError::Internal {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => {
                error!("{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            AppError::Upstream { message } => {
                error!("{message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    DISTANCE_FAILURE_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ClassTime;

    #[test]
    fn schedule_errors_map_to_statuses() {
        let t = |s| ClassTime::parse(s).unwrap();

        let err = AppError::from(ScheduleError::InvalidTimeRange {
            start: t("10:00"),
            end: t("09:00"),
        });
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let err = AppError::from(ScheduleError::Duplicate {
            name: "Math".into(),
            start_time: t("09:00"),
            location: "Building A".into(),
        });
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn upstream_error_hides_details() {
        let err = AppError::Upstream {
            message: "connection refused".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!text.contains("connection refused"));

        let body: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": "Failed to fetch distance data" })
        );
    }
}
