//! Element HTTP Routes
//!
//! CRUD endpoints over the record store:
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | /elements | 200, array of records |
//! | GET | /elements/:id | 200, record |
//! | POST | /elements | 201, `{"id": n}` |
//! | PUT | /elements/:id | 200, `{"message": "Element updated"}` |
//! | DELETE | /elements/:id | 200, `{"message": "Element deleted"}` |

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::observability::Logger;
use crate::schema::{EmissionFields, EmissionRecord, FieldPatch};
use crate::storage::{RecordStore, StoreResult};

use super::errors::{ApiError, ApiResult};

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

// ==================
// Element Routes
// ==================

/// Create element routes
pub fn element_routes(store: Arc<RecordStore>) -> Router {
    Router::new()
        .route(
            "/elements",
            get(list_elements_handler).post(create_element_handler),
        )
        .route(
            "/elements/:id",
            get(get_element_handler)
                .put(update_element_handler)
                .delete(delete_element_handler),
        )
        .with_state(store)
}

// ==================
// Helper Functions
// ==================

/// Parse a request body as a JSON object.
///
/// Returns `None` for an empty body or a literal `null`. Bodies are parsed
/// regardless of content type.
fn parse_object(body: &[u8]) -> ApiResult<Option<Map<String, Value>>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::InvalidInput(format!("malformed JSON: {}", e)))?;

    match value {
        Value::Object(object) => Ok(Some(object)),
        Value::Null => Ok(None),
        _ => Err(ApiError::InvalidInput("expected a JSON object".to_string())),
    }
}

/// Resolve the `:id` segment. A segment that is not an integer names no
/// element, so it is answered like a missing one.
fn element_id(path: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    path.map(|Path(id)| id).map_err(|_| ApiError::NotFound)
}

/// Run a store call on the blocking pool
pub(crate) async fn with_store<T, F>(store: Arc<RecordStore>, op: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&RecordStore) -> StoreResult<T> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {}", e)))?;
    Ok(result?)
}

// ==================
// Handlers
// ==================

async fn list_elements_handler(
    State(store): State<Arc<RecordStore>>,
) -> ApiResult<Json<Vec<EmissionRecord>>> {
    Ok(Json(with_store(store, |s| s.list_all()).await?))
}

async fn get_element_handler(
    State(store): State<Arc<RecordStore>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<EmissionRecord>> {
    let id = element_id(path)?;
    Ok(Json(with_store(store, move |s| s.get_by_id(id)).await?))
}

async fn create_element_handler(
    State(store): State<Arc<RecordStore>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let object = parse_object(&body)?
        .filter(|object| !object.is_empty())
        .ok_or_else(|| ApiError::InvalidInput("request body must be a non-empty JSON object".to_string()))?;

    let fields = EmissionFields::from_object(&object)?;
    let id = with_store(store, move |s| s.create(&fields)).await?;

    let id_str = id.to_string();
    Logger::info("ELEMENT_CREATED", &[("id", id_str.as_str())]);
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

async fn update_element_handler(
    State(store): State<Arc<RecordStore>>,
    path: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> ApiResult<Json<MessageResponse>> {
    let id = element_id(path)?;
    let patch = match parse_object(&body)? {
        Some(object) => FieldPatch::from_object(&object)?,
        None => FieldPatch::new(),
    };

    let count = patch.len().to_string();
    with_store(store, move |s| s.update(id, &patch)).await?;

    let id_str = id.to_string();
    Logger::info(
        "ELEMENT_UPDATED",
        &[("id", id_str.as_str()), ("fields", count.as_str())],
    );
    Ok(Json(MessageResponse::new("Element updated")))
}

async fn delete_element_handler(
    State(store): State<Arc<RecordStore>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = element_id(path)?;
    with_store(store, move |s| s.delete(id)).await?;

    let id_str = id.to_string();
    Logger::info("ELEMENT_DELETED", &[("id", id_str.as_str())]);
    Ok(Json(MessageResponse::new("Element deleted")))
}
