//! Validation demo routes
//!
//! Seven POST endpoints, each validating the JSON request body against a
//! schema built once at startup. The response envelope is `{success: true}`
//! on a pass and `{success: false, message}` with the first violation's
//! message on a fail, always with HTTP 200.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, routing::post, Json, Router};
use conforma_core::Schema;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Response envelope for the validation endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    fn fail<M: Into<String>>(message: M) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// The schemas every endpoint validates against, built once at startup and
/// shared immutably across requests.
#[derive(Debug)]
pub struct AppState {
    /// `/`: optional non-empty string field `a`
    pub optional_name: Schema,
    /// `/1`: optional array of objects with an optional string field `a`
    pub optional_entries: Schema,
    /// `/2`: optional array of objects that must carry a string field `a`
    pub entries_with_name: Schema,
    /// `/3`: required array of objects that must carry a string field `b`
    pub required_entries: Schema,
    /// `/4`: required, non-empty array of objects with optional fields
    pub non_empty_entries: Schema,
    /// `/5`: optional array of roster members
    pub roster: Schema,
    /// `/6`: required, non-empty, duplicate-free array of roster members
    pub unique_roster: Schema,
}

const ROSTER: [&str; 4] = ["austin", "derek", "ricky", "ginsu"];

impl AppState {
    /// Build all endpoint schemas.
    pub fn new() -> Self {
        Self {
            optional_name: Schema::object().field("a", Schema::string()).into(),
            optional_entries: Schema::object()
                .field(
                    "a",
                    Schema::array().items(Schema::object().field("a", Schema::string())),
                )
                .into(),
            entries_with_name: Schema::object()
                .field(
                    "a",
                    Schema::array()
                        .items(Schema::object().field("a", Schema::string().required())),
                )
                .into(),
            required_entries: Schema::object()
                .field(
                    "a",
                    Schema::array()
                        .items(Schema::object().field("b", Schema::string().required()))
                        .required(),
                )
                .into(),
            non_empty_entries: Schema::object()
                .field(
                    "a",
                    Schema::array()
                        .items(
                            Schema::object()
                                .field("b", Schema::string())
                                .field("c", Schema::string()),
                        )
                        .min_items(1)
                        .required(),
                )
                .into(),
            roster: Schema::object()
                .field("a", Schema::array().items(Schema::one_of(ROSTER)))
                .into(),
            unique_roster: Schema::object()
                .field(
                    "a",
                    Schema::array()
                        .items(Schema::one_of(ROSTER))
                        .min_items(1)
                        .unique()
                        .required(),
                )
                .into(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the validation demo routes
pub fn demo_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(validate_optional_name))
        .route("/1", post(validate_optional_entries))
        .route("/2", post(validate_entries_with_name))
        .route("/3", post(validate_required_entries))
        .route("/4", post(validate_non_empty_entries))
        .route("/5", post(validate_roster))
        .route("/6", post(validate_unique_roster))
        .with_state(state)
}

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    (StatusCode::OK, Json(response))
}

async fn validate_optional_name(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Json<Envelope> {
    Json(run_validation(&state.optional_name, body))
}

async fn validate_optional_entries(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Json<Envelope> {
    Json(run_validation(&state.optional_entries, body))
}

async fn validate_entries_with_name(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Json<Envelope> {
    Json(run_validation(&state.entries_with_name, body))
}

async fn validate_required_entries(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Json<Envelope> {
    Json(run_validation(&state.required_entries, body))
}

async fn validate_non_empty_entries(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Json<Envelope> {
    Json(run_validation(&state.non_empty_entries, body))
}

async fn validate_roster(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Json<Envelope> {
    Json(run_validation(&state.roster, body))
}

async fn validate_unique_roster(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Json<Envelope> {
    Json(run_validation(&state.unique_roster, body))
}

/// Validate a request body, treating a missing/unparseable body as `{}`,
/// and map the report into the response envelope.
fn run_validation(schema: &Schema, body: Option<Json<Value>>) -> Envelope {
    let value = body
        .map(|Json(value)| value)
        .unwrap_or_else(|| Value::Object(Map::new()));

    let report = conforma_core::validate(&value, schema);
    match report.primary_message() {
        None => Envelope::ok(),
        Some(message) => {
            debug!(message, "request body failed validation");
            Envelope::fail(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(schema: &Schema, body: Value) -> Envelope {
        run_validation(schema, Some(Json(body)))
    }

    #[test]
    fn test_optional_name_endpoint() {
        let state = AppState::new();
        assert_eq!(check(&state.optional_name, json!({})), Envelope::ok());
        assert_eq!(check(&state.optional_name, json!({"a": "hi"})), Envelope::ok());
        assert_eq!(
            check(&state.optional_name, json!({"a": ""})),
            Envelope::fail("\"a\" is not allowed to be empty")
        );
        assert_eq!(
            check(&state.optional_name, json!({"a": 1})),
            Envelope::fail("\"a\" must be a string")
        );
    }

    #[test]
    fn test_entries_endpoints() {
        let state = AppState::new();
        // Optional nested string: empty objects pass on /1 but not /2.
        assert_eq!(
            check(&state.optional_entries, json!({"a": [{}]})),
            Envelope::ok()
        );
        assert_eq!(
            check(&state.entries_with_name, json!({"a": [{}]})),
            Envelope::fail("\"a\" is required")
        );
        assert_eq!(
            check(&state.entries_with_name, json!({"a": [{"a": "x"}]})),
            Envelope::ok()
        );
    }

    #[test]
    fn test_required_entries_endpoint() {
        let state = AppState::new();
        assert_eq!(
            check(&state.required_entries, json!({})),
            Envelope::fail("\"a\" is required")
        );
        assert_eq!(
            check(&state.required_entries, json!({"a": []})),
            Envelope::ok()
        );
        assert_eq!(
            check(&state.required_entries, json!({"a": [{"b": "x"}]})),
            Envelope::ok()
        );
    }

    #[test]
    fn test_non_empty_entries_endpoint() {
        let state = AppState::new();
        assert_eq!(
            check(&state.non_empty_entries, json!({"a": []})),
            Envelope::fail("\"a\" must contain at least 1 items")
        );
        assert_eq!(
            check(&state.non_empty_entries, json!({"a": [{}]})),
            Envelope::ok()
        );
    }

    #[test]
    fn test_roster_endpoints() {
        let state = AppState::new();
        assert_eq!(
            check(&state.roster, json!({"a": ["austin", "derek"]})),
            Envelope::ok()
        );
        assert_eq!(
            check(&state.roster, json!({"a": ["max"]})),
            Envelope::fail("\"a\" must be one of [austin, derek, ricky, ginsu]")
        );
        assert_eq!(
            check(&state.unique_roster, json!({"a": ["austin", "austin"]})),
            Envelope::fail("\"a\" contains a duplicate value")
        );
        assert_eq!(
            check(&state.unique_roster, json!({"a": []})),
            Envelope::fail("\"a\" must contain at least 1 items")
        );
        assert_eq!(
            check(&state.unique_roster, json!({"a": ["ginsu"]})),
            Envelope::ok()
        );
    }

    #[test]
    fn test_missing_body_is_empty_object() {
        let state = AppState::new();
        assert_eq!(run_validation(&state.optional_name, None), Envelope::ok());
        assert_eq!(
            run_validation(&state.unique_roster, None),
            Envelope::fail("\"a\" is required")
        );
    }

    #[test]
    fn test_envelope_serialization_omits_message_on_success() {
        let json = serde_json::to_value(Envelope::ok()).unwrap();
        assert_eq!(json, json!({"success": true}));

        let json = serde_json::to_value(Envelope::fail("\"a\" is required")).unwrap();
        assert_eq!(json, json!({"success": false, "message": "\"a\" is required"}));
    }
}
