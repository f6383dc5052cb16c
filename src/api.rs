//! HTTP API
//!
//! JSON endpoints so the rest of the CRM calls one derivation instead of
//! carrying its own copy. Inputs are taken as raw JSON values: a name or
//! candidate that is not a string is handled like an empty one.

use std::sync::Arc;

use axum::{extract::{rejection::JsonRejection, State}, http::StatusCode, routing::{get, post}, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use validator::Validate;

use crate::config::Config;
use crate::domain::aggregates::Seller;
use crate::domain::deriver::derive_from_option;
use crate::domain::value_objects::{is_valid_seller_identifier, SellerIdentifier};

#[derive(Clone)]
pub struct AppState { pub config: Arc<Config> }

impl AppState {
    pub fn new(config: Config) -> Self { Self { config: Arc::new(config) } }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "retail-crm-sellers"})) }))
        .route("/api/v1/seller-identifiers/derive", post(derive))
        .route("/api/v1/seller-identifiers/validate", post(validate))
        .route("/api/v1/sellers/repair-plan", post(repair_plan))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody { pub error: String }

type ApiError = (StatusCode, Json<ErrorBody>);

fn unprocessable(err: impl std::fmt::Display) -> ApiError {
    tracing::warn!(error = %err, "rejected request");
    (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorBody { error: err.to_string() }))
}

/// Body extraction failures keep axum's status but answer with an [`ErrorBody`].
fn rejected(rejection: JsonRejection) -> ApiError {
    tracing::warn!(error = %rejection, "rejected request body");
    (rejection.status(), Json(ErrorBody { error: rejection.body_text() }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct DeriveRequest {
    #[serde(default)]
    pub full_name: Value,
    #[validate(range(min = 1, max = 15))]
    pub storage_width: Option<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeriveResponse {
    pub seller_identifier: SellerIdentifier,
    /// `seller_identifier` cut to the storage width.
    pub stored_identifier: SellerIdentifier,
    pub unknown: bool,
}

async fn derive(State(s): State<AppState>, payload: Result<Json<DeriveRequest>, JsonRejection>) -> Result<Json<DeriveResponse>, ApiError> {
    let Json(r) = payload.map_err(rejected)?;
    r.validate().map_err(unprocessable)?;
    let width = r.storage_width.map_or(s.config.storage_width, usize::from);
    let seller_identifier = derive_from_option(r.full_name.as_str());
    let stored_identifier = seller_identifier.truncated(width).map_err(unprocessable)?;
    Ok(Json(DeriveResponse { unknown: seller_identifier.is_unknown(), seller_identifier, stored_identifier }))
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub candidate: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse { pub candidate: Value, pub valid: bool }

async fn validate(payload: Result<Json<ValidateRequest>, JsonRejection>) -> Result<Json<ValidateResponse>, ApiError> {
    let Json(r) = payload.map_err(rejected)?;
    let valid = r.candidate.as_str().is_some_and(is_valid_seller_identifier);
    Ok(Json(ValidateResponse { candidate: r.candidate, valid }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RepairPlanRequest {
    #[validate(length(max = 500))]
    pub records: Vec<SellerRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SellerRecord {
    pub id: String,
    #[serde(default)]
    pub full_name: Value,
    #[serde(default)]
    pub seller_identifier: Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairAction { Keep, Repair, Manual }

#[derive(Debug, Serialize, Deserialize)]
pub struct RepairPlanEntry { pub id: String, pub current: Value, pub proposed: SellerIdentifier, pub action: RepairAction }

#[derive(Debug, Serialize, Deserialize)]
pub struct RepairPlanResponse { pub entries: Vec<RepairPlanEntry>, pub repairs: usize, pub manual: usize }

/// Reports what a repair run would write. Nothing is persisted.
async fn repair_plan(payload: Result<Json<RepairPlanRequest>, JsonRejection>) -> Result<Json<RepairPlanResponse>, ApiError> {
    let Json(r) = payload.map_err(rejected)?;
    r.validate().map_err(unprocessable)?;
    let now = Utc::now();
    let entries: Vec<RepairPlanEntry> = r.records.into_iter().map(|record| {
        let name = record.full_name.as_str().unwrap_or_default();
        let mut seller = Seller::restore(record.id, name, record.seller_identifier.as_str(), now);
        let repaired = !seller.take_events().is_empty();
        let action = if seller.needs_manual_assignment() { RepairAction::Manual }
            else if repaired { RepairAction::Repair }
            else { RepairAction::Keep };
        RepairPlanEntry { id: seller.id().to_string(), current: record.seller_identifier, proposed: seller.seller_identifier().clone(), action }
    }).collect();
    let repairs = entries.iter().filter(|e| e.action == RepairAction::Repair).count();
    let manual = entries.iter().filter(|e| e.action == RepairAction::Manual).count();
    tracing::info!(records = entries.len(), repairs, manual, "built seller repair plan");
    Ok(Json(RepairPlanResponse { entries, repairs, manual }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use serde_json::json;
    use tower::ServiceExt;

    fn app() -> Router { router(AppState::new(Config::default())) }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let req = Request::builder().method("POST").uri(uri).header("content-type", "application/json").body(Body::from(body.to_string())).unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let res = app().oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_derive() {
        let (status, body) = post_json(app(), "/api/v1/seller-identifiers/derive", json!({"full_name": "Marie-Claire Dupont-Martin", "storage_width": 9})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"seller_identifier": "MARIECLAIRED", "stored_identifier": "MARIECLAI", "unknown": false}));
    }

    #[tokio::test]
    async fn test_derive_uses_configured_width() {
        let app = router(AppState::new(Config { storage_width: 4, ..Config::default() }));
        let (_, body) = post_json(app, "/api/v1/seller-identifiers/derive", json!({"full_name": "Jean Dupont"})).await;
        assert_eq!(body["seller_identifier"], "JEAND");
        assert_eq!(body["stored_identifier"], "JEAN");
    }

    #[tokio::test]
    async fn test_derive_non_string_and_missing_names() {
        for payload in [json!({"full_name": 42}), json!({"full_name": null}), json!({}), json!({"full_name": "  ...  "})] {
            let (status, body) = post_json(app(), "/api/v1/seller-identifiers/derive", payload).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["seller_identifier"], "UNKNOWN");
            assert_eq!(body["unknown"], true);
        }
    }

    #[tokio::test]
    async fn test_derive_rejects_storage_width() {
        let (status, body) = post_json(app(), "/api/v1/seller-identifiers/derive", json!({"full_name": "Jean Dupont", "storage_width": 20})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_derive_rejects_widths_outside_the_body_type() {
        for width in [json!(300), json!(-1), json!("nine")] {
            let (status, body) = post_json(app(), "/api/v1/seller-identifiers/derive", json!({"full_name": "Jean Dupont", "storage_width": width.clone()})).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{width}");
            assert!(body["error"].as_str().is_some_and(|e| e.contains("storage_width")), "{width}: {body}");
        }
    }

    #[tokio::test]
    async fn test_malformed_body_answers_with_error_json() {
        let req = Request::builder().method("POST").uri("/api/v1/seller-identifiers/validate").header("content-type", "application/json").body(Body::from("{not json")).unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert!(!body.error.is_empty());
    }

    #[tokio::test]
    async fn test_validate() {
        let cases = [(json!("JEAND"), true), (json!("UNKNOWN"), true), (json!("jeand"), false), (json!("JEAN-D"), false), (json!(""), false), (json!(12), false), (json!(null), false)];
        for (candidate, expected) in cases {
            let (status, body) = post_json(app(), "/api/v1/seller-identifiers/validate", json!({"candidate": candidate.clone()})).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["valid"], expected, "{candidate}");
            assert_eq!(body["candidate"], candidate);
        }
    }

    #[tokio::test]
    async fn test_repair_plan() {
        let records = json!({"records": [
            {"id": "a", "full_name": "Jean Dupont", "seller_identifier": "JDUP"},
            {"id": "b", "full_name": "Société Générale Holding", "seller_identifier": "societe g"},
            {"id": "c", "full_name": "Jean Dupont"},
            {"id": "d", "full_name": "???", "seller_identifier": 7},
            {"id": "e", "full_name": "Jean Dupont", "seller_identifier": "UNKNOWN"},
            {"id": "f", "full_name": "", "seller_identifier": "UNKNOWN"},
        ]});
        let (status, body) = post_json(app(), "/api/v1/sellers/repair-plan", records).await;
        assert_eq!(status, StatusCode::OK);
        let plan: RepairPlanResponse = serde_json::from_value(body).unwrap();
        let actions: Vec<_> = plan.entries.iter().map(|e| (e.id.as_str(), e.proposed.as_str(), e.action)).collect();
        assert_eq!(actions, vec![
            ("a", "JDUP", RepairAction::Keep),
            ("b", "SOCIETEGH", RepairAction::Repair),
            ("c", "JEAND", RepairAction::Repair),
            ("d", "UNKNOWN", RepairAction::Manual),
            ("e", "JEAND", RepairAction::Repair),
            ("f", "UNKNOWN", RepairAction::Manual),
        ]);
        assert_eq!((plan.repairs, plan.manual), (3, 2));
    }

    #[tokio::test]
    async fn test_repair_plan_batch_limit() {
        let records: Vec<Value> = (0..501).map(|i| json!({"id": i.to_string(), "full_name": "Jean Dupont"})).collect();
        let (status, _) = post_json(app(), "/api/v1/sellers/repair-plan", json!({"records": records})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
