use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use invite_common::models::payload::{
    ActivateCodeIn, ActivateCodeOut, CheckAddressOut, CheckCodeOut, GenerateCodeIn,
    GenerateCodeOut, InviteCodeDetailOut,
};

use crate::api::error::ApiError;
use crate::context::AppContext;

pub async fn check_code(
    State(ctx): State<Arc<AppContext>>,
    Path(code): Path<String>,
) -> Result<Json<CheckCodeOut>, ApiError> {
    let can_use = ctx.service.check_code(&code).await?;
    Ok(Json(CheckCodeOut { can_use }))
}

pub async fn check_address(
    State(ctx): State<Arc<AppContext>>,
    Path(address): Path<String>,
) -> Result<Json<CheckAddressOut>, ApiError> {
    let status = ctx.service.check_address(&address).await?;
    Ok(Json(CheckAddressOut { is_activated: status.is_activated() }))
}

pub async fn activate(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<ActivateCodeIn>, JsonRejection>,
) -> Result<Json<ActivateCodeOut>, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let outcome = ctx.service.activate(&payload.code, &payload.address).await?;
    Ok(Json(ActivateCodeOut::from(&outcome)))
}

pub async fn generate(
    State(ctx): State<Arc<AppContext>>,
    payload: Result<Json<GenerateCodeIn>, JsonRejection>,
) -> Result<Json<Vec<GenerateCodeOut>>, ApiError> {
    let Json(payload) = payload?;
    let count = payload.checked_count(ctx.service.max_codes_per_request())?;

    let created = ctx
        .service
        .generate(count, payload.creator_address(), payload.creator_type)
        .await?;
    Ok(Json(created.iter().map(GenerateCodeOut::from).collect()))
}

pub async fn get_address_code(
    State(ctx): State<Arc<AppContext>>,
    Path(address): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let codes = ctx.service.list_unused_codes_by_creator(&address).await?;
    Ok(Json(codes))
}

/// Responds with JSON `null` for unknown codes.
pub async fn get_code_detail(
    State(ctx): State<Arc<AppContext>>,
    Path(code): Path<String>,
) -> Result<Json<Option<InviteCodeDetailOut>>, ApiError> {
    let detail = ctx.service.get_code_detail(&code).await?;
    Ok(Json(detail.as_ref().map(InviteCodeDetailOut::from)))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
