use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{AppState, ErrorResponse};
use crate::error::MemberError;
use crate::usecase::create_member::CreateMemberInput;
use crate::usecase::list_members::ListMembersInput;
use crate::usecase::update_member::UpdateMemberInput;

impl IntoResponse for MemberError {
    fn into_response(self) -> Response {
        match &self {
            MemberError::Validation(msg) => {
                ErrorResponse::new("MEMBER_VALIDATION_ERROR", msg)
                    .into_response_with(StatusCode::BAD_REQUEST)
            }
            MemberError::NotFound(_) => ErrorResponse::new("MEMBER_NOT_FOUND", &self.to_string())
                .into_response_with(StatusCode::NOT_FOUND),
            MemberError::Internal(msg) => {
                tracing::error!(error = %msg, "member operation failed");
                ErrorResponse::new("INTERNAL_ERROR", "internal server error")
                    .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

fn parse_member_id(raw: &str) -> Result<Uuid, MemberError> {
    Uuid::parse_str(raw).map_err(|_| MemberError::Validation(format!("invalid member id: {raw}")))
}

pub async fn create_member(
    State(state): State<AppState>,
    payload: Result<Json<CreateMemberInput>, JsonRejection>,
) -> Result<impl IntoResponse, MemberError> {
    let Json(input) = payload.map_err(|e| MemberError::Validation(e.body_text()))?;
    let member = state.create_member_uc.execute(input).await?;
    Ok((StatusCode::OK, Json(member)))
}

pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, MemberError> {
    let id = parse_member_id(&id)?;
    let member = state.get_member_uc.execute(id).await?;
    Ok(Json(member))
}

pub async fn list_members(
    State(state): State<AppState>,
    params: Result<Query<ListMembersInput>, QueryRejection>,
) -> Result<impl IntoResponse, MemberError> {
    let Query(input) = params.map_err(|e| MemberError::Validation(e.body_text()))?;
    let page = state.list_members_uc.execute(input).await?;
    Ok(Json(page))
}

pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateMemberInput>, JsonRejection>,
) -> Result<impl IntoResponse, MemberError> {
    let id = parse_member_id(&id)?;
    let Json(input) = payload.map_err(|e| MemberError::Validation(e.body_text()))?;
    let member = state.update_member_uc.execute(id, input).await?;
    Ok(Json(member))
}

pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, MemberError> {
    let id = parse_member_id(&id)?;
    state.delete_member_uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/members のクエリパラメータ。
#[derive(Debug, Deserialize)]
pub struct DeleteMembersParams {
    #[serde(default)]
    pub ids: String,
}

pub async fn delete_members(
    State(state): State<AppState>,
    Query(params): Query<DeleteMembersParams>,
) -> Result<StatusCode, MemberError> {
    state.delete_members_uc.execute(&params.ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
