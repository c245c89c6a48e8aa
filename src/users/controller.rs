use axum::{
    body::Bytes,
    extract::State,
    response::Json,
};
use crate::core::command::Command;
use crate::core::controller::{ApiResponse, ApiResult, AppState, json_to_server_error};
use crate::users::command::sign_up_cmd::SignUpCommand;
use crate::users::dto::{SignUpRequest, SignUpResponse};

// the body is decoded here rather than by the Json extractor so malformed input still gets the error envelope
pub(crate) async fn sign_up(
    State(state): State<AppState>,
    body: Bytes) -> ApiResult<SignUpResponse> {
    let req: SignUpRequest = serde_json::from_slice(&body).map_err(json_to_server_error)?;
    let res = SignUpCommand::new(state.user_service).execute(req).await?;
    Ok(Json(ApiResponse::success("Sign-up completed successfully.", res)))
}
