use std::net::IpAddr;

use axum::{extract::State, response::IntoResponse, Json};
use bruteguard_core::{
    admission::Credentials,
    api::{LoginAttemptRequest, LoginAttemptResponse},
};
use tracing::error;

use crate::{api::error::AppError, app_state::SharedAppState};

#[utoipa::path(
    post,
    path = "/api/v1/auth/check",
    request_body = LoginAttemptRequest,
    responses(
    (status = 200, description = "Admission decision", body = LoginAttemptResponse),
    (status = 400, description = "Source address is not a valid IP address"),
    (status = 500, description = "Decision could not be made, attempt must be rejected"),
    )
)]
pub async fn check_login_attempt_handler(
    State(state): State<SharedAppState>,
    Json(payload): Json<LoginAttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    let addr: IpAddr = payload
        .ip
        .trim()
        .parse()
        .map_err(|_| AppError::invalid_ip(&payload.ip))?;

    let credentials = Credentials::new(payload.login, payload.password);
    let ok = state
        .admission
        .admit(&credentials, addr)
        .await
        .map_err(|e| {
            error!("Admission check failed: {}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(LoginAttemptResponse { ok }))
}
