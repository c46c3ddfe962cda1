use std::net::IpAddr;

use axum::{extract::State, response::IntoResponse, Json};
use bruteguard_core::{
    address_list::Prefix,
    api::{
        AddressListsResponse, ResetAddressRequest, ResetLoginRequest, ResetPasswordRequest,
        SubnetRequest, SuccessResponse,
    },
};

use crate::{api::error::AppError, app_state::SharedAppState};

fn parse_prefix(payload: &SubnetRequest) -> Result<Prefix, AppError> {
    Ok(Prefix::parse(&payload.subnet)?)
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/buckets/reset/login",
    request_body = ResetLoginRequest,
    responses(
        (status = 200, body = SuccessResponse),
        (status = 404, description = "No bucket for this login"),
    )
)]
pub async fn reset_login_handler(
    State(state): State<SharedAppState>,
    Json(payload): Json<ResetLoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.admin.reset_login_bucket(&payload.login).await?;
    Ok(Json(SuccessResponse::new(format!(
        "Bucket for login '{}' reset",
        payload.login
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/buckets/reset/password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, body = SuccessResponse),
        (status = 404, description = "No bucket for this password"),
    )
)]
pub async fn reset_password_handler(
    State(state): State<SharedAppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.admin.reset_password_bucket(&payload.password).await?;
    Ok(Json(SuccessResponse::new("Bucket for password reset")))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/buckets/reset/ip",
    request_body = ResetAddressRequest,
    responses(
        (status = 200, body = SuccessResponse),
        (status = 400, description = "Not a valid IP address"),
        (status = 404, description = "No bucket for this address"),
    )
)]
pub async fn reset_address_handler(
    State(state): State<SharedAppState>,
    Json(payload): Json<ResetAddressRequest>,
) -> Result<impl IntoResponse, AppError> {
    let addr: IpAddr = payload
        .ip
        .trim()
        .parse()
        .map_err(|_| AppError::invalid_ip(&payload.ip))?;
    state.admin.reset_address_bucket(addr).await?;
    Ok(Json(SuccessResponse::new(format!(
        "Bucket for address {addr} reset"
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/allowlist/add",
    request_body = SubnetRequest,
    responses(
        (status = 200, body = SuccessResponse),
        (status = 400, description = "Invalid network prefix"),
        (status = 409, description = "Prefix already in the allow or deny list"),
    )
)]
pub async fn add_allow_handler(
    State(state): State<SharedAppState>,
    Json(payload): Json<SubnetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let prefix = parse_prefix(&payload)?;
    state.admin.add_allow(prefix).await?;
    Ok(Json(SuccessResponse::new(format!(
        "{prefix} added to allow list"
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/allowlist/remove",
    request_body = SubnetRequest,
    responses(
        (status = 200, body = SuccessResponse),
        (status = 400, description = "Invalid network prefix"),
        (status = 404, description = "Prefix not in the allow list"),
    )
)]
pub async fn remove_allow_handler(
    State(state): State<SharedAppState>,
    Json(payload): Json<SubnetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let prefix = parse_prefix(&payload)?;
    state.admin.remove_allow(prefix).await?;
    Ok(Json(SuccessResponse::new(format!(
        "{prefix} removed from allow list"
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/denylist/add",
    request_body = SubnetRequest,
    responses(
        (status = 200, body = SuccessResponse),
        (status = 400, description = "Invalid network prefix"),
        (status = 409, description = "Prefix already in the allow or deny list"),
    )
)]
pub async fn add_deny_handler(
    State(state): State<SharedAppState>,
    Json(payload): Json<SubnetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let prefix = parse_prefix(&payload)?;
    state.admin.add_deny(prefix).await?;
    Ok(Json(SuccessResponse::new(format!(
        "{prefix} added to deny list"
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/denylist/remove",
    request_body = SubnetRequest,
    responses(
        (status = 200, body = SuccessResponse),
        (status = 400, description = "Invalid network prefix"),
        (status = 404, description = "Prefix not in the deny list"),
    )
)]
pub async fn remove_deny_handler(
    State(state): State<SharedAppState>,
    Json(payload): Json<SubnetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let prefix = parse_prefix(&payload)?;
    state.admin.remove_deny(prefix).await?;
    Ok(Json(SuccessResponse::new(format!(
        "{prefix} removed from deny list"
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/lists",
    responses(
        (status = 200, body = AddressListsResponse),
    )
)]
pub async fn lists_handler(
    State(state): State<SharedAppState>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.admin.list_summary().await?))
}
