use axum::routing::{get, post};
use axum::{Json, Router};
use bruteguard_core::api::{
    AddressListsResponse, LoginAttemptRequest, LoginAttemptResponse, ResetAddressRequest,
    ResetLoginRequest, ResetPasswordRequest, SubnetRequest, SuccessResponse,
};
use utoipa::OpenApi;

use crate::api::handlers::admin::{
    __path_add_allow_handler, __path_add_deny_handler, __path_lists_handler,
    __path_remove_allow_handler, __path_remove_deny_handler, __path_reset_address_handler,
    __path_reset_login_handler, __path_reset_password_handler, add_allow_handler,
    add_deny_handler, lists_handler, remove_allow_handler, remove_deny_handler,
    reset_address_handler, reset_login_handler, reset_password_handler,
};
use crate::api::handlers::auth::{__path_check_login_attempt_handler, check_login_attempt_handler};
use crate::api::handlers::health::{__path_health_checker_handler, health_checker_handler};
use crate::app_state::SharedAppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_checker_handler,
        check_login_attempt_handler,
        reset_login_handler,
        reset_password_handler,
        reset_address_handler,
        add_allow_handler,
        remove_allow_handler,
        add_deny_handler,
        remove_deny_handler,
        lists_handler,
    ),
    components(
        schemas(
            LoginAttemptRequest, LoginAttemptResponse, ResetLoginRequest,
            ResetPasswordRequest, ResetAddressRequest, SubnetRequest,
            SuccessResponse, AddressListsResponse
        )
    ),
    tags(
        (name = "bruteguard-service", description = "bruteguard api")
    )
)]
pub struct ApiDoc;

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub struct ApiRoutes;

impl ApiRoutes {
    /// Front door consulted by the authentication service.
    pub fn auth(state: SharedAppState) -> Router {
        Router::new()
            .route("/api/v1/auth/check", post(check_login_attempt_handler))
            .route("/api/v1/health", get(health_checker_handler))
            .with_state(state)
    }

    pub fn admin(state: SharedAppState) -> Router {
        Router::new()
            .route(
                "/api/v1/admin/buckets/reset/login",
                post(reset_login_handler),
            )
            .route(
                "/api/v1/admin/buckets/reset/password",
                post(reset_password_handler),
            )
            .route(
                "/api/v1/admin/buckets/reset/ip",
                post(reset_address_handler),
            )
            .route("/api/v1/admin/allowlist/add", post(add_allow_handler))
            .route("/api/v1/admin/allowlist/remove", post(remove_allow_handler))
            .route("/api/v1/admin/denylist/add", post(add_deny_handler))
            .route("/api/v1/admin/denylist/remove", post(remove_deny_handler))
            .route("/api/v1/admin/lists", get(lists_handler))
            .route("/api/v1/health", get(health_checker_handler))
            .route("/api/v1/openapi.json", get(openapi_handler))
            .with_state(state)
    }
}
