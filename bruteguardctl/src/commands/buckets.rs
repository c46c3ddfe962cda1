use owo_colors::OwoColorize;
use serde_json::json;

use bruteguard_core::api::{ResetAddressRequest, ResetLoginRequest, ResetPasswordRequest};

use super::handle_success_response;
use crate::{api::post, context::AppContext};

pub async fn reset_login(context: &AppContext, cmd: &ResetLoginRequest) -> anyhow::Result<()> {
    let ui = context.ui();
    ui.new_status_line(format!(
        "Resetting bucket of login '{}' on {} ...",
        cmd.login.bright_blue(),
        context.server().server
    ));

    let result = post(
        context.server(),
        "admin/buckets/reset/login",
        json!({ "login": cmd.login }),
    )
    .await?;
    handle_success_response(ui, result, "Failed to reset login bucket")
}

pub async fn reset_password(
    context: &AppContext,
    cmd: &ResetPasswordRequest,
) -> anyhow::Result<()> {
    let ui = context.ui();
    ui.new_status_line(format!(
        "Resetting password bucket on {} ...",
        context.server().server
    ));

    let result = post(
        context.server(),
        "admin/buckets/reset/password",
        json!({ "password": cmd.password }),
    )
    .await?;
    handle_success_response(ui, result, "Failed to reset password bucket")
}

pub async fn reset_address(context: &AppContext, cmd: &ResetAddressRequest) -> anyhow::Result<()> {
    let ui = context.ui();
    ui.new_status_line(format!(
        "Resetting bucket of address {} on {} ...",
        cmd.ip.bright_blue(),
        context.server().server
    ));

    let result = post(
        context.server(),
        "admin/buckets/reset/ip",
        json!({ "ip": cmd.ip }),
    )
    .await?;
    handle_success_response(ui, result, "Failed to reset address bucket")
}
