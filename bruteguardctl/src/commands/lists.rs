use anyhow::Context;
use owo_colors::OwoColorize;
use serde_json::json;
use tabled::{builder::Builder, settings::Style};

use bruteguard_core::api::{AddressListsResponse, SubnetRequest};

use super::handle_success_response;
use crate::{
    api::{get, post},
    context::AppContext,
};

async fn change_list(
    context: &AppContext,
    action: &str,
    description: &str,
    cmd: &SubnetRequest,
) -> anyhow::Result<()> {
    let ui = context.ui();
    ui.new_status_line(format!(
        "{} {} on {} ...",
        description,
        cmd.subnet.bright_blue(),
        context.server().server
    ));

    let result = post(context.server(), action, json!({ "subnet": cmd.subnet })).await?;
    handle_success_response(ui, result, &format!("{description} failed"))
}

pub async fn add_allow(context: &AppContext, cmd: &SubnetRequest) -> anyhow::Result<()> {
    change_list(context, "admin/allowlist/add", "Adding to allow list", cmd).await
}

pub async fn remove_allow(context: &AppContext, cmd: &SubnetRequest) -> anyhow::Result<()> {
    change_list(context, "admin/allowlist/remove", "Removing from allow list", cmd).await
}

pub async fn add_deny(context: &AppContext, cmd: &SubnetRequest) -> anyhow::Result<()> {
    change_list(context, "admin/denylist/add", "Adding to deny list", cmd).await
}

pub async fn remove_deny(context: &AppContext, cmd: &SubnetRequest) -> anyhow::Result<()> {
    change_list(context, "admin/denylist/remove", "Removing from deny list", cmd).await
}

pub fn format_lists(lists: &AddressListsResponse) -> String {
    let mut builder = Builder::default();
    builder.push_record(vec!["List", "Prefix"]);

    for prefix in &lists.allow {
        builder.push_record(vec!["allow", prefix.as_str()]);
    }
    for prefix in &lists.deny {
        builder.push_record(vec!["deny", prefix.as_str()]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

pub async fn show_lists(context: &AppContext) -> anyhow::Result<()> {
    let ui = context.ui();
    ui.new_status_line(format!(
        "Getting allow and deny lists from {} ...",
        context.server().server
    ));
    ui.run(async || {
        let result = get(context.server(), "admin/lists").await?;
        let lists: AddressListsResponse =
            serde_json::from_value(result).context("Failed to parse address lists")?;

        ui.success(format!(
            "{} allow and {} deny entries",
            lists.allow_count.to_string().bright_green(),
            lists.deny_count.to_string().bright_red()
        ));

        if lists.allow.is_empty() && lists.deny.is_empty() {
            return Ok("Both lists are empty.".to_string());
        }
        Ok(format_lists(&lists))
    })
    .await
}
