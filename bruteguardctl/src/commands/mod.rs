pub mod buckets;
pub mod lists;

use bruteguard_core::api::SuccessResponse;

use crate::utils::ui::Ui;

/// Helper function to handle success responses from admin API calls
fn handle_success_response(
    ui: &Ui,
    result: serde_json::Value,
    error_prefix: &str,
) -> anyhow::Result<()> {
    let response: SuccessResponse = serde_json::from_value(result)?;
    if response.success {
        ui.success(response.message);
        Ok(())
    } else {
        Err(anyhow::anyhow!("{}: {}", error_prefix, response.message))
    }
}
