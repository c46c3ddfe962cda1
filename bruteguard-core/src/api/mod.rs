//! JSON payloads exchanged between the service and its clients.

use serde::{Deserialize, Serialize};

/// A login attempt submitted to the auth front door
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct LoginAttemptRequest {
    pub login: String,
    pub password: String,
    /// Source address of the attempt
    pub ip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct LoginAttemptResponse {
    /// Whether the attempt may proceed
    pub ok: bool,
}

/// Clear the rate-limit bucket of a login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::Parser))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ResetLoginRequest {
    /// Login to unblock
    pub login: String,
}

/// Clear the rate-limit bucket of a password
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::Parser))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ResetPasswordRequest {
    /// Password to unblock
    pub password: String,
}

/// Clear the rate-limit bucket of a source address
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::Parser))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct ResetAddressRequest {
    /// IP address to unblock
    pub ip: String,
}

/// A network prefix for the allow or deny list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::Parser))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct SubnetRequest {
    /// CIDR prefix (e.g. 10.0.0.0/8) or a single address
    pub subnet: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        SuccessResponse {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct AddressListsResponse {
    pub allow: Vec<String>,
    pub deny: Vec<String>,
    pub allow_count: usize,
    pub deny_count: usize,
}
