use bruteguard_core::api::{ResetAddressRequest, ResetLoginRequest, ResetPasswordRequest, SubnetRequest};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "bruteguardctl")]
#[command(about = "Administer a running bruteguard service")]
#[command(version)]
pub struct Cli {
    /// Base URL of the bruteguard admin API
    #[arg(long, env = "BRUTEGUARD_SERVER", default_value = "http://127.0.0.1:21351")]
    pub server: String,

    #[arg(long, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reset the rate-limit bucket of a login
    #[command(name = "bucket:reset-login")]
    BucketResetLogin(ResetLoginRequest),
    /// Reset the rate-limit bucket of a password
    #[command(name = "bucket:reset-password")]
    BucketResetPassword(ResetPasswordRequest),
    /// Reset the rate-limit bucket of an IP address
    #[command(name = "bucket:reset-ip")]
    BucketResetIp(ResetAddressRequest),

    /// Add a network prefix to the allow list
    #[command(name = "allowlist:add")]
    AllowlistAdd(SubnetRequest),
    /// Remove a network prefix from the allow list
    #[command(name = "allowlist:remove")]
    AllowlistRemove(SubnetRequest),
    /// Add a network prefix to the deny list
    #[command(name = "denylist:add")]
    DenylistAdd(SubnetRequest),
    /// Remove a network prefix from the deny list
    #[command(name = "denylist:remove")]
    DenylistRemove(SubnetRequest),
    /// Show the allow and deny lists
    #[command(name = "lists:show")]
    ListsShow,

    /// Show shell completion script.
    #[command(name = "completion")]
    Completion(CompletionCommand),
}

#[derive(Debug, Parser)]
pub struct CompletionCommand {
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn print_completions<G: clap_complete::Generator>(gen: G, cmd: &mut clap::Command) {
    clap_complete::generate(gen, cmd, cmd.get_name().to_string(), &mut std::io::stdout());
}
