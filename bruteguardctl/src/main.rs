use bruteguardctl::{
    cli::{print_completions, Cli, Commands},
    commands,
    context::{AppContext, ServerSettings},
};
use clap::{CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let app_context = AppContext::new(ServerSettings {
        server: cli.server.clone(),
    });

    info!("Running command {:?} ...", &cli.command);

    let result = match &cli.command {
        Commands::BucketResetLogin(cmd) => commands::buckets::reset_login(&app_context, cmd).await,
        Commands::BucketResetPassword(cmd) => {
            commands::buckets::reset_password(&app_context, cmd).await
        }
        Commands::BucketResetIp(cmd) => commands::buckets::reset_address(&app_context, cmd).await,
        Commands::AllowlistAdd(cmd) => commands::lists::add_allow(&app_context, cmd).await,
        Commands::AllowlistRemove(cmd) => commands::lists::remove_allow(&app_context, cmd).await,
        Commands::DenylistAdd(cmd) => commands::lists::add_deny(&app_context, cmd).await,
        Commands::DenylistRemove(cmd) => commands::lists::remove_deny(&app_context, cmd).await,
        Commands::ListsShow => commands::lists::show_lists(&app_context).await,
        Commands::Completion(cmd) => {
            let mut cli_cmd = Cli::command();
            print_completions(cmd.shell, &mut cli_cmd);
            Ok(())
        }
    };

    if let Err(e) = &result {
        app_context.ui().failed(e.to_string());
    }
    app_context.ui().clear();

    result
}
