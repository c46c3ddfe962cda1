use anyhow::Context;
use bruteguard::{
    api::router::ApiRoutes,
    app_state::AppState,
    http::setup_http_server,
    init_telemetry::init_tracing,
    settings::config::Settings,
    stop_flag::register_signal_handler,
};
use bruteguard_core::stop_flag::StopFlag;
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "bruteguard")]
#[command(about = "Brute-force protection for login endpoints")]
#[clap(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser)]
enum Commands {
    /// Show current configuration and exit
    Config,
    /// Start the bruteguard server (default)
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Existing environment variables win, then .env.local, then .env
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::new().context("Failed to load configuration")?;

    match cli.command.as_ref().unwrap_or(&Commands::Run) {
        Commands::Config => {
            println!("{:#?}", &settings);
            return Ok(());
        }
        Commands::Run => {}
    }

    init_tracing(&settings.logging.level)?;

    let stop_flag = StopFlag::new();
    register_signal_handler(&stop_flag);

    let app_state = AppState::new(settings).await?;

    let mut handles = vec![];

    handles.push(
        setup_http_server(
            "auth",
            ApiRoutes::auth(app_state.clone()),
            &app_state.settings.auth.bind_address,
            stop_flag.clone(),
        )
        .await
        .context("Failed to start auth server")?,
    );
    handles.push(
        setup_http_server(
            "admin",
            ApiRoutes::admin(app_state.clone()),
            &app_state.settings.admin.bind_address,
            stop_flag.clone(),
        )
        .await
        .context("Failed to start admin server")?,
    );

    let sweeper = app_state.rate_limiter.spawn_sweeper(stop_flag.clone());

    for handle in handles {
        handle.await??;
    }
    // Covers a server exiting on its own before any signal.
    stop_flag.stop();
    sweeper.await?;

    info!("All tasks are done");
    Ok(())
}
