//! Reliefdesk - disaster-relief coordination client
//!
#![doc = "Main entry point for the Reliefdesk terminal client."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reliefdesk::cli::{Cli, Commands};
use reliefdesk::commands::{self, Context};
use reliefdesk::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    if !config.ui.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Shell { path } => {
            tracing::info!("Starting interactive shell at {}", path);
            commands::shell::run_shell(config, &path).await
        }
        Commands::Login { username, password } => {
            let mut ctx = Context::bootstrap(config).await?;
            commands::session::run_login(&mut ctx, username, password).await
        }
        Commands::Logout => {
            let mut ctx = Context::bootstrap(config).await?;
            commands::session::run_logout(&mut ctx).await
        }
        Commands::Whoami => {
            let ctx = Context::bootstrap(config).await?;
            commands::session::run_whoami(&ctx)
        }
        Commands::Open { path, list, page } => {
            tracing::debug!("Opening {} (page {})", path, page);
            let ctx = Context::bootstrap(config).await?;
            commands::view::run_open(&ctx, &path, &list, page).await
        }
        Commands::Export { path, list, output } => {
            let ctx = Context::bootstrap(config).await?;
            commands::view::run_export(&ctx, &path, &list, output)
                .await
                .map(|_| ())
        }
        Commands::Get { path, id } => {
            let ctx = Context::bootstrap(config).await?;
            commands::records::run_get(&ctx, &path, id).await
        }
        Commands::Create { path, data } => {
            let ctx = Context::bootstrap(config).await?;
            commands::records::run_create(&ctx, &path, &data)
                .await
                .map(|_| ())
        }
        Commands::Update { path, id, data } => {
            let ctx = Context::bootstrap(config).await?;
            commands::records::run_update(&ctx, &path, id, &data).await
        }
        Commands::Delete { path, id } => {
            let ctx = Context::bootstrap(config).await?;
            commands::records::run_delete(&ctx, &path, id).await
        }
        Commands::Health => {
            let ctx = Context::bootstrap(config).await?;
            commands::health::run_health(&ctx).await
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "reliefdesk=debug"
    } else {
        "reliefdesk=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
