use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use clap::{Parser, Subcommand, ValueEnum};
use minichat::{db, identity_app, room_app, wait_for_shutdown, AppState, Config};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "minichat", about = "Identity and room services for minichat")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP services.
    Serve {
        /// Run only one of the two services.
        #[arg(long, value_enum)]
        only: Option<Service>,
    },
    /// Apply pending database migrations and exit.
    Migrate,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Service {
    Identity,
    Rooms,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("minichat=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    tracing::debug!(?config, "loaded config");

    let db_pool = db::connect(&config.database_url)
        .await
        .context("connecting to database")?;

    match cli.command {
        Command::Migrate => {
            db::migrate(&db_pool).await.context("running migrations")?;
            tracing::info!("migrations applied");
        }
        Command::Serve { only } => {
            let app_state = AppState::new(&config, db_pool.clone());
            let identity = serve("identity", config.user_addr, identity_app(app_state.clone()));
            let rooms = serve("rooms", config.room_addr, room_app(app_state));

            match only {
                Some(Service::Identity) => identity.await?,
                Some(Service::Rooms) => rooms.await?,
                None => {
                    tokio::try_join!(identity, rooms)?;
                }
            }
        }
    }

    db_pool.close().await;
    Ok(())
}

async fn serve(name: &'static str, addr: SocketAddr, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {name} service to {addr}"))?;
    tracing::info!(%addr, "{name} service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown(tokio::signal::ctrl_c()))
        .await?;

    tracing::info!("{name} service stopped");
    Ok(())
}
