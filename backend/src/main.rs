//! Watchlist entry-point: one binary carrying the HTTP server and the
//! bootstrap commands (`initdb`, `forge`, `admin`).

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use watchlist_backend::domain::ports::UserStore;
use watchlist_backend::domain::{PasswordDigest, UserDraft};
use watchlist_backend::inbound::http::state::HttpState;
use watchlist_backend::outbound::persistence::{open_db, seed_example_data, SqliteStore};
use watchlist_backend::server::{self, ServerConfig};

#[derive(Parser)]
#[command(name = "watchlist", about = "Single-tenant movie watchlist")]
struct Cli {
    /// SQLite database file.
    #[arg(long, env = "DATABASE_FILE", default_value = "data.db")]
    database: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server.
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1:5000")]
        bind: SocketAddr,
    },
    /// Initialize the database schema.
    Initdb {
        /// Create after drop.
        #[arg(long)]
        drop: bool,
    },
    /// Seed the default display name and ten example movies.
    Forge,
    /// Create or update the administrator credentials.
    Admin {
        /// The username used to login.
        #[arg(long)]
        username: String,
        /// The password used to login.
        #[arg(long)]
        password: String,
    },
}

fn load_session_key() -> color_eyre::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(eyre!("failed to read session key at {key_path}: {e}"))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let store = Arc::new(SqliteStore::new(open_db(&cli.database)?));

    match cli.command {
        Command::Serve { bind } => {
            let key = load_session_key()?;
            let cookie_secure = env::var("SESSION_COOKIE_SECURE")
                .map(|v| v != "0")
                .unwrap_or(true);
            let config = ServerConfig::new(key, cookie_secure, SameSite::Lax, bind);
            let state = HttpState::new(store.clone(), store);
            info!(addr = %config.bind_addr(), "watchlist listening");
            server::run(config, state).await?;
        }
        Command::Initdb { drop } => {
            // Opening the database already applies the schema; --drop
            // recreates it from scratch.
            if drop {
                store.recreate_schema()?;
            }
            info!("initialized database");
        }
        Command::Forge => {
            seed_example_data(&store)?;
            info!("seeded example data");
        }
        Command::Admin { username, password } => {
            let digest = PasswordDigest::generate(&password)?;
            match store.admin()? {
                Some(user) => {
                    info!("updating administrator");
                    store.set_credentials(user.id, &username, &digest)?;
                }
                None => {
                    info!("creating administrator");
                    store.create(&UserDraft {
                        display_name: "Admin".to_owned(),
                        username,
                        password_hash: Some(digest),
                    })?;
                }
            }
            info!("done");
        }
    }
    Ok(())
}
