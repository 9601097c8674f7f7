//! # Car Rental Desk
//!
//! Console application: configuration, password hashing, email,
//! the [`service::RentalService`] and the menu shell.
//!
//! ## Module Organization
//! ```text
//! rental_cli/
//! ├── lib.rs          ◄─── Startup (run, tracing)
//! ├── config.rs       ◄─── Environment / .env configuration
//! ├── error.rs        ◄─── AppError for every service operation
//! ├── auth.rs         ◄─── argon2 password hashing
//! ├── notify.rs       ◄─── SMTP and dry-run notifiers
//! ├── service.rs      ◄─── RentalService (all user actions)
//! ├── seed.rs         ◄─── Demo fleet and default accounts
//! └── shell/          ◄─── Numbered console menus
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod notify;
pub mod seed;
pub mod service;
pub mod shell;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use rental_db::{Database, DbConfig};
use service::RentalService;

/// Runs the application.
///
/// ## Startup Sequence
/// ```text
/// 1. Load configuration (.env, then environment)
/// 2. Initialize logging (stderr, RUST_LOG)
/// 3. Open the SQLite database and apply migrations
/// 4. Seed demo data (RENTAL_SEED_DEMO)
/// 5. Build RentalService with the configured notifier
/// 6. Hand over to the console shell
/// ```
pub async fn run() -> anyhow::Result<()> {
    // Loaded first so RUST_LOG from .env applies
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing();

    info!(
        db_path = %config.db_path.display(),
        dry_run = config.email.dry_run,
        "Starting car rental desk"
    );

    let db = Database::new(DbConfig::new(&config.db_path))
        .await
        .context("Failed to open database")?;

    if config.seed_demo {
        seed::seed_demo_data(&db)
            .await
            .context("Failed to seed demo data")?;
    }

    let service = RentalService::new(
        db.clone(),
        notify::from_config(&config.email),
        config.bill_export_dir.clone(),
    );

    let outcome = shell::run(&service).await;

    db.close().await;
    outcome.context("Console input failed")
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so they never interleave with menu output on stdout.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show queries and login attempts
/// - `RUST_LOG=rental_db=trace` - Trace one crate only
/// - Default: warnings, plus info from the rental crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,rental=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
