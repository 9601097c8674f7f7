//! `car-rental` binary entry point.

// One user at a keyboard; a single-threaded runtime is enough for sqlx and lettre
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    rental_cli::run().await
}
