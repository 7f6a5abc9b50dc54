//! Wildreach
//!
//! Main entry point that delegates to the app module.

mod app;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Wildreach...");
    app::run_game();
}
