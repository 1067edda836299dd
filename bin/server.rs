// Marine Voting System - Web Server
// Serves the JSON voting API; the voter identity is the client address

use std::net::SocketAddr;

use marine_voting::api::{router, AppState};
use marine_voting::{Config, Store};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marine_voting=info,tower_http=info".into()),
        )
        .init();

    let config = Config::load();

    if !config.db_path.exists() {
        eprintln!("❌ Database not found at {:?}", config.db_path);
        eprintln!("   Run: marine-voting seed");
        eprintln!("   to create and seed it first.");
        std::process::exit(1);
    }

    let store = Store::open(&config.db_path).expect("Failed to open database");
    info!(path = %config.db_path.display(), timezone = %config.timezone, "database opened");

    let state = AppState::new(store, config.timezone, config.leaderboard_limit);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("🚀 Server running on http://localhost:{}", config.port);
    println!("   API: http://localhost:{}/api/animals", config.port);
    println!("\n   Press Ctrl+C to stop\n");

    // Connect info feeds the per-request voter identity
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}
