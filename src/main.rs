//! Slidegate application entry point.
//!
//! Bootstraps the server:
//! 1. Load configuration from environment
//! 2. Check the bot token with `getMe`
//! 3. Connect to Redis (and seed demo presentations if `AUTO_SEED`)
//! 4. Build router with page routes + static file serving
//! 5. Apply security headers middleware
//! 6. Start Axum server
//!
//! Also supports `seed` (upsert demo presentations) and `chat-ids` (log the
//! IDs of chats the bot can see) subcommands.

use slidegate::{
    auth::middleware::AppState,
    config::{bot_credentials_from_env, Config},
    discovery,
    middleware::security_headers,
    routes, seed,
    storage::RedisPresentationStore,
    telegram::BotClient,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

fn print_usage() {
    eprintln!("Usage: slidegate [seed | chat-ids]");
    eprintln!();
    eprintln!("  (no args)  Run the web server");
    eprintln!("  seed       Upsert the demo presentations into Redis");
    eprintln!("  chat-ids   Log the ID of every chat the bot sees (Ctrl+C to stop)");
}

async fn connect_store(config: &Config) -> RedisPresentationStore {
    let redis_client = redis::Client::open(config.redis_url.as_str()).expect("Invalid Redis URL");

    // Verify Redis connection
    redis_client
        .get_multiplexed_async_connection()
        .await
        .expect("Failed to connect to Redis");

    RedisPresentationStore::new(redis_client)
}

#[tokio::main]
async fn main() {
    // Initialize tracing with env filter support (RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        None => {}
        Some("seed") => {
            let config = Config::from_env().expect("Failed to load config");
            let store = connect_store(&config).await;
            let count = seed::seed(&store).await.expect("Failed to seed presentations");
            tracing::info!("Seeded {} presentations", count);
            return;
        }
        Some("chat-ids") => {
            let (token, api_base) = bot_credentials_from_env().expect("Failed to load config");
            let client = BotClient::with_base_url(token, api_base);
            let me = client.get_me().await.expect("Bot token rejected by Telegram");
            tracing::info!(
                "Authorized as @{}. Post something in your channel or add the bot to it.",
                me.username.unwrap_or_default()
            );
            discovery::run_discovery_loop(&client).await;
            return;
        }
        Some(_) => {
            print_usage();
            std::process::exit(1);
        }
    }

    // Load config from environment
    let config = Config::from_env().expect("Failed to load config");
    tracing::info!("Starting slidegate on {}", config.bind_addr);

    // Fail fast on a bad token
    let client = BotClient::with_base_url(
        config.bot_token.clone(),
        config.telegram_api_base.clone(),
    );
    let me = client.get_me().await.expect("Bot token rejected by Telegram");
    tracing::info!(
        bot_id = me.id,
        "Authorized as @{}",
        me.username.as_deref().unwrap_or(&me.first_name)
    );

    let store = connect_store(&config).await;
    if config.auto_seed {
        let count = seed::seed(&store).await.expect("Failed to seed presentations");
        tracing::info!("Seeded {} presentations", count);
    }

    let bind_addr = config.bind_addr;
    let state = AppState::new(config, Arc::new(store), Arc::new(client));

    // Explicit CORS: deny all cross-origin requests (single-origin deployment).
    let cors = CorsLayer::new();

    let app = routes::router()
        .nest_service("/static", ServeDir::new("static"))
        .layer(cors)
        .layer(axum::middleware::from_fn(security_headers))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .expect("Failed to bind");
    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
