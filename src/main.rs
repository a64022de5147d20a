use clap::Parser;
use recipe_finder::{
    api::{handlers::AppState, routes},
    cli::{Cli, Commands},
    config::Settings,
    provider::RecipeClient,
    Error, Result,
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recipe_finder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    let client = RecipeClient::new(&settings.provider)?;

    // Handle commands
    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, client, port, host).await?;
        }
        Commands::Search {
            query,
            cuisine,
            max_time,
            page,
        } => {
            recipe_finder::cli::commands::search(&client, query, cuisine, max_time, page).await?;
        }
        Commands::Show { id } => {
            recipe_finder::cli::commands::show(&client, &id).await?;
        }
    }

    Ok(())
}

async fn serve(
    mut settings: Settings,
    client: RecipeClient,
    port: Option<u16>,
    host: Option<String>,
) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting Recipe Finder server");
    info!("Recipe provider: {}", settings.provider.base_url);
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    let state = AppState {
        client,
        settings: settings.clone(),
    };

    // Create router with rate limiting
    let app = routes::create_router(state, &settings)?;

    // Start server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Recipe Finder");
    println!("========================================");
    println!("Address: http://{addr}");
    println!("Provider: {}", settings.provider.base_url);
    println!("\nPages:");
    println!("  GET  /");
    println!("  GET  /recipes");
    println!("  GET  /recipes/:id");
    println!("\nAPI Endpoints:");
    println!("  GET  /api/search");
    println!("  GET  /api/recipes/:id");
    println!("  GET  /health");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    // Connect info feeds the per-IP rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}
