use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};

/// Main entry point for the dengue notification API
///
/// Serves the REST API (notifications, users, health and Swagger UI) from an in-memory
/// store. Data does not survive a restart.
///
/// # Environment Variables
/// - `DENGUE_API_ADDR`: REST server address (default: "0.0.0.0:5000")
/// - `RUST_LOG`: extra tracing directives
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dengue_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("DENGUE_API_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".into());

    tracing::info!("++ Starting dengue REST API on {}", rest_addr);
    tracing::info!("++ Swagger UI at /swagger-ui");

    let app = router(AppState::new());
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
