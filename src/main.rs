use receipt_splitter::{api, create_pool, ensure_schema, AppConfig, ReceiptService};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging with local timestamps
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // Configuration
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    // Database
    let pool = create_pool(&config.database).await?;
    ensure_schema(&pool).await?;
    info!("Database pool created");

    let service = Arc::new(ReceiptService::new(pool));
    let app = api::router(service).layer(ServiceBuilder::new());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST   /api/receipts/parse            - parse only");
    info!("  POST   /api/receipts/parse/batch      - parse many, in parallel");
    info!("  POST   /api/receipts                  - parse and store");
    info!("  GET    /api/receipts[/:id]            - stored receipts");
    info!("  PUT    /api/receipts/:id              - edit name/date");
    info!("  PUT    /api/receipts/:id/items/:index - edit an item");
    info!("  GET    /api/receipts/:id/items.csv    - CSV export");
    info!("  POST   /api/receipts/:id/breakdown    - per-person split");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
