use std::sync::Arc;

use auth::TokenService;
use exchange_service::config::Config;
use exchange_service::domain::account::service::AccountService;
use exchange_service::inbound::http::router::create_router;
use exchange_service::outbound::gateway::ApiLayerCurrencyGateway;
use exchange_service::outbound::repositories::PostgresCredentialStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "exchange_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "exchange-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    // A missing or unusable signing setup fails here, before anything binds.
    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_algorithm = %config.jwt.algorithm,
        token_ttl_minutes = config.jwt.ttl_minutes,
        currency_api = %config.currency.base_url,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_service = Arc::new(TokenService::new(
        config.jwt.secret.as_bytes(),
        config.jwt.algorithm()?,
        config.jwt.ttl(),
    ));

    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool));
    let account_service = Arc::new(AccountService::new(
        Arc::clone(&credential_store),
        Arc::clone(&token_service),
    )?);
    let currency_gateway = Arc::new(ApiLayerCurrencyGateway::new(
        config.currency.base_url.clone(),
        config.currency.api_key.clone(),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(account_service, currency_gateway, token_service);
    axum::serve(http_listener, application).await?;

    Ok(())
}
