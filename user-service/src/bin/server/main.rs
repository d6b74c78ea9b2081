use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::KeyPair;
use auth::PasswordHasher;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::config::DatabaseConfig;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;
use user_service::outbound::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let storage = match config.database {
        Some(_) => "postgresql",
        None => "memory",
    };

    tracing::info!(
        http_port = config.server.http_port,
        storage,
        jwt_expiration_hours = config.jwt.expiration_hours,
        scrypt_log_n = config.password.log_n,
        "Configuration loaded"
    );

    let keys = KeyPair::from_files(&config.jwt.private_key_path, &config.jwt.public_key_path)?;
    let password_hasher = PasswordHasher::with_cost(config.password.cost())?;
    let authenticator = Arc::new(Authenticator::new(
        password_hasher,
        JwtHandler::new(keys, config.jwt.expiration_hours)?,
    ));
    tracing::info!(algorithm = ?auth::jwt::handler::ALGORITHM, "Signing keys loaded");

    let user_service: Arc<dyn UserServicePort> = match &config.database {
        Some(database) => {
            let repository = Arc::new(connect_postgres(database).await?);
            Arc::new(UserService::new(repository, Arc::clone(&authenticator)))
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory");
            let repository = Arc::new(InMemoryUserRepository::new());
            Arc::new(UserService::new(repository, Arc::clone(&authenticator)))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}

async fn connect_postgres(database: &DatabaseConfig) -> Result<PostgresUserRepository, anyhow::Error> {
    let pg_pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .connect(&database.url)
        .await?;
    tracing::info!(
        max_connections = database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    Ok(PostgresUserRepository::new(pg_pool))
}
