use todo_server::application::category_service::{CategoryService, CategoryServiceImpl};
use todo_server::application::todo_service::TodoServiceImpl;
use todo_server::config::{AppConfig, StoreKind};
use todo_server::domain::repository::{CategoryRepository, TodoRepository};
use todo_server::http::routing;
use todo_server::infrastructure::{memory_repo::InMemoryStore, sqlite_repo::SqliteStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;
    match config.store {
        StoreKind::Sqlite => {
            let store = SqliteStore::connect(&config.database_url).await?;
            store.init().await?;
            tracing::info!(url = %config.database_url, "sqlite store ready");
            serve(&config, store).await
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            serve(&config, InMemoryStore::new()).await
        }
    }
}

async fn serve<R>(config: &AppConfig, store: R) -> anyhow::Result<()>
where
    R: TodoRepository + CategoryRepository + Clone,
{
    let categories = CategoryServiceImpl::new(store.clone());
    let seeded = categories.seed_defaults().await?;
    tracing::info!(seeded, "default categories checked");

    let router = routing::app(TodoServiceImpl::new(store), categories);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
