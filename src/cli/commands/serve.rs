use std::sync::Arc;

use anyhow::Context;
use clap::Args;

use super::admin::admin_fields;
use crate::app::{self, AppState};
use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, MemoryStore, PgStore, Store};
use crate::models::AdminRecord;
use crate::services::AdminService;
use crate::uploads::UploadSink;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Listen port (overrides PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Use a throwaway in-process store instead of Postgres")]
    pub in_memory: bool,

    #[arg(
        long,
        requires_all = ["in_memory", "admin_password"],
        help = "Seed an admin into the in-memory store"
    )]
    pub admin_username: Option<String>,

    #[arg(long, requires = "admin_username", help = "Password of the seeded admin")]
    pub admin_password: Option<String>,

    #[arg(long, default_value_t = 1, help = "Website of the seeded admin")]
    pub admin_website_id: i64,
}

pub async fn handle(args: ServeArgs, config: &AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting dealer API in {:?} mode", config.environment);

    let auth = AuthService::new(&config.security.jwt_secret).context("JWT_SECRET must be set")?;

    let uploads = UploadSink::new(&config.uploads.dir, config.uploads.max_bytes);
    uploads
        .ensure_dir()
        .await
        .with_context(|| format!("cannot create upload directory {}", config.uploads.dir))?;

    let (store, manager): (Arc<dyn Store>, Option<DatabaseManager>) = if args.in_memory {
        tracing::warn!("Using in-memory store; data is lost on exit");
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        match seed_admin(store.clone(), &args).await? {
            Some(admin) => tracing::info!("Seeded admin {} (id {})", admin.username, admin.id),
            None => tracing::warn!("No --admin-username given; admin routes will reject every request"),
        }
        (store, None)
    } else {
        let manager = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to the database")?;
        (Arc::new(PgStore::new(&manager)), Some(manager))
    };

    let state = AppState::new(store, uploads, auth).with_body_limit(config.server.max_request_size_bytes);
    let router = app::router(state).layer(app::cors_layer(&config.server.frontend_url));

    let port = args.port.unwrap_or(config.server.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(manager) = manager {
        manager.close().await;
    }
    tracing::info!("Server stopped");
    Ok(())
}

/// `create-admin` needs Postgres, so an in-memory server gets its admin here
async fn seed_admin(store: Arc<dyn Store>, args: &ServeArgs) -> anyhow::Result<Option<AdminRecord>> {
    let (Some(username), Some(password)) = (&args.admin_username, &args.admin_password) else {
        return Ok(None);
    };
    let fields = admin_fields(username.clone(), password.clone(), args.admin_website_id);
    let admin = AdminService::new(store)
        .create(&fields)
        .await
        .context("failed to seed admin")?;
    Ok(Some(admin))
}

/// Ctrl-C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_admin_can_log_in() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let args = ServeArgs {
            in_memory: true,
            admin_username: Some("budi".to_string()),
            admin_password: Some("rahasia".to_string()),
            admin_website_id: 2,
            ..ServeArgs::default()
        };

        let admin = seed_admin(store.clone(), &args).await.unwrap().unwrap();
        assert_eq!(admin.username, "budi");
        assert_eq!(admin.website_id, Some(2));

        let auth = AuthService::new("test-secret").unwrap();
        let token = auth
            .authenticate(&AdminService::new(store), "budi", "rahasia")
            .await
            .unwrap();
        assert_eq!(auth.verify(&token).unwrap().id, admin.id);
    }

    #[tokio::test]
    async fn nothing_is_seeded_without_credentials() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let args = ServeArgs {
            in_memory: true,
            ..ServeArgs::default()
        };

        assert!(seed_admin(store.clone(), &args).await.unwrap().is_none());
        assert!(AdminService::new(store).list().await.unwrap().is_empty());
    }
}
