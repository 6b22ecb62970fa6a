use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use serde_json::{json, Value};

use crate::auth;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgStore};
use crate::models::Fields;
use crate::services::AdminService;

#[derive(Args, Debug)]
pub struct CreateAdminArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub password: String,

    #[arg(long)]
    pub website_id: i64,
}

/// Bootstrap an admin; every `/api/admins` route already needs a token
pub async fn create(args: CreateAdminArgs, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let manager = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    let admins = AdminService::new(Arc::new(PgStore::new(&manager)));

    let result = admins.create(&admin_fields(args.username, args.password, args.website_id)).await;
    manager.close().await;
    let admin = result.context("failed to create admin")?;

    output_success(
        output_format,
        &format!("Created admin {} (id {})", admin.username, admin.id),
        Some(serde_json::to_value(&admin)?),
    )
}

/// The same fields `POST /api/admins` accepts
pub(crate) fn admin_fields(username: String, password: String, website_id: i64) -> Fields {
    let mut fields = Fields::new();
    fields.insert("username", Value::String(username));
    fields.insert("password", Value::String(password));
    fields.insert("website_id", json!(website_id));
    fields
}

pub async fn hash(password: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let hash = auth::hash_password(password).await?;
    match output_format {
        OutputFormat::Json => output_success(output_format, "Password hashed", Some(json!({ "hash": hash }))),
        OutputFormat::Text => {
            println!("{}", hash);
            Ok(())
        }
    }
}
