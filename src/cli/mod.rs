pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dealer-api")]
#[command(about = "Content and admin API for car-dealership microsites")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Create an admin account directly in the store")]
    CreateAdmin(commands::admin::CreateAdminArgs),

    #[command(about = "Print a bcrypt hash for manual seeding")]
    HashPassword {
        #[arg(help = "Plain-text password")]
        password: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::config();

    match cli.command {
        None => commands::serve::handle(commands::serve::ServeArgs::default(), config).await,
        Some(Commands::Serve(args)) => commands::serve::handle(args, config).await,
        Some(Commands::CreateAdmin(args)) => commands::admin::create(args, config, output_format).await,
        Some(Commands::HashPassword { password }) => commands::admin::hash(&password, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_serves() {
        let cli = Cli::try_parse_from(["dealer-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn create_admin_arguments() {
        let cli = Cli::try_parse_from([
            "dealer-api",
            "create-admin",
            "--username",
            "budi",
            "--password",
            "rahasia",
            "--website-id",
            "1",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::CreateAdmin(args)) => {
                assert_eq!(args.username, "budi");
                assert_eq!(args.website_id, 1);
            }
            _ => panic!("expected create-admin"),
        }
    }

    #[test]
    fn serve_flags() {
        let cli = Cli::try_parse_from(["dealer-api", "serve", "--port", "8080", "--in-memory"]).unwrap();
        match cli.command {
            Some(Commands::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.in_memory);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn seeded_admin_needs_in_memory_and_password() {
        let cli = Cli::try_parse_from([
            "dealer-api",
            "serve",
            "--in-memory",
            "--admin-username",
            "budi",
            "--admin-password",
            "rahasia",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Serve(args)) => {
                assert_eq!(args.admin_username.as_deref(), Some("budi"));
                assert_eq!(args.admin_website_id, 1);
            }
            _ => panic!("expected serve"),
        }

        assert!(Cli::try_parse_from(["dealer-api", "serve", "--admin-username", "budi", "--admin-password", "x"]).is_err());
        assert!(Cli::try_parse_from(["dealer-api", "serve", "--in-memory", "--admin-username", "budi"]).is_err());
    }
}
