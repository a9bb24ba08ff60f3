//! Database Config

use clap::Args;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string; partners are served from the in-memory
    /// seed store when omitted
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}
