use crate::app::ServerOptions;
use crate::app::run_server;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use clinvar_store::ClinvarStore;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

/// Serve reports on conflicting ClinVar submissions.
#[derive(Debug, Parser)]
#[command(name = "clinvar-conflicts", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTML reports over HTTP.
    Serve {
        /// SQLite database produced by the ClinVar import.
        #[arg(long, env = "CLINVAR_DB")]
        db: PathBuf,

        #[arg(long, env = "CLINVAR_LISTEN", default_value = "127.0.0.1:5000")]
        listen: SocketAddr,
    },

    /// Create an empty database with the report schema.
    InitDb {
        #[arg(long, env = "CLINVAR_DB")]
        db: PathBuf,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve { db, listen } => {
            anyhow::ensure!(db.is_file(), "database {} does not exist", db.display());
            run_server(ServerOptions {
                db_path: db,
                listen,
            })
            .await
        }
        Command::InitDb { db } => {
            ClinvarStore::create(&db)
                .with_context(|| format!("failed to initialize {}", db.display()))?;
            info!("created report schema in {}", db.display());
            Ok(())
        }
    }
}
