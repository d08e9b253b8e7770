//! Datacat command-line reports.
//!
//! A thin consumer of the core's call/return contracts: installs the
//! annotation storage, reconciles it against the live catalog, and prints the
//! freshness and documentation-audit digests. All decisions live in
//! `datacat-core`; this binary only formats and prints.

mod digest;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

use datacat_core::{annotations, audit, freshness};

/// Default maximum connections for the CLI pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Datacat catalog reports.
#[derive(Parser, Debug)]
#[command(name = "datacat")]
#[command(version, about = "Catalog annotation and documentation reports", long_about = None)]
pub struct Args {
    /// PostgreSQL connection string; falls back to the DATABASE_URL
    /// environment variable.
    #[arg(long)]
    pub database_url: Option<String>,

    /// Maximum pool connections.
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Emit the report as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available reports.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the annotation storage (enum type and table) if missing.
    Install,
    /// Insert default annotation rows for newly discovered tables.
    Reconcile,
    /// Print the tables expected to update around a date.
    Updates {
        /// Report date (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Documentation completeness audits.
    Audit {
        #[command(subcommand)]
        check: AuditCheck,
    },
}

/// Which completeness check to print.
#[derive(Subcommand, Debug)]
pub enum AuditCheck {
    /// Tables without a native comment.
    Comments,
    /// Tables with at least one uncommented column.
    Columns,
    /// Tables with missing or empty annotation details.
    Annotations,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "datacat=info".into()),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = match &args.database_url {
        Some(url) => url.clone(),
        None => std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL not set and --database-url not given")?,
    };

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .connect(&database_url)
        .await?;
    tracing::info!(max_connections = args.max_connections, "connected to store");

    match args.command {
        Command::Install => {
            annotations::install(&pool).await?;
            println!("annotation storage ready");
        }
        Command::Reconcile => {
            let inserted = annotations::reconcile_missing(&pool).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&inserted)?);
            } else {
                print!("{}", digest::reconcile(&inserted));
            }
        }
        Command::Updates { today } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let report = freshness::report(&pool, today).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", digest::updates(&report));
            }
        }
        Command::Audit { check } => {
            let tables = match check {
                AuditCheck::Comments => audit::missing_table_comments(&pool).await?,
                AuditCheck::Columns => audit::tables_with_uncommented_columns(&pool).await?,
                AuditCheck::Annotations => audit::missing_annotation_details(&pool).await?,
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&tables)?);
            } else {
                print!("{}", digest::table_list(&tables));
            }
        }
    }

    Ok(())
}
