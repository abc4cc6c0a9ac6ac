//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

/// MySQL / BigQuery の接続をAirflowのメタデータストアに登録するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "connseed")]
#[command(
    about = "Register MySQL and BigQuery connections in the Airflow metadata store",
    long_about = None
)]
pub struct Args {
    /// Config file path
    #[arg(short, long, default_value = "./config.json")]
    pub config: String,

    /// Metadata database URL (SQLAlchemy or sqlx form)
    #[arg(long, env = "AIRFLOW__DATABASE__SQL_ALCHEMY_CONN", hide_env_values = true)]
    pub database_url: Option<String>,

    /// MySQL schema, overrides `schema` in the config file
    #[arg(long)]
    pub schema: Option<String>,

    /// BigQuery project id, overrides `project_id` in the config file
    #[arg(long)]
    pub project_id: Option<String>,

    /// BigQuery service account key path, overrides `keyfile_path` in the config file
    #[arg(long)]
    pub keyfile_path: Option<String>,

    /// Dry run mode - build and print the records without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Create the `connection` table if it does not exist
    #[arg(long)]
    pub create_table: bool,
}
