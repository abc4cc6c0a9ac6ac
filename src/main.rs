//! Connseed - Airflow connection registration
//!
//! MySQL / BigQuery の接続を Airflow のメタデータストアに登録

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use connseed::adapter::environment::ProcessEnvironment;
use connseed::driver::{Args, ConnectionRegistrationWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Credentials come from the process environment
    let workflow = ConnectionRegistrationWorkflow::new(Arc::new(ProcessEnvironment::new()));

    workflow.execute(&args).await?;

    Ok(())
}
