//! Workflow Integration Tests
//!
//! ConnectionRegistrationWorkflow の統合テスト（SQLiteのメタデータDBを使用）

use connseed::adapter::metadata::SqlMetadataStore;
use connseed::domain::errors::{PersistenceError, RegistrationError};
use connseed::driver::cli::Args;
use connseed::driver::workflow::ConnectionRegistrationWorkflow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// テスト用のConfigファイルを作成
fn create_test_config(dir: &Path, content: &str) -> String {
    let config_path = dir.join("config.json");
    fs::write(&config_path, content).unwrap();
    config_path.to_string_lossy().to_string()
}

fn valid_config(dir: &Path) -> String {
    create_test_config(
        dir,
        r#"{
  "user": "TEST_MYSQL_USER",
  "password": "TEST_MYSQL_PASSWORD",
  "host": "mysql.internal",
  "port": 3306,
  "project_id": "analytics-test"
}"#,
    )
}

/// SQLAlchemy形式のSQLite URL（絶対パス）
fn database_url(dir: &Path) -> String {
    format!("sqlite:///{}", dir.join("airflow.db").display())
}

fn args(config: String, database_url: Option<String>) -> Args {
    Args {
        config,
        database_url,
        schema: None,
        project_id: None,
        keyfile_path: None,
        dry_run: false,
        create_table: true,
    }
}

fn credentials() -> Arc<HashMap<String, String>> {
    Arc::new(HashMap::from([
        ("TEST_MYSQL_USER".to_string(), "etl".to_string()),
        ("TEST_MYSQL_PASSWORD".to_string(), "s3cret".to_string()),
    ]))
}

async fn stored_conn_ids(dir: &Path) -> Vec<String> {
    let store = SqlMetadataStore::connect(&database_url(dir)).await.unwrap();
    store.create_table().await.unwrap();
    let ids = store.conn_ids().await.unwrap();
    store.close().await;
    ids
}

#[tokio::test]
async fn test_workflow_registers_two_connections() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = valid_config(temp_dir.path());

    let workflow = ConnectionRegistrationWorkflow::new(credentials());
    let summary = workflow
        .execute(&args(config_path, Some(database_url(temp_dir.path()))))
        .await
        .unwrap();

    assert_eq!(summary.registered, vec!["mysql_conn", "bigquery_conn"]);
    assert_eq!(
        stored_conn_ids(temp_dir.path()).await,
        vec!["mysql_conn", "bigquery_conn"]
    );
}

#[tokio::test]
async fn test_workflow_missing_config_inserts_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.json");

    let workflow = ConnectionRegistrationWorkflow::new(credentials());
    let result = workflow
        .execute(&args(
            missing.to_string_lossy().to_string(),
            Some(database_url(temp_dir.path())),
        ))
        .await;

    assert!(
        matches!(result, Err(RegistrationError::ConfigNotFound { .. })),
        "expected ConfigNotFound, got: {:?}",
        result
    );
    assert!(stored_conn_ids(temp_dir.path()).await.is_empty());
}

#[tokio::test]
async fn test_workflow_malformed_config_inserts_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config(temp_dir.path(), r#"{"user": "TEST_MYSQL_USER", "#);

    let workflow = ConnectionRegistrationWorkflow::new(credentials());
    let result = workflow
        .execute(&args(config_path, Some(database_url(temp_dir.path()))))
        .await;

    assert!(
        matches!(result, Err(RegistrationError::ConfigParse { .. })),
        "expected ConfigParse, got: {:?}",
        result
    );
    assert!(stored_conn_ids(temp_dir.path()).await.is_empty());
}

#[tokio::test]
async fn test_workflow_missing_credential_inserts_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = valid_config(temp_dir.path());

    let only_user = Arc::new(HashMap::from([(
        "TEST_MYSQL_USER".to_string(),
        "etl".to_string(),
    )]));
    let workflow = ConnectionRegistrationWorkflow::new(only_user);
    let result = workflow
        .execute(&args(config_path, Some(database_url(temp_dir.path()))))
        .await;

    match result {
        Err(RegistrationError::MissingCredential { key, variable }) => {
            assert_eq!(key, "password");
            assert_eq!(variable, "TEST_MYSQL_PASSWORD");
        }
        other => panic!("expected MissingCredential, got: {:?}", other),
    }
    assert!(stored_conn_ids(temp_dir.path()).await.is_empty());
}

#[tokio::test]
async fn test_workflow_rerun_fails_with_duplicate() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = valid_config(temp_dir.path());
    let run_args = args(config_path, Some(database_url(temp_dir.path())));

    let workflow = ConnectionRegistrationWorkflow::new(credentials());
    workflow.execute(&run_args).await.unwrap();

    let result = workflow.execute(&run_args).await;

    match result {
        Err(RegistrationError::Persistence(PersistenceError::DuplicateConnection { conn_id })) => {
            assert_eq!(conn_id, "mysql_conn");
        }
        other => panic!("expected DuplicateConnection, got: {:?}", other),
    }
    assert_eq!(
        stored_conn_ids(temp_dir.path()).await,
        vec!["mysql_conn", "bigquery_conn"]
    );
}

#[tokio::test]
async fn test_workflow_dry_run_needs_no_database() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = valid_config(temp_dir.path());

    let mut dry_args = args(config_path, None);
    dry_args.dry_run = true;

    let workflow = ConnectionRegistrationWorkflow::new(credentials());
    let summary = workflow.execute(&dry_args).await.unwrap();

    assert_eq!(summary.count(), 0);
    assert!(!temp_dir.path().join("airflow.db").exists());
}

#[tokio::test]
async fn test_workflow_without_database_url_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = valid_config(temp_dir.path());

    let workflow = ConnectionRegistrationWorkflow::new(credentials());
    let result = workflow.execute(&args(config_path, None)).await;

    assert!(
        matches!(result, Err(RegistrationError::InvalidConfig(_))),
        "expected InvalidConfig, got: {:?}",
        result
    );
}

#[test]
fn test_workflow_plan_builds_records() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = valid_config(temp_dir.path());

    let workflow = ConnectionRegistrationWorkflow::new(credentials());
    let connections = workflow.plan(&args(config_path, None)).unwrap();

    assert_eq!(connections.len(), 2);

    let mysql = &connections[0];
    assert_eq!(mysql.conn_id(), "mysql_conn");
    assert_eq!(mysql.host(), Some("mysql.internal"));
    assert_eq!(mysql.port(), Some(3306));
    assert_eq!(mysql.schema(), Some("Employee"));
    assert_eq!(mysql.login(), Some("etl"));
    assert_eq!(mysql.password(), Some("s3cret"));

    let bigquery = &connections[1];
    assert_eq!(bigquery.conn_id(), "bigquery_conn");
    let extra = bigquery.extra().unwrap();
    assert_eq!(extra["project"], "analytics-test");
    assert_eq!(
        extra["key_path"],
        &*temp_dir.path().join("keyfile.json").to_string_lossy()
    );
}
