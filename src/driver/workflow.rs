//! Workflow Orchestration
//!
//! 設定読み込み → 認証情報解決 → レコード組み立て → 登録 のオーケストレーション

use log::info;
use std::sync::Arc;

use crate::adapter::config::{expand_path, Config};
use crate::adapter::metadata::SqlMetadataStore;
use crate::application::dto::connection_settings::ConnectionSettings;
use crate::application::use_cases::register_connections::{
    RegisterConnectionsUseCase, RegistrationSummary,
};
use crate::application::use_cases::resolve_credentials::ResolveCredentialsUseCase;
use crate::domain::entities::connection::Connection;
use crate::domain::errors::RegistrationError;
use crate::domain::repositories::credential_source::CredentialSource;
use crate::domain::repositories::metadata_store::MetadataStore;
use crate::domain::services::connection_builder::ConnectionBuilder;

use super::cli::Args;

/// 設定ファイルの値にCLIの上書きを反映する
pub fn build_settings(config: &Config, args: &Args) -> ConnectionSettings {
    let schema = args
        .schema
        .clone()
        .unwrap_or_else(|| config.schema_or_default().to_string());
    let project_id = args
        .project_id
        .clone()
        .unwrap_or_else(|| config.project_id_or_default().to_string());
    let keyfile_path = match &args.keyfile_path {
        Some(path) => expand_path(path),
        None => config.keyfile_path_or_default(&args.config),
    };

    ConnectionSettings::new(
        config.user.clone(),
        config.password.clone(),
        config.host.clone(),
        config.port,
        schema,
        project_id,
        keyfile_path,
    )
}

/// Connection Registration Workflow
pub struct ConnectionRegistrationWorkflow<C: CredentialSource> {
    resolve_use_case: ResolveCredentialsUseCase<C>,
}

impl<C: CredentialSource> ConnectionRegistrationWorkflow<C> {
    /// Create a new workflow instance with dependency injection
    pub fn new(credential_source: Arc<C>) -> Self {
        Self {
            resolve_use_case: ResolveCredentialsUseCase::new(credential_source),
        }
    }

    /// 登録する接続レコードを組み立てる（ストアには触れない）
    ///
    /// # Errors
    ///
    /// 設定ファイル・認証情報・必須フィールドのエラーを返す
    pub fn plan(&self, args: &Args) -> Result<Vec<Connection>, RegistrationError> {
        let config = Config::load(&args.config)?;
        let settings = build_settings(&config, args);

        println!("✓ Using configuration: {}", args.config);
        println!("  MySQL: {}:{} / {}", settings.host, settings.port, settings.schema);
        println!("  BigQuery project: {}", settings.project_id);

        let credentials = self.resolve_use_case.execute(&settings)?;
        println!(
            "✓ Resolved credentials from ${} / ${}",
            settings.user_variable, settings.password_variable
        );

        Ok(vec![
            ConnectionBuilder::mysql(
                &settings.host,
                settings.port,
                &settings.schema,
                &credentials,
            )?,
            ConnectionBuilder::bigquery(&settings.project_id, &settings.keyfile_path)?,
        ])
    }

    /// 組み立て済みのレコードをストアへ登録する
    pub async fn register<S: MetadataStore>(
        &self,
        store: Arc<S>,
        connections: &[Connection],
    ) -> Result<RegistrationSummary, RegistrationError> {
        RegisterConnectionsUseCase::new(store)
            .execute(connections)
            .await
    }

    /// テーブル作成と登録を行い、結果にかかわらずプールを閉じる
    async fn write_and_close(
        &self,
        store: Arc<SqlMetadataStore>,
        create_table: bool,
        connections: &[Connection],
    ) -> Result<RegistrationSummary, RegistrationError> {
        let prepared = if create_table {
            store.create_table().await
        } else {
            Ok(())
        };

        let outcome = match prepared {
            Ok(()) => self.register(store.clone(), connections).await,
            Err(e) => Err(e.into()),
        };

        store.close().await;
        outcome
    }

    /// Execute the registration workflow
    ///
    /// dry-run の場合は空のサマリーを返す
    pub async fn execute(&self, args: &Args) -> Result<RegistrationSummary, RegistrationError> {
        info!("Starting connection registration...");
        info!("Dry run: {}", args.dry_run);

        let connections = self.plan(args)?;

        if args.dry_run {
            println!("✓ Dry-run mode (not writing to the metadata store)");
            println!("  Would register {} connections:", connections.len());
            for connection in &connections {
                println!("    - {}", connection);
            }
            return Ok(RegistrationSummary::default());
        }

        let database_url = args.database_url.as_deref().ok_or_else(|| {
            RegistrationError::InvalidConfig(
                "no metadata database url: pass --database-url or set \
                 AIRFLOW__DATABASE__SQL_ALCHEMY_CONN"
                    .to_string(),
            )
        })?;

        let store = Arc::new(SqlMetadataStore::connect(database_url).await?);
        println!("✓ Connected to {} metadata store", store.backend());

        let summary = self
            .write_and_close(store, args.create_table, &connections)
            .await?;

        println!("✓ Registered {} connections:", summary.count());
        for conn_id in &summary.registered {
            println!("    - {}", conn_id);
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::connection::ConnectionType;
    use crate::domain::errors::PersistenceError;
    use clap::Parser;
    use sqlx::{Connection as _, Executor, SqliteConnection};
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn config() -> Config {
        Config {
            user: "MYSQL_USER".to_string(),
            password: "MYSQL_PASSWORD".to_string(),
            host: "db.internal".to_string(),
            port: 3306,
            schema: None,
            project_id: Some("from-config".to_string()),
            keyfile_path: None,
        }
    }

    #[test]
    fn test_build_settings_defaults() {
        let args = Args::parse_from(["connseed", "-c", "/etc/connseed/config.json"]);
        let settings = build_settings(&config(), &args);

        assert_eq!(settings.user_variable, "MYSQL_USER");
        assert_eq!(settings.password_variable, "MYSQL_PASSWORD");
        assert_eq!(settings.host, "db.internal");
        assert_eq!(settings.port, 3306);
        assert_eq!(settings.schema, "Employee");
        assert_eq!(settings.project_id, "from-config");
        assert_eq!(settings.keyfile_path, "/etc/connseed/keyfile.json");
    }

    #[test]
    fn test_build_settings_cli_overrides() {
        let args = Args::parse_from([
            "connseed",
            "--schema",
            "Payroll",
            "--project-id",
            "from-cli",
            "--keyfile-path",
            "/keys/bq.json",
        ]);
        let settings = build_settings(&config(), &args);

        assert_eq!(settings.schema, "Payroll");
        assert_eq!(settings.project_id, "from-cli");
        assert_eq!(settings.keyfile_path, "/keys/bq.json");
    }

    fn workflow() -> ConnectionRegistrationWorkflow<HashMap<String, String>> {
        ConnectionRegistrationWorkflow::new(Arc::new(HashMap::new()))
    }

    fn connections() -> Vec<Connection> {
        vec![Connection::new("mysql_conn", ConnectionType::Mysql).with_host("db.internal")]
    }

    async fn open_store(dir: &TempDir) -> Arc<SqlMetadataStore> {
        let url = format!("sqlite:///{}", dir.path().join("airflow.db").display());
        Arc::new(SqlMetadataStore::connect(&url).await.unwrap())
    }

    #[tokio::test]
    async fn test_write_and_close_closes_after_success() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        let summary = workflow()
            .write_and_close(store.clone(), true, &connections())
            .await
            .unwrap();

        assert_eq!(summary.registered, vec!["mysql_conn"]);
        assert!(store.is_closed());
    }

    #[tokio::test]
    async fn test_write_and_close_closes_when_table_creation_fails() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("airflow.db");

        // An index already named `connection` blocks CREATE TABLE IF NOT EXISTS
        let mut conn = SqliteConnection::connect(&format!("sqlite://{}?mode=rwc", db.display()))
            .await
            .unwrap();
        conn.execute("CREATE TABLE other (x INTEGER)").await.unwrap();
        conn.execute("CREATE INDEX connection ON other (x)").await.unwrap();
        conn.close().await.unwrap();

        let store = open_store(&dir).await;
        let err = workflow()
            .write_and_close(store.clone(), true, &connections())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RegistrationError::Persistence(PersistenceError::Store { .. })
        ));
        assert!(store.is_closed());
    }
}
