//! # Connection Builder Service
//!
//! 設定と認証情報から接続レコードを組み立てる（I/Oなし）

use serde_json::json;

use crate::domain::entities::connection::{Connection, ConnectionType};
use crate::domain::entities::credentials::Credentials;
use crate::domain::errors::RegistrationError;

pub const MYSQL_CONN_ID: &str = "mysql_conn";
pub const BIGQUERY_CONN_ID: &str = "bigquery_conn";

/// 接続レコードビルダー
pub struct ConnectionBuilder;

impl ConnectionBuilder {
    /// MySQL接続レコードを組み立てる
    ///
    /// # Errors
    ///
    /// `host` または `schema` が空の場合に `InvalidConfig` を返す
    pub fn mysql(
        host: &str,
        port: u16,
        schema: &str,
        credentials: &Credentials,
    ) -> Result<Connection, RegistrationError> {
        let host = required("host", host)?;
        let schema = required("schema", schema)?;

        Ok(Connection::new(MYSQL_CONN_ID, ConnectionType::Mysql)
            .with_description(format!("MySQL database {} on {}", schema, host))
            .with_host(host)
            .with_port(port)
            .with_schema(schema)
            .with_login(credentials.login())
            .with_password(credentials.password()))
    }

    /// BigQuery接続レコードを組み立てる
    ///
    /// プロジェクトIDとキーファイルのパスは `extra` に格納する
    ///
    /// # Errors
    ///
    /// `project_id` または `keyfile_path` が空の場合に `InvalidConfig` を返す
    pub fn bigquery(project_id: &str, keyfile_path: &str) -> Result<Connection, RegistrationError> {
        let project_id = required("project_id", project_id)?;
        let keyfile_path = required("keyfile_path", keyfile_path)?;

        Ok(Connection::new(BIGQUERY_CONN_ID, ConnectionType::Bigquery)
            .with_description(format!("BigQuery project {}", project_id))
            .with_extra(json!({
                "project": project_id,
                "key_path": keyfile_path,
            })))
    }
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, RegistrationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistrationError::InvalidConfig(format!(
            "`{}` must not be empty",
            field
        )));
    }
    Ok(trimmed)
}
