//! SQL Metadata Store
//!
//! MetadataStoreのsqlx実装（Airflowの `connection` テーブルへ書き込む）

use async_trait::async_trait;
use log::{debug, info, warn};
use sqlx::any::AnyPoolOptions;
use sqlx::{Any, AnyPool, Transaction};
use std::time::Duration;

use super::database_url::{Backend, DatabaseUrl};
use crate::domain::entities::connection::Connection;
use crate::domain::errors::PersistenceError;
use crate::domain::repositories::metadata_store::{MetadataSession, MetadataStore};

pub const CONNECTION_TABLE: &str = "connection";

const ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// INSERT するカラム（Airflow の `connection` テーブル）
const INSERT_COLUMNS: [&str; 11] = [
    "conn_id",
    "conn_type",
    "description",
    "host",
    "schema",
    "login",
    "password",
    "port",
    "is_encrypted",
    "is_extra_encrypted",
    "extra",
];

/// sqlxプールを保持するメタデータストア
pub struct SqlMetadataStore {
    pool: AnyPool,
    backend: Backend,
}

impl SqlMetadataStore {
    /// メタデータDBに接続する
    ///
    /// # Arguments
    ///
    /// * `raw_url` - SQLAlchemy形式またはsqlx形式のURL
    ///
    /// # Errors
    ///
    /// URLが不正、または接続できない場合にエラーを返す
    pub async fn connect(raw_url: &str) -> Result<Self, PersistenceError> {
        let url = DatabaseUrl::parse(raw_url)?;
        sqlx::any::install_default_drivers();

        // One-shot run, registrations are sequential
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
            .connect(url.as_str())
            .await
            .map_err(|e| {
                PersistenceError::store(format!("failed to connect to {}", url.redacted()), e)
            })?;

        info!("Connected to {} metadata store {}", url.backend(), url.redacted());

        Ok(Self {
            pool,
            backend: url.backend(),
        })
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// `connection` テーブルが無ければ作成する
    ///
    /// Airflow管理外のスタンドアロンDB向け
    pub async fn create_table(&self) -> Result<(), PersistenceError> {
        let sql = create_table_sql(self.backend);
        sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .map_err(|e| PersistenceError::store("failed to create connection table", e))?;

        info!("Ensured table `{}` exists", CONNECTION_TABLE);
        Ok(())
    }

    /// 登録済みの conn_id を登録順に返す
    pub async fn conn_ids(&self) -> Result<Vec<String>, PersistenceError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            self.backend.quote("conn_id"),
            self.backend.quote(CONNECTION_TABLE),
            self.backend.quote("id"),
        );
        sqlx::query_scalar::<_, String>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PersistenceError::store("failed to list connections", e))
    }

    /// プールを閉じる
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Metadata store pool closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

#[async_trait]
impl MetadataStore for SqlMetadataStore {
    async fn open_session(&self) -> Result<Box<dyn MetadataSession>, PersistenceError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PersistenceError::store("failed to open metadata session", e))?;

        debug!("Opened metadata session");

        Ok(Box::new(SqlSession {
            tx: Some(tx),
            backend: self.backend,
        }))
    }
}

/// トランザクション1つ分のセッション
///
/// `tx` は commit / rollback / close で取り出され、以降は `None`
pub struct SqlSession {
    tx: Option<Transaction<'static, Any>>,
    backend: Backend,
}

impl SqlSession {
    fn finished() -> PersistenceError {
        PersistenceError::store(
            "metadata session already finished",
            std::io::Error::new(std::io::ErrorKind::NotConnected, "no open transaction"),
        )
    }
}

#[async_trait]
impl MetadataSession for SqlSession {
    async fn add(&mut self, connection: &Connection) -> Result<(), PersistenceError> {
        let tx = self.tx.as_mut().ok_or_else(Self::finished)?;
        let sql = insert_sql(self.backend);

        sqlx::query(&sql)
            .bind(connection.conn_id())
            .bind(connection.conn_type().as_str())
            .bind(connection.description())
            .bind(connection.host())
            .bind(connection.schema())
            .bind(connection.login())
            .bind(connection.password())
            .bind(connection.port().map(i32::from))
            .bind(false)
            .bind(false)
            .bind(connection.extra_json())
            .execute(&mut **tx)
            .await
            .map_err(|e| map_insert_error(connection.conn_id(), e))?;

        debug!("Inserted connection {}", connection.conn_id());
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), PersistenceError> {
        let tx = self.tx.take().ok_or_else(Self::finished)?;
        tx.commit()
            .await
            .map_err(|e| PersistenceError::store("failed to commit metadata session", e))
    }

    async fn rollback(&mut self) -> Result<(), PersistenceError> {
        match self.tx.take() {
            Some(tx) => tx
                .rollback()
                .await
                .map_err(|e| PersistenceError::store("failed to roll back metadata session", e)),
            None => Ok(()),
        }
    }

    async fn close(&mut self) {
        if let Some(tx) = self.tx.take() {
            if let Err(e) = tx.rollback().await {
                warn!("Failed to roll back uncommitted session on close: {}", e);
            }
        }
        debug!("Closed metadata session");
    }
}

fn insert_sql(backend: Backend) -> String {
    let columns = INSERT_COLUMNS
        .iter()
        .map(|c| backend.quote(c))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=INSERT_COLUMNS.len())
        .map(|i| backend.placeholder(i))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        backend.quote(CONNECTION_TABLE),
        columns,
        placeholders
    )
}

fn create_table_sql(backend: Backend) -> String {
    let id = match backend {
        Backend::Postgres => "SERIAL PRIMARY KEY",
        Backend::MySql => "INTEGER NOT NULL AUTO_INCREMENT PRIMARY KEY",
        Backend::Sqlite => "INTEGER PRIMARY KEY AUTOINCREMENT",
    };
    let q = |ident: &str| backend.quote(ident);

    format!(
        "CREATE TABLE IF NOT EXISTS {table} (\
         {id_col} {id}, \
         {conn_id} VARCHAR(250) NOT NULL UNIQUE, \
         {conn_type} VARCHAR(500) NOT NULL, \
         {description} TEXT, \
         {host} VARCHAR(500), \
         {schema} VARCHAR(500), \
         {login} TEXT, \
         {password} TEXT, \
         {port} INTEGER, \
         {is_encrypted} BOOLEAN, \
         {is_extra_encrypted} BOOLEAN, \
         {extra} TEXT)",
        table = q(CONNECTION_TABLE),
        id_col = q("id"),
        id = id,
        conn_id = q("conn_id"),
        conn_type = q("conn_type"),
        description = q("description"),
        host = q("host"),
        schema = q("schema"),
        login = q("login"),
        password = q("password"),
        port = q("port"),
        is_encrypted = q("is_encrypted"),
        is_extra_encrypted = q("is_extra_encrypted"),
        extra = q("extra"),
    )
}

fn map_insert_error(conn_id: &str, err: sqlx::Error) -> PersistenceError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            PersistenceError::DuplicateConnection {
                conn_id: conn_id.to_string(),
            }
        }
        _ => PersistenceError::store(format!("failed to insert connection `{}`", conn_id), err),
    }
}
