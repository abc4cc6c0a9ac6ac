//! # Connection Entity
//!
//! オーケストレーターのメタデータストアに登録する接続レコード

use std::fmt;

use serde_json::Value;

/// 接続タイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionType {
    Mysql,
    Bigquery,
}

impl ConnectionType {
    /// `connection.conn_type` カラムに書き込む値
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Bigquery => "bigquery",
        }
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 接続レコード
///
/// 一度組み立てたら変更しない値オブジェクト。
/// フィールドは `with_*` で組み立て時にのみ設定する。
#[derive(Clone, PartialEq)]
pub struct Connection {
    conn_id: String,
    conn_type: ConnectionType,
    description: Option<String>,
    host: Option<String>,
    schema: Option<String>,
    login: Option<String>,
    password: Option<String>,
    port: Option<u16>,
    extra: Option<Value>,
}

impl Connection {
    pub fn new(conn_id: impl Into<String>, conn_type: ConnectionType) -> Self {
        Self {
            conn_id: conn_id.into(),
            conn_type,
            description: None,
            host: None,
            schema: None,
            login: None,
            password: None,
            port: None,
            extra: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_extra(mut self, extra: Value) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn conn_id(&self) -> &str {
        &self.conn_id
    }

    pub fn conn_type(&self) -> ConnectionType {
        self.conn_type
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn extra(&self) -> Option<&Value> {
        self.extra.as_ref()
    }

    /// `connection.extra` カラム用にJSON文字列へ変換
    pub fn extra_json(&self) -> Option<String> {
        self.extra.as_ref().map(Value::to_string)
    }
}

// Passwords never leak through Debug or Display.
impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("conn_id", &self.conn_id)
            .field("conn_type", &self.conn_type)
            .field("description", &self.description)
            .field("host", &self.host)
            .field("schema", &self.schema)
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("port", &self.port)
            .field("extra", &self.extra)
            .finish()
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.conn_id, self.conn_type)?;
        if let Some(host) = &self.host {
            write!(f, " host={}", host)?;
        }
        if let Some(port) = self.port {
            write!(f, " port={}", port)?;
        }
        if let Some(schema) = &self.schema {
            write!(f, " schema={}", schema)?;
        }
        if let Some(login) = &self.login {
            write!(f, " login={}", login)?;
        }
        if self.password.is_some() {
            write!(f, " password=***")?;
        }
        if let Some(extra) = &self.extra {
            write!(f, " extra={}", extra)?;
        }
        Ok(())
    }
}
