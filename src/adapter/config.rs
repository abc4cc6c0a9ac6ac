//! Configuration File
//!
//! 接続パラメータを保持するJSON設定ファイルの読み込み

use log::info;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::errors::RegistrationError;

pub const DEFAULT_SCHEMA: &str = "Employee";
pub const DEFAULT_PROJECT_ID: &str = "my_project_id";
pub const DEFAULT_KEYFILE_NAME: &str = "keyfile.json";

/// 設定ファイル
///
/// `user` と `password` は秘密情報そのものではなく、それを保持する環境変数の名前
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub user: String,
    pub password: String,
    pub host: String,
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,

    // Optional, fall back to the defaults above
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub keyfile_path: Option<String>,
}

impl Config {
    /// 設定ファイルを読み込む
    ///
    /// # Errors
    ///
    /// - ファイルが存在しない: `ConfigNotFound`
    /// - 読み込みに失敗: `ConfigRead`
    /// - JSONが不正、必須キーの欠落、ポートが不正: `ConfigParse`
    pub fn load(path: &str) -> Result<Self, RegistrationError> {
        let path = PathBuf::from(expand_path(path));

        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RegistrationError::ConfigNotFound { path: path.clone() },
            _ => RegistrationError::ConfigRead {
                path: path.clone(),
                source: e,
            },
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|source| RegistrationError::ConfigParse { path: path.clone(), source })?;

        info!("Loaded configuration from {}", path.display());

        Ok(config)
    }

    pub fn schema_or_default(&self) -> &str {
        self.schema.as_deref().unwrap_or(DEFAULT_SCHEMA)
    }

    pub fn project_id_or_default(&self) -> &str {
        self.project_id.as_deref().unwrap_or(DEFAULT_PROJECT_ID)
    }

    /// キーファイルのパス（未指定なら設定ファイルと同じディレクトリの `keyfile.json`）
    pub fn keyfile_path_or_default(&self, config_path: &str) -> String {
        match &self.keyfile_path {
            Some(path) => expand_path(path),
            None => {
                let expanded = expand_path(config_path);
                Path::new(&expanded)
                    .parent()
                    .unwrap_or_else(|| Path::new(""))
                    .join(DEFAULT_KEYFILE_NAME)
                    .to_string_lossy()
                    .to_string()
            }
        }
    }
}

/// Expands tilde in path and returns the full path
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(u64),
    Text(String),
}

/// ポートは数値・数値文字列のどちらも受け付ける
fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    match PortValue::deserialize(deserializer)? {
        PortValue::Number(n) => u16::try_from(n)
            .map_err(|_| de::Error::custom(format!("port {} is out of range", n))),
        PortValue::Text(s) => s
            .trim()
            .parse::<u16>()
            .map_err(|_| de::Error::custom(format!("invalid port `{}`", s))),
    }
}
