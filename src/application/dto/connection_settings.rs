//! # Connection Settings DTO
//!
//! 接続レコードの組み立てに必要な設定のData Transfer Object

/// 接続設定
///
/// 設定ファイルの値にCLIの上書きを反映したもの
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// MySQLのユーザー名を保持する環境変数の名前
    pub user_variable: String,
    /// MySQLのパスワードを保持する環境変数の名前
    pub password_variable: String,
    /// MySQLホスト
    pub host: String,
    /// MySQLポート
    pub port: u16,
    /// MySQLスキーマ（例: "Employee"）
    pub schema: String,
    /// BigQueryのGCPプロジェクトID
    pub project_id: String,
    /// BigQueryサービスアカウントキーのパス
    pub keyfile_path: String,
}

impl ConnectionSettings {
    /// 新しい接続設定を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use connseed::application::dto::connection_settings::ConnectionSettings;
    ///
    /// let settings = ConnectionSettings::new(
    ///     "MYSQL_USER".to_string(),
    ///     "MYSQL_PASSWORD".to_string(),
    ///     "db.internal".to_string(),
    ///     3306,
    ///     "Employee".to_string(),
    ///     "analytics-prod".to_string(),
    ///     "/secrets/keyfile.json".to_string(),
    /// );
    ///
    /// assert_eq!(settings.port, 3306);
    /// assert_eq!(settings.user_variable, "MYSQL_USER");
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_variable: String,
        password_variable: String,
        host: String,
        port: u16,
        schema: String,
        project_id: String,
        keyfile_path: String,
    ) -> Self {
        Self {
            user_variable,
            password_variable,
            host,
            port,
            schema,
            project_id,
            keyfile_path,
        }
    }
}
