//! # Resolve Credentials Use Case
//!
//! 設定が名前を指す環境変数からログイン情報を解決する

use std::sync::Arc;

use log::debug;

use crate::application::dto::connection_settings::ConnectionSettings;
use crate::domain::entities::credentials::Credentials;
use crate::domain::errors::RegistrationError;
use crate::domain::repositories::credential_source::CredentialSource;

/// ログイン情報解決ユースケース
///
/// 設定は秘密情報そのものではなく、秘密情報を保持する変数の名前を持つ
pub struct ResolveCredentialsUseCase<C: CredentialSource> {
    source: Arc<C>,
}

impl<C: CredentialSource> ResolveCredentialsUseCase<C> {
    pub fn new(source: Arc<C>) -> Self {
        Self { source }
    }

    /// ログイン情報を解決
    ///
    /// # Errors
    ///
    /// 変数が未設定、または空文字列の場合に `MissingCredential` を返す
    pub fn execute(&self, settings: &ConnectionSettings) -> Result<Credentials, RegistrationError> {
        let login = self.lookup("user", &settings.user_variable)?;
        let password = self.lookup("password", &settings.password_variable)?;

        debug!(
            "Resolved credentials from {} / {}",
            settings.user_variable, settings.password_variable
        );

        Ok(Credentials::new(login, password))
    }

    fn lookup(&self, key: &str, variable: &str) -> Result<String, RegistrationError> {
        match self.source.lookup(variable) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(RegistrationError::MissingCredential {
                key: key.to_string(),
                variable: variable.to_string(),
            }),
        }
    }
}
