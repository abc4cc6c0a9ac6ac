//! Environment Credential Source
//!
//! CredentialSourceの実装（プロセスの環境変数、固定マップ）

use std::collections::HashMap;

use crate::domain::repositories::credential_source::CredentialSource;

/// プロセスの環境変数を参照する
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialSource for ProcessEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// 固定の名前→値マップ（プロセス環境に触れずに済む）
impl CredentialSource for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}
