//! # Credential Source Trait
//!
//! 名前付きの秘密情報（環境変数）の参照を抽象化

#[cfg(test)]
use mockall::automock;

/// 秘密情報の参照元
///
/// 本番ではプロセスの環境変数、テストではモックやマップを使う
#[cfg_attr(test, automock)]
pub trait CredentialSource: Send + Sync {
    /// 名前に対応する値を返す（未設定なら `None`）
    fn lookup(&self, name: &str) -> Option<String>;
}
