//! Errors - ユニット操作のエラー型
//!
//! # 伝播ポリシー
//! - DependencyResolution / Decode: `init` の呼び出し元にそのまま返す（回復しない）
//! - Platform: `close` が捕まえて CompletionChannel に Failed として流す
//! - Initialize: 型付き initializer のエラーをそのまま返す

use thiserror::Error;

use super::capability::Capability;

/// UnitError はユニットの呼び出し元に見えるエラー
#[derive(Debug, Error)]
pub enum UnitError {
    #[error(
        "no implementation of '{capability}' is registered; register a deserializer for it before initializing parameterized units"
    )]
    DependencyResolution { capability: Capability },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("initialize failed: {0}")]
    Initialize(String),

    #[error("unit is already bound to a completion channel")]
    AlreadyBound,

    #[error("bind must be called inside a tokio runtime")]
    NoRuntime,
}

impl UnitError {
    pub fn initialize(message: impl Into<String>) -> Self {
        Self::Initialize(message.into())
    }
}

/// DecodeError はパラメータ文字列が壊れている、または型が合わないことを示す
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("decode failed: {message}")]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// PlatformError は teardown 要求の失敗
///
/// CompletionChannel の Failed に格納されるので Clone 可能にしています。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("teardown request failed: {message}")]
pub struct PlatformError {
    message: String,
}

impl PlatformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
