//! Resolution - CompletionChannel の終端状態

use super::errors::PlatformError;

/// Resolution は result チャネルが一度だけ到達する終端状態
///
/// - Completed: 明示的な close が成功し、結果が届いた
/// - Cancelled: close を経由しない destroy（暗黙のキャンセル）
/// - Failed: teardown 要求がエラーになった
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Completed(T),
    Cancelled,
    Failed(PlatformError),
}

impl<T> Resolution<T> {
    /// Completed なら結果を取り出す
    pub fn into_result(self) -> Option<T> {
        match self {
            Resolution::Completed(value) => Some(value),
            Resolution::Cancelled | Resolution::Failed(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Resolution::Completed(_) => "completed",
            Resolution::Cancelled => "cancelled",
            Resolution::Failed(_) => "failed",
        }
    }
}
