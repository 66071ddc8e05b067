//! Unit - ライフサイクルを持つ作業単位
//!
//! 継承の連鎖ではなく、能力ごとの trait / 型を組み合わせます。
//!
//! # 構成
//! - **Lifecycle**: 表示フェーズの通知と Bundle フック（全ユニット共通）
//! - **Parameterized + ParameterLoader**: シリアライズされたパラメータの受け取り
//! - **ResultUnit + CompletionChannel**: キャンセル可能な一度きりの結果
//! - **ParameterizedResultUnit**: 上の 2 つの組み合わせ（追加ロジックなし）

pub mod completion;
pub mod lifecycle;
pub mod parameterized;
pub mod parameterized_result;
pub mod result;

#[cfg(test)]
pub(crate) mod testing;

pub use self::completion::CompletionChannel;
pub use self::lifecycle::{Lifecycle, LifecycleExt};
pub use self::parameterized::{ParameterLoader, Parameterized};
pub use self::parameterized_result::ParameterizedResultUnit;
pub use self::result::ResultUnit;
