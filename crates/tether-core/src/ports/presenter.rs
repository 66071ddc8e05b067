//! Presenter port - ユニットの teardown を決める外部の表示層
//!
//! # 設計原則
//! - teardown の可否を決めるのは Presenter だけ
//! - 受け入れた場合、Presenter が `view_destroy` までの通知を送る
//! - そのため `request_close` の途中でユニットの destroy が走ることがある

use async_trait::async_trait;

use crate::domain::PlatformError;
use crate::unit::Lifecycle;

/// Presenter はユニットを実際に閉じる唯一の手段
///
/// # 戻り値
/// - `Ok(true)`: 閉じた
/// - `Ok(false)`: 今は閉じられない（呼び出し元は後で再試行できる）
/// - `Err(PlatformError)`: teardown 自体が失敗した
#[async_trait]
pub trait Presenter: Send + Sync {
    async fn request_close(&self, unit: &dyn Lifecycle) -> Result<bool, PlatformError>;
}
