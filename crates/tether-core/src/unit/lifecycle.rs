//! Lifecycle - 表示ライフサイクルと状態フックを持つユニットの基本 trait
//!
//! # 学習ポイント
//! - デフォルト実装付き trait メソッド（上書きしたいフックだけ実装する）
//! - Blanket impl による拡張 trait (LifecycleExt)
//! - `&self` フック + 内部可変性（フックは別タスクから呼ばれることがある）

use async_trait::async_trait;

use crate::domain::{Bundle, LifecyclePhase, UnitError};

/// Lifecycle はユニットが受け取る通知の集合
///
/// # 使用例
/// ```ignore
/// struct Profile {
///     name: Mutex<String>,
/// }
///
/// #[async_trait]
/// impl Lifecycle for Profile {
///     fn save_state_to_bundle(&self, bundle: &mut Bundle) {
///         bundle.insert("name", self.name.lock().unwrap().clone());
///     }
/// }
/// ```
///
/// 通知の順序（created → appearing → appeared → disappearing → disappeared → destroyed）
/// を守るのはホストの責務です。
#[async_trait]
pub trait Lifecycle: Send + Sync {
    fn view_created(&self) {}

    fn view_appearing(&self) {}

    fn view_appeared(&self) {}

    fn view_disappearing(&self) {}

    fn view_disappeared(&self) {}

    fn view_destroy(&self) {}

    fn init_from_bundle(&self, _parameters: &Bundle) {}

    fn reload_from_bundle(&self, _state: &Bundle) {}

    fn save_state_to_bundle(&self, _bundle: &mut Bundle) {}

    /// 実際の作業を始める合図
    fn start(&self) {}

    /// 非同期の初期化。デフォルトは何もせず成功する
    async fn initialize(&self) -> Result<(), UnitError> {
        Ok(())
    }
}

/// LifecycleExt はホスト向けの入口
///
/// `init` / `reload_state` / `save_state` は対応する `*_bundle` フックへ委譲します。
pub trait LifecycleExt: Lifecycle {
    fn init(&self, parameters: &Bundle) {
        self.init_from_bundle(parameters);
    }

    fn reload_state(&self, state: &Bundle) {
        self.reload_from_bundle(state);
    }

    fn save_state(&self, state: &mut Bundle) {
        self.save_state_to_bundle(state);
    }

    /// フェーズに対応する `view_*` フックを呼ぶ
    fn notify(&self, phase: LifecyclePhase) {
        tracing::debug!(?phase, "lifecycle notification");
        match phase {
            LifecyclePhase::Created => self.view_created(),
            LifecyclePhase::Appearing => self.view_appearing(),
            LifecyclePhase::Appeared => self.view_appeared(),
            LifecyclePhase::Disappearing => self.view_disappearing(),
            LifecyclePhase::Disappeared => self.view_disappeared(),
            LifecyclePhase::Destroyed => self.view_destroy(),
        }
    }
}

impl<L: Lifecycle + ?Sized> LifecycleExt for L {}
