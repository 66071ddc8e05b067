//! InMemoryPresenter - 開発用の Presenter
//!
//! 実際の画面は持たず、ユニットに送ったフェーズを記録するだけです。
//! teardown の可否は CloseBehavior で切り替えます。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::{LifecyclePhase, PlatformError};
use crate::ports::Presenter;
use crate::unit::{Lifecycle, LifecycleExt};

/// teardown 要求への応じ方
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseBehavior {
    /// disappearing → disappeared → destroyed を送り、`Ok(true)`
    Allow,
    /// 何もせず `Ok(false)`
    Refuse,
    /// `Err(PlatformError)`
    Fail(String),
}

/// InMemoryPresenter は開発・テスト用の表示層
///
/// # 使用例
/// ```ignore
/// let presenter = Arc::new(InMemoryPresenter::new());
/// presenter.present(&unit);
/// presenter.set_behavior(CloseBehavior::Refuse);
/// assert!(!unit.close(result).await);
/// ```
pub struct InMemoryPresenter {
    behavior: Mutex<CloseBehavior>,
    sent: Mutex<Vec<LifecyclePhase>>,
    close_requests: AtomicUsize,
}

impl InMemoryPresenter {
    pub fn new() -> Self {
        Self::with_behavior(CloseBehavior::Allow)
    }

    pub fn with_behavior(behavior: CloseBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            sent: Mutex::new(Vec::new()),
            close_requests: AtomicUsize::new(0),
        }
    }

    pub fn set_behavior(&self, behavior: CloseBehavior) {
        *lock(&self.behavior) = behavior;
    }

    /// created → appearing → appeared を送る
    pub fn present(&self, unit: &dyn Lifecycle) {
        self.send(unit, &LifecyclePhase::PRESENT);
    }

    /// これまでに送ったフェーズ
    pub fn sent(&self) -> Vec<LifecyclePhase> {
        lock(&self.sent).clone()
    }

    pub fn close_requests(&self) -> usize {
        self.close_requests.load(Ordering::SeqCst)
    }

    fn send(&self, unit: &dyn Lifecycle, phases: &[LifecyclePhase]) {
        for &phase in phases {
            lock(&self.sent).push(phase);
            unit.notify(phase);
        }
    }
}

impl Default for InMemoryPresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Presenter for InMemoryPresenter {
    async fn request_close(&self, unit: &dyn Lifecycle) -> Result<bool, PlatformError> {
        self.close_requests.fetch_add(1, Ordering::SeqCst);
        // ロックを握ったままユニットのフックを呼ばない
        let behavior = lock(&self.behavior).clone();
        match behavior {
            CloseBehavior::Allow => {
                self.send(unit, &LifecyclePhase::DISMISS);
                Ok(true)
            }
            CloseBehavior::Refuse => Ok(false),
            CloseBehavior::Fail(message) => Err(PlatformError::new(message)),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
