//! ResultUnit - 結果を返すユニットの close プロトコル
//!
//! # 学習ポイント
//! - ラッパー型による合成（継承の代わりに inner ユニットへ委譲）
//! - AtomicUsize + Drop ガードによる ClosingFlag（どの出口でも必ず戻る）
//! - CancellationToken の監視タスクと Weak 参照（監視がユニットを生かし続けない）
//!
//! # 競合の整理
//! - 明示的な close: Presenter に teardown を要求し、成功したら Completed
//! - キャンセル信号: 同じ teardown 要求を出す（destroy 経由で Cancelled）
//! - 暗黙の destroy: close 中でなければ Cancelled
//!
//! close が受理されると Presenter が close の途中で `view_destroy` を呼びます。
//! ClosingFlag が立っている間の destroy はキャンセル扱いにしません。

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio_util::sync::CancellationToken;

use super::completion::CompletionChannel;
use super::lifecycle::Lifecycle;
use crate::domain::{Bundle, CloseState, UnitError};
use crate::ports::Presenter;

/// ResultUnit は inner ユニットに型付きの result チャネルを付け足す
///
/// # 使用例
/// ```ignore
/// let unit = Arc::new(ResultUnit::<PickerUnit, Color>::new(PickerUnit::default(), presenter));
/// let channel = CompletionChannel::new();
/// let cancel = CancellationToken::new();
/// unit.bind(channel.clone(), cancel.clone())?;
///
/// // アプリ側
/// unit.close(Color::Red).await;
///
/// // ホスト側
/// let picked = channel.wait().await;
/// ```
pub struct ResultUnit<U, T> {
    inner: U,
    presenter: Arc<dyn Presenter>,
    channel: OnceLock<CompletionChannel<T>>,
    watcher: OnceLock<AbortHandle>,
    /// 進行中の明示的 close の数（0 でなければ ClosingFlag = true）
    closing: AtomicUsize,
    destroyed: AtomicBool,
}

impl<U, T> ResultUnit<U, T> {
    pub fn new(inner: U, presenter: Arc<dyn Presenter>) -> Self {
        Self {
            inner,
            presenter,
            channel: OnceLock::new(),
            watcher: OnceLock::new(),
            closing: AtomicUsize::new(0),
            destroyed: AtomicBool::new(false),
        }
    }

    pub fn inner(&self) -> &U {
        &self.inner
    }

    pub fn is_bound(&self) -> bool {
        self.channel.get().is_some()
    }

    pub fn is_closing(&self) -> bool {
        self.closing.load(Ordering::SeqCst) > 0
    }

    pub fn state(&self) -> CloseState {
        if self.destroyed.load(Ordering::SeqCst) {
            CloseState::Destroyed
        } else if self.is_closing() {
            CloseState::Closing
        } else {
            CloseState::Active
        }
    }
}

impl<U, T> ResultUnit<U, T>
where
    U: Lifecycle + 'static,
    T: Send + Sync + 'static,
{
    /// チャネルとキャンセル信号を結びつける
    ///
    /// 信号が発火すると、このユニット自身に対して teardown を要求します。
    /// tokio ランタイムの中で呼ぶ必要があります。
    ///
    /// # エラー
    /// - `UnitError::NoRuntime`: tokio ランタイムの外で呼ばれた（何も結びつけない）
    /// - `UnitError::AlreadyBound`: 2 回目の呼び出し（プログラミングエラー）
    pub fn bind(
        self: &Arc<Self>,
        channel: CompletionChannel<T>,
        signal: CancellationToken,
    ) -> Result<(), UnitError> {
        let runtime = Handle::try_current().map_err(|_| UnitError::NoRuntime)?;
        if self.channel.set(channel).is_err() {
            tracing::warn!("bind called twice; keeping the first completion channel");
            return Err(UnitError::AlreadyBound);
        }

        let unit = Arc::downgrade(self);
        let watcher = runtime.spawn(async move {
            signal.cancelled().await;
            if let Some(unit) = unit.upgrade() {
                unit.close_on_cancel().await;
            }
        });
        // channel の set に成功した呼び出しだけがここに来る
        let _ = self.watcher.set(watcher.abort_handle());
        tracing::debug!("result unit bound");
        Ok(())
    }

    /// 結果を付けて閉じる
    ///
    /// # フロー
    /// 1. ClosingFlag を立てる
    /// 2. Presenter に teardown を要求する
    /// 3. エラーなら Failed で解決を試み、`false` を返す
    /// 4. 閉じたなら Completed で解決を試み、`true` を返す
    /// 5. 閉じなかったならチャネルには触れず `false`（後で再試行できる）
    ///    ただし他の close が進行しておらず、ユニットが既に destroy されていたら Cancelled
    /// 6. どの出口でも ClosingFlag を戻す
    pub async fn close(&self, result: T) -> bool {
        let _closing = ClosingGuard::enter(&self.closing);

        let did_close = match self.presenter.request_close(self).await {
            Ok(did_close) => did_close,
            Err(e) => {
                tracing::warn!(error = %e, "teardown request failed; result resolved as failed");
                if let Some(channel) = self.channel.get() {
                    channel.try_resolve_failure(e);
                }
                return false;
            }
        };

        if did_close {
            if let Some(channel) = self.channel.get()
                && !channel.try_resolve_success(result)
            {
                tracing::debug!("unit closed but the result was already resolved");
            }
            tracing::info!("unit closed with result");
        } else if self.destroyed.load(Ordering::SeqCst)
            && self.closing.load(Ordering::SeqCst) == 1
        {
            // キャンセル経路の destroy が ClosingFlag のせいで Cancelled を飛ばした
            if let Some(channel) = self.channel.get()
                && channel.try_resolve_cancelled()
            {
                tracing::info!("unit was torn down during close; result cancelled");
            }
        } else {
            tracing::info!("teardown refused; unit stays open");
        }
        did_close
    }

    /// キャンセル信号から呼ばれる close 経路
    ///
    /// ClosingFlag は立てないので、受理されれば destroy が Cancelled を解決する。
    async fn close_on_cancel(&self) {
        tracing::debug!("cancellation signal fired; requesting teardown");
        match self.presenter.request_close(self).await {
            Ok(true) => tracing::info!("unit closed by cancellation"),
            Ok(false) => tracing::info!("teardown refused after cancellation; unit stays open"),
            Err(e) => {
                tracing::warn!(error = %e, "teardown request failed after cancellation");
                if let Some(channel) = self.channel.get() {
                    channel.try_resolve_failure(e);
                }
            }
        }
    }
}

#[async_trait]
impl<U, T> Lifecycle for ResultUnit<U, T>
where
    U: Lifecycle,
    T: Send + Sync,
{
    fn view_created(&self) {
        self.inner.view_created();
    }

    fn view_appearing(&self) {
        self.inner.view_appearing();
    }

    fn view_appeared(&self) {
        self.inner.view_appeared();
    }

    fn view_disappearing(&self) {
        self.inner.view_disappearing();
    }

    fn view_disappeared(&self) {
        self.inner.view_disappeared();
    }

    fn view_destroy(&self) {
        if !self.is_closing()
            && let Some(channel) = self.channel.get()
            && channel.try_resolve_cancelled()
        {
            tracing::info!("unit destroyed without close; result cancelled");
        }
        self.destroyed.store(true, Ordering::SeqCst);
        self.inner.view_destroy();
    }

    fn init_from_bundle(&self, parameters: &Bundle) {
        self.inner.init_from_bundle(parameters);
    }

    fn reload_from_bundle(&self, state: &Bundle) {
        self.inner.reload_from_bundle(state);
    }

    fn save_state_to_bundle(&self, bundle: &mut Bundle) {
        self.inner.save_state_to_bundle(bundle);
    }

    fn start(&self) {
        self.inner.start();
    }

    async fn initialize(&self) -> Result<(), UnitError> {
        self.inner.initialize().await
    }
}

impl<U, T> Drop for ResultUnit<U, T> {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.get() {
            watcher.abort();
        }
    }
}

/// close の間だけ ClosingFlag を立てるガード
struct ClosingGuard<'a> {
    closing: &'a AtomicUsize,
}

impl<'a> ClosingGuard<'a> {
    fn enter(closing: &'a AtomicUsize) -> Self {
        closing.fetch_add(1, Ordering::SeqCst);
        Self { closing }
    }
}

impl Drop for ClosingGuard<'_> {
    fn drop(&mut self) {
        self.closing.fetch_sub(1, Ordering::SeqCst);
    }
}
