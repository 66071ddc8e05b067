//! CompletionChannel - 一度だけ解決される result セル
//!
//! # 学習ポイント
//! - `tokio::sync::OnceCell::set` による「最初の 1 回だけ勝つ」書き込み
//! - `Notify` による待機（notified() を先に作ってから状態を確認する）
//!
//! ホストが作成して所有し、ユニットには clone したハンドルを渡します。
//! 公開している書き込み操作は try_resolve_* だけです。

use std::sync::Arc;

use tokio::sync::{Notify, OnceCell};

use crate::domain::{PlatformError, Resolution};

/// CompletionChannel はホストとユニットで共有する result チャネル
///
/// # 不変条件
/// - Completed / Cancelled / Failed のいずれかに 1 回だけ解決される
/// - 2 回目以降の try_resolve_* は何もせず `false` を返す
///
/// # 使用例
/// ```ignore
/// let channel = CompletionChannel::<String>::new();
/// unit.bind(channel.clone(), token.clone())?;
/// match channel.wait().await {
///     Resolution::Completed(name) => println!("picked {name}"),
///     Resolution::Cancelled => println!("dismissed"),
///     Resolution::Failed(e) => eprintln!("{e}"),
/// }
/// ```
pub struct CompletionChannel<T> {
    inner: Arc<ChannelInner<T>>,
}

struct ChannelInner<T> {
    cell: OnceCell<Resolution<T>>,
    resolved: Notify,
}

impl<T> CompletionChannel<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ChannelInner {
                cell: OnceCell::new(),
                resolved: Notify::new(),
            }),
        }
    }

    /// 成功値で解決を試みる。この呼び出しが勝った場合だけ `true`
    pub fn try_resolve_success(&self, value: T) -> bool {
        self.try_resolve(Resolution::Completed(value))
    }

    pub fn try_resolve_cancelled(&self) -> bool {
        self.try_resolve(Resolution::Cancelled)
    }

    pub fn try_resolve_failure(&self, error: PlatformError) -> bool {
        self.try_resolve(Resolution::Failed(error))
    }

    pub fn is_resolved(&self) -> bool {
        self.inner.cell.initialized()
    }

    fn try_resolve(&self, resolution: Resolution<T>) -> bool {
        let kind = resolution.kind();
        match self.inner.cell.set(resolution) {
            Ok(()) => {
                self.inner.resolved.notify_waiters();
                tracing::debug!(kind, "completion channel resolved");
                true
            }
            Err(_) => {
                tracing::debug!(kind, "completion channel already resolved; attempt ignored");
                false
            }
        }
    }
}

impl<T: Clone> CompletionChannel<T> {
    /// 現在の解決状態（未解決なら None）
    pub fn resolution(&self) -> Option<Resolution<T>> {
        self.inner.cell.get().cloned()
    }

    /// 解決されるまで待つ
    pub async fn wait(&self) -> Resolution<T> {
        loop {
            let notified = self.inner.resolved.notified();
            if let Some(resolution) = self.inner.cell.get() {
                return resolution.clone();
            }
            notified.await;
        }
    }
}

impl<T> Clone for CompletionChannel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for CompletionChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for CompletionChannel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionChannel")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
