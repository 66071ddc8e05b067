//! Phase - ユニットの表示ライフサイクルと close プロトコルの状態
//!
//! # 状態遷移
//! - 表示: created → appearing → appeared → disappearing → disappeared → destroyed
//! - close: active → closing → destroyed
//!
//! 表示フェーズの順序はホストが守ります。このクレートは順序を強制しません。

use serde::{Deserialize, Serialize};

/// LifecyclePhase は表示ライフサイクルの通知
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    Created,
    Appearing,
    Appeared,
    Disappearing,
    Disappeared,
    Destroyed,
}

impl LifecyclePhase {
    /// 表示時にホストが送る順序
    pub const PRESENT: [LifecyclePhase; 3] = [Self::Created, Self::Appearing, Self::Appeared];

    /// teardown 時にホストが送る順序
    pub const DISMISS: [LifecyclePhase; 3] =
        [Self::Disappearing, Self::Disappeared, Self::Destroyed];
}

/// CloseState は ResultUnit の close プロトコル上の状態
///
/// - Active: close 待ち
/// - Closing: 明示的な close が進行中
/// - Destroyed: destroy 通知を受け取った後
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloseState {
    Active,
    Closing,
    Destroyed,
}
