//! App - アプリケーション層
//!
//! ports の実装を組み合わせて、ホストがユニットを扱う入口を提供します。
//!
//! # 主要コンポーネント
//! - **HostBuilder**: Deserializer と Presenter のワイヤリング、起動時検証
//! - **Host**: ユニットの読み込みと result チャネルの接続

pub mod builder;
pub mod host;

pub use self::builder::{BuildError, HostBuilder};
pub use self::host::{Host, LoadRequest, PendingResult};
