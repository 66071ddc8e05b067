//! Ports - 抽象化レイヤー
//!
//! ユニットが依存する外部システムへのインターフェースを定義します。
//! ホストが実装を注入し、ユニットは trait だけを知っています。
//!
//! # 含まれる port
//! - **Deserializer / DeserializerRegistry**: パラメータ文字列のデコード
//! - **Presenter**: 表示層への teardown 要求

pub mod deserializer;
pub mod presenter;

pub use self::deserializer::{Deserializer, DeserializerRegistry, decode};
pub use self::presenter::Presenter;
