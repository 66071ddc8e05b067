//! Impls - ports の実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **JsonDeserializer**: serde_json によるパラメータのデコード
//! - **ServiceRegistry**: Capability → Deserializer の対応表
//! - **InMemoryPresenter**: フェーズを記録するだけの表示層
//!
//! 本物の表示層（ウィンドウ、画面遷移）はホスト側のクレートで Presenter を実装します。

pub mod inmem_presenter;
pub mod json;
pub mod registry;

pub use self::inmem_presenter::{CloseBehavior, InMemoryPresenter};
pub use self::json::JsonDeserializer;
pub use self::registry::{RegistryError, ServiceRegistry};
