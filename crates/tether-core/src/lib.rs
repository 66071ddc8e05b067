//! tether-core
//!
//! Core building blocks for lifecycle-aware units of work.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（Bundle, Capability, LifecyclePhase, Resolution, errors）
//! - **ports**: 抽象化レイヤー（Deserializer, DeserializerRegistry, Presenter）
//! - **unit**: ユニットの能力（Lifecycle, Parameterized, ResultUnit, CompletionChannel）
//! - **impls**: 実装（JsonDeserializer, ServiceRegistry, InMemoryPresenter）
//! - **app**: ホスト側の入口（HostBuilder, Host）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod unit;

pub use tokio_util::sync::CancellationToken;
