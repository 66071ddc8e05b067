//! HostBuilder - ホストの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - 開発体験の改善（明確なエラーメッセージ）

use std::sync::Arc;

use super::host::Host;
use crate::domain::Capability;
use crate::impls::{JsonDeserializer, RegistryError, ServiceRegistry};
use crate::ports::{Deserializer, Presenter};
use crate::unit::ParameterLoader;

/// HostBuilder は Host を構築
///
/// # 使用例
/// ```ignore
/// let host = HostBuilder::new()
///     .with_json()?
///     .expect_capabilities(&["converter.json"])
///     .presenter(Arc::new(InMemoryPresenter::new()))
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - expect_capabilities() で必要な Capability を宣言
/// - build() 時に「期待集合 ⊆ 登録済み集合」をチェック
/// - Presenter が無ければ BuildError を返す
pub struct HostBuilder {
    registry: ServiceRegistry,
    expected: Option<Vec<Capability>>,
    presenter: Option<Arc<dyn Presenter>>,
    parameter_capability: Capability,
}

/// BuildError はホスト構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing capabilities: {0:?}. These capabilities were expected but not registered.")]
    MissingCapabilities(Vec<Capability>),

    #[error("No presenter configured. Call presenter() before build().")]
    MissingPresenter,
}

impl HostBuilder {
    pub fn new() -> Self {
        Self {
            registry: ServiceRegistry::new(),
            expected: None,
            presenter: None,
            parameter_capability: Capability::json_converter(),
        }
    }

    /// Deserializer を登録
    pub fn register(
        mut self,
        capability: Capability,
        deserializer: Arc<dyn Deserializer>,
    ) -> Result<Self, RegistryError> {
        self.registry.register(capability, deserializer)?;
        Ok(self)
    }

    /// JsonDeserializer を `converter.json` として登録
    pub fn with_json(self) -> Result<Self, RegistryError> {
        self.register(Capability::json_converter(), Arc::new(JsonDeserializer))
    }

    /// 必要な Capability のリストを設定
    pub fn expect_capabilities(mut self, capabilities: &[&str]) -> Self {
        self.expected = Some(capabilities.iter().map(|&c| Capability::new(c)).collect());
        self
    }

    pub fn presenter(mut self, presenter: Arc<dyn Presenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    /// パラメータのデコードに使う Capability（デフォルトは `converter.json`）
    pub fn parameter_capability(mut self, capability: Capability) -> Self {
        self.parameter_capability = capability;
        self
    }

    /// HostBuilder を検証して Host を生成
    ///
    /// # 検証
    /// - expect_capabilities() の Capability が全て登録されているか
    /// - Presenter が設定されているか
    pub fn build(self) -> Result<Host, BuildError> {
        if let Some(expected) = &self.expected {
            let missing: Vec<Capability> = expected
                .iter()
                .filter(|c| !self.registry.contains(c))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingCapabilities(missing));
            }
        }
        let presenter = self.presenter.ok_or(BuildError::MissingPresenter)?;

        tracing::debug!(
            capabilities = ?self.registry.registered(),
            "host built"
        );
        let loader = ParameterLoader::new(Arc::new(self.registry))
            .with_capability(self.parameter_capability);
        Ok(Host::new(loader, presenter))
    }
}

impl Default for HostBuilder {
    fn default() -> Self {
        Self::new()
    }
}
