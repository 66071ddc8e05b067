//! Parameterized - シリアライズされたパラメータを受け取るユニット
//!
//! # 二層構造
//! - **表層（Typed）**: `Parameterized` trait - ユニットは型付きのパラメータだけを見る
//! - **内部（Dyn）**: `ParameterLoader` - Capability の解決とデコードを 1 箇所で行う
//!
//! デコード処理は ParameterLoader にだけ存在するので、
//! ResultUnit と組み合わせても同じ処理を複製する必要がありません。

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::lifecycle::Lifecycle;
use crate::domain::{Capability, UnitError};
use crate::ports::{DeserializerRegistry, decode};

/// Parameterized は型付きのパラメータで初期化されるユニット
///
/// # 使用例
/// ```ignore
/// #[derive(Deserialize)]
/// struct OpenProfile {
///     user_id: u64,
/// }
///
/// #[async_trait]
/// impl Parameterized for ProfileUnit {
///     type Parameter = OpenProfile;
///
///     async fn initialize_with(&self, parameter: OpenProfile) -> Result<(), UnitError> {
///         self.load(parameter.user_id).await
///     }
/// }
/// ```
#[async_trait]
pub trait Parameterized: Lifecycle {
    type Parameter: DeserializeOwned + Send + 'static;

    async fn initialize_with(&self, parameter: Self::Parameter) -> Result<(), UnitError>;
}

/// ParameterLoader はパラメータ文字列をデコードしてユニットに渡す
///
/// DeserializerRegistry はコンストラクタで注入します（グローバルな解決はしません）。
#[derive(Clone)]
pub struct ParameterLoader {
    registry: Arc<dyn DeserializerRegistry>,
    capability: Capability,
}

impl ParameterLoader {
    pub fn new(registry: Arc<dyn DeserializerRegistry>) -> Self {
        Self {
            registry,
            capability: Capability::json_converter(),
        }
    }

    /// デコードに使う Capability を差し替える
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capability = capability;
        self
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// パラメータ文字列でユニットを初期化する
    ///
    /// # フロー
    /// 1. `None` / 空文字なら何もせず成功（`initialize_with` は呼ばない）
    /// 2. Capability から Deserializer を解決（未登録なら DependencyResolution）
    /// 3. `U::Parameter` にデコード（DecodeError はそのまま返す）
    /// 4. `initialize_with` の結果をそのまま返す
    pub async fn init<U>(&self, unit: &U, parameter: Option<&str>) -> Result<(), UnitError>
    where
        U: Parameterized + ?Sized,
    {
        let text = match parameter {
            Some(text) if !text.is_empty() => text,
            // 「パラメータ不要」と「渡し忘れ」は区別できない
            _ => {
                tracing::debug!("no parameter text; typed initializer skipped");
                return Ok(());
            }
        };

        let deserializer = self.registry.resolve(&self.capability)?;
        let parameter: U::Parameter = decode(deserializer.as_ref(), text)?;
        tracing::debug!(capability = %self.capability, "parameter decoded");
        unit.initialize_with(parameter).await
    }
}
