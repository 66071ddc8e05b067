//! ServiceRegistry - Capability と Deserializer の対応表
//!
//! # 学習ポイント
//! - HashMap での型消去された trait object の管理
//! - Arc による共有所有権（解決した Deserializer は呼び出し元と共有）

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Capability, UnitError};
use crate::ports::{Deserializer, DeserializerRegistry};

/// ServiceRegistry はホストの構築時に組み立て、実行時は読み取り専用で使う
///
/// # 使用例
/// ```ignore
/// let mut registry = ServiceRegistry::new();
/// registry.register(Capability::json_converter(), Arc::new(JsonDeserializer))?;
/// let loader = ParameterLoader::new(Arc::new(registry));
/// ```
#[derive(Default)]
pub struct ServiceRegistry {
    deserializers: HashMap<Capability, Arc<dyn Deserializer>>,
}

/// RegistryError は ServiceRegistry の操作エラー
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Deserializer for capability '{0}' is already registered")]
    AlreadyRegistered(Capability),
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self {
            deserializers: HashMap::new(),
        }
    }

    pub fn register(
        &mut self,
        capability: Capability,
        deserializer: Arc<dyn Deserializer>,
    ) -> Result<(), RegistryError> {
        if self.deserializers.contains_key(&capability) {
            return Err(RegistryError::AlreadyRegistered(capability));
        }
        tracing::debug!(%capability, "deserializer registered");
        self.deserializers.insert(capability, deserializer);
        Ok(())
    }

    pub fn contains(&self, capability: &Capability) -> bool {
        self.deserializers.contains_key(capability)
    }

    pub fn registered(&self) -> Vec<Capability> {
        let mut capabilities: Vec<Capability> = self.deserializers.keys().cloned().collect();
        capabilities.sort();
        capabilities
    }

    pub fn len(&self) -> usize {
        self.deserializers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deserializers.is_empty()
    }
}

impl DeserializerRegistry for ServiceRegistry {
    fn resolve(&self, capability: &Capability) -> Result<Arc<dyn Deserializer>, UnitError> {
        self.deserializers
            .get(capability)
            .cloned()
            .ok_or_else(|| UnitError::DependencyResolution {
                capability: capability.clone(),
            })
    }
}
