//! Capability - レジストリから解決する外部機能の名前

use std::fmt;

use serde::{Deserialize, Serialize};

/// Capability は DeserializerRegistry のキー
///
/// # 命名規約
/// - `{kind}.{format}`
/// - 例: `converter.json`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(String);

impl Capability {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// パラメータ文字列のデコードに使う JSON converter
    pub fn json_converter() -> Self {
        Self::new("converter.json")
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
