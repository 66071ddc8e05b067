//! JsonDeserializer - serde_json による Deserializer 実装

use crate::domain::DecodeError;
use crate::ports::Deserializer;

/// JsonDeserializer はパラメータ文字列を JSON として読む
pub struct JsonDeserializer;

impl JsonDeserializer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonDeserializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Deserializer for JsonDeserializer {
    fn parse(&self, text: &str) -> Result<serde_json::Value, DecodeError> {
        Ok(serde_json::from_str(text)?)
    }
}
