//! Deserializer port - パラメータ文字列のデコード
//!
//! # 学習ポイント
//! - Object-safe trait (Deserializer) + ジェネリック関数 (decode::<T>)
//! - Type erasure パターン: 文字列 → serde_json::Value → T

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::domain::{Capability, DecodeError, UnitError};

/// Deserializer は文字列を serde_json::Value に変換
///
/// ジェネリックなメソッドを持たないので `dyn Deserializer` として
/// レジストリに格納できます。型付きのデコードは [`decode`] で行います。
pub trait Deserializer: Send + Sync {
    fn parse(&self, text: &str) -> Result<serde_json::Value, DecodeError>;
}

/// DeserializerRegistry は Capability から Deserializer を解決する
///
/// # 設計
/// - グローバルな service locator ではなく、ホストが明示的に注入する
/// - 未登録なら `UnitError::DependencyResolution` を返す
pub trait DeserializerRegistry: Send + Sync {
    fn resolve(&self, capability: &Capability) -> Result<Arc<dyn Deserializer>, UnitError>;
}

/// 文字列を `T` にデコードする
///
/// 構文エラーも型の不一致も `DecodeError` として返します。
pub fn decode<T: DeserializeOwned>(
    deserializer: &dyn Deserializer,
    text: &str,
) -> Result<T, DecodeError> {
    let value = deserializer.parse(text)?;
    let decoded = serde_json::from_value(value)?;
    Ok(decoded)
}
