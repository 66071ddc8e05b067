//! Bundle - 状態の受け渡しに使う key/value コンテナ
//!
//! Bundle は init / reload / save の 3 つのフックでだけ使われます。
//! 永続化の形式（ファイル、プラットフォームの保存領域など）はこのクレートの外側の責務です。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Bundle は文字列 key/value の入れ物
///
/// # 使用例
/// ```ignore
/// let mut bundle = Bundle::new();
/// bundle.insert("scroll_offset", "120");
/// assert_eq!(bundle.get("scroll_offset"), Some("120"));
/// ```
///
/// BTreeMap なので、シリアライズ結果のキー順は常に安定しています。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(default)]
    data: BTreeMap<String, String>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// 値を設定し、以前の値があれば返す
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.data.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Bundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
