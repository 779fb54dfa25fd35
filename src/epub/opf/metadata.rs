//! 元数据记录模块
//!
//! 提供从OPF中提取出的键值元数据记录。

use indexmap::IndexMap;
use serde::Serialize;

/// 封面键
pub const COVER: &str = "cover";
/// 创建者键
pub const CREATOR: &str = "creator";
/// 创建者排序名键
pub const CREATOR_FILE_AS: &str = "creatorFileAs";
/// ISBN键
pub const ISBN: &str = "ISBN";
/// UUID键
pub const UUID: &str = "UUID";

/// OPF文件中的元数据记录
///
/// 键区分大小写，按插入顺序保存。值为 `None` 表示尝试过提取但属性缺失，
/// 与键不存在（没有尝试）是两种不同的状态。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: IndexMap<String, Option<String>>,
}

impl Metadata {
    /// 创建空的元数据记录
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入字段，已存在的键会被覆盖但保持原有位置
    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) {
        self.fields.insert(key.into(), value);
    }

    /// 获取字段的原始状态：外层 `None` 表示键不存在，内层 `None` 表示值未定义
    pub fn get(&self, key: &str) -> Option<&Option<String>> {
        self.fields.get(key)
    }

    /// 获取字段的字符串值
    pub fn value(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 按插入顺序遍历全部字段
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn title(&self) -> Option<&str> {
        self.value("title")
    }

    pub fn creator(&self) -> Option<&str> {
        self.value(CREATOR)
    }

    pub fn creator_file_as(&self) -> Option<&str> {
        self.value(CREATOR_FILE_AS)
    }

    pub fn isbn(&self) -> Option<&str> {
        self.value(ISBN)
    }

    pub fn uuid(&self) -> Option<&str> {
        self.value(UUID)
    }

    pub fn publisher(&self) -> Option<&str> {
        self.value("publisher")
    }

    pub fn language(&self) -> Option<&str> {
        self.value("language")
    }

    /// 封面引用（通常为清单项ID）
    pub fn cover(&self) -> Option<&str> {
        self.value(COVER)
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in iter {
            metadata.set(key, value);
        }
        metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_undefined_are_distinct() {
        let mut metadata = Metadata::new();
        metadata.set("john", None);

        assert_eq!(metadata.get("john"), Some(&None));
        assert_eq!(metadata.get("jane"), None);
        assert!(metadata.contains_key("john"));
        assert_eq!(metadata.value("john"), None);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut metadata = Metadata::new();
        metadata.set(ISBN, Some("1".to_string()));
        metadata.set(UUID, Some("u".to_string()));
        metadata.set(ISBN, Some("2".to_string()));

        let entries: Vec<_> = metadata.iter().collect();
        assert_eq!(entries, vec![(ISBN, Some("2")), (UUID, Some("u"))]);
        assert_eq!(metadata.isbn(), Some("2"));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let metadata: Metadata = [("Title", Some("A".to_string()))].into_iter().collect();
        assert_eq!(metadata.title(), None);
        assert_eq!(metadata.value("Title"), Some("A"));
    }

    #[test]
    fn test_serialize_as_ordered_map() {
        let metadata: Metadata = [
            ("title", Some("书名".to_string())),
            ("john", None),
        ]
        .into_iter()
        .collect();
        let yaml = serde_yml::to_string(&metadata).unwrap();
        assert!(yaml.contains("john: null"));
        assert!(yaml.find("title").unwrap() < yaml.find("john").unwrap());
    }
}
