//! 标签名处理

use crate::epub::opf::node::Element;

/// 去掉标签名的命名空间前缀，如 `dc:creator` -> `creator`
///
/// 没有前缀时原样返回。
pub fn get_clean_tag_name(tag: &str) -> &str {
    match tag.rfind(':') {
        Some(index) => &tag[index + 1..],
        None => tag,
    }
}

/// 按文档顺序返回元素的子标签名（保留前缀）
pub fn get_tag_names(element: &Element) -> Vec<&str> {
    element.children().keys().map(String::as_str).collect()
}
