//! 节点取值

use crate::epub::opf::node::ParsedNode;

/// 取节点的第一个字符串值
///
/// 序列取第一个条目（即使它为空而后续条目有值）；元素取其文本；
/// 没有可提取文本时返回空字符串。
pub fn get_first_string_value_from_node(node: &ParsedNode) -> String {
    match node {
        ParsedNode::Sequence(items) => items
            .first()
            .map(get_first_string_value_from_node)
            .unwrap_or_default(),
        ParsedNode::Scalar(text) => text.clone(),
        ParsedNode::Element(element) => element.text().unwrap_or_default().to_string(),
    }
}
