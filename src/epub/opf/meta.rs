//! meta标签解释
//!
//! `<meta>` 在OPF2与OPF3中有多种写法，每个条目按固定优先级尝试各写法，
//! 第一个完全匹配的写法生效；都不匹配的条目被静默跳过。

use crate::epub::opf::metadata::Metadata;
use crate::epub::opf::node::{Element, ParsedNode};
use crate::epub::opf::tag::get_clean_tag_name;
use tracing::debug;

/// 一种meta写法：匹配时返回要写入的 (键, 值)
type MetaEncoding = fn(&Element) -> Option<(String, Option<String>)>;

/// 按优先级排列的标准写法
const ENCODINGS: [MetaEncoding; 3] = [name_content_pair, nested_name_pair, nested_property_text];

/// 解析metadata元素下的全部meta子元素
///
/// 无论 `meta` 出现几次、带不带前缀，都只在这里处理一次。
pub fn parse_meta_node(metadata_node: &Element, out: &mut Metadata) {
    parse_meta_node_with(metadata_node, out, false);
}

/// 同 [`parse_meta_node`]，`inline_property` 为真时额外接受
/// `<meta property="...">文本</meta>` 写法（优先级最低）
pub fn parse_meta_node_with(metadata_node: &Element, out: &mut Metadata, inline_property: bool) {
    // `meta` 与 `opf:meta` 是不同的键，按文档顺序逐个处理
    let entries = metadata_node
        .children()
        .iter()
        .filter(|(tag, _)| get_clean_tag_name(tag) == "meta")
        .flat_map(|(_, node)| node.entries());

    for entry in entries {
        let ParsedNode::Element(element) = entry else {
            debug!("跳过没有属性的meta条目");
            continue;
        };

        let matched = ENCODINGS
            .iter()
            .find_map(|encoding| encoding(element))
            .or_else(|| inline_property.then(|| inline_property_text(element)).flatten());

        match matched {
            Some((key, value)) => out.set(key, value),
            None => debug!(attributes = ?element.attributes(), "meta条目不匹配任何写法，已跳过"),
        }
    }
}

/// `<meta name="cover" content="cover-id"/>`
fn name_content_pair(meta: &Element) -> Option<(String, Option<String>)> {
    let name = meta.attribute("name")?;
    let content = meta.attribute("content")?;
    Some((name.to_string(), Some(content.to_string())))
}

/// `<meta><x name="key" content="value"/></meta>`，content可以缺失
fn nested_name_pair(meta: &Element) -> Option<(String, Option<String>)> {
    if meta.children().len() != 1 {
        return None;
    }
    let (_, child) = meta.children().first()?;
    let child = child.as_element()?;
    let name = child.attribute("name")?;
    Some((name.to_string(), child.attribute("content").map(str::to_string)))
}

/// `<meta><x property="key">value</x></meta>`
///
/// 取第一个带property属性的子元素，它没有文本时整个条目不匹配。
fn nested_property_text(meta: &Element) -> Option<(String, Option<String>)> {
    let child = meta
        .children()
        .values()
        .flat_map(ParsedNode::entries)
        .filter_map(ParsedNode::as_element)
        .find(|child| child.attribute("property").is_some())?;
    let property = child.attribute("property")?;
    let text = child.text().filter(|t| !t.is_empty())?;
    Some((property.to_string(), Some(text.to_string())))
}

/// `<meta property="dcterms:modified">2024-01-01</meta>`，带refines的条目除外
fn inline_property_text(meta: &Element) -> Option<(String, Option<String>)> {
    if meta.attribute("refines").is_some() {
        return None;
    }
    let property = meta.attribute("property")?;
    let text = meta.text().filter(|t| !t.is_empty())?;
    Some((property.to_string(), Some(text.to_string())))
}
