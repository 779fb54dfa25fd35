//! 解析节点模块
//!
//! XML转换为对象树后的节点表示。同名兄弟元素会折叠为序列，单个元素保持为裸值，
//! 所有解释器都对 [`ParsedNode`] 做模式匹配，而不是在调用处探测形状。

use crate::epub::opf::tag::get_clean_tag_name;
use indexmap::IndexMap;
use std::slice;

/// XML对象树中的节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedNode {
    /// 只有文本内容的元素，空元素为 `""`
    Scalar(String),
    /// 带属性或子元素的元素
    Element(Element),
    /// 两个及以上同名兄弟元素，保持文档顺序
    Sequence(Vec<ParsedNode>),
}

impl ParsedNode {
    /// 以切片形式返回所有条目：序列返回其元素，其他形状返回自身
    pub fn entries(&self) -> &[ParsedNode] {
        match self {
            ParsedNode::Sequence(items) => items,
            other => slice::from_ref(other),
        }
    }

    /// 第一个条目，空序列返回 `None`
    pub fn first(&self) -> Option<&ParsedNode> {
        self.entries().first()
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            ParsedNode::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ParsedNode::Scalar(text) => Some(text),
            _ => None,
        }
    }

    /// 节点自身的属性值（按本地名匹配），标量和序列没有属性
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.as_element().and_then(|e| e.attribute(local_name))
    }
}

/// 元素节点
///
/// 属性与子元素分开存放，避免同名属性和子标签互相覆盖。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    attributes: IndexMap<String, String>,
    children: IndexMap<String, ParsedNode>,
    text: Option<String>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置属性，键保留命名空间前缀（如 `opf:file-as`）
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// 追加子节点
    ///
    /// 第一次出现的标签保存为裸值；同名标签再次出现时折叠为序列，
    /// 之后的同名标签追加到该序列末尾。
    pub fn push_child(&mut self, name: impl Into<String>, node: ParsedNode) {
        let name = name.into();
        match self.children.get_mut(&name) {
            Some(ParsedNode::Sequence(items)) => items.push(node),
            Some(existing) => {
                let first = std::mem::replace(existing, ParsedNode::Sequence(Vec::new()));
                *existing = ParsedNode::Sequence(vec![first, node]);
            }
            None => {
                self.children.insert(name, node);
            }
        }
    }

    /// 追加文本内容（混合内容会被拼接）
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.text.get_or_insert_with(String::new).push_str(text);
    }

    /// 按原样的属性名查找
    pub fn raw_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// 按去掉前缀后的属性名查找，优先精确匹配
    ///
    /// `attribute("file-as")` 同时匹配 `file-as` 与 `opf:file-as`。
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.raw_attribute(local_name).or_else(|| {
            self.attributes
                .iter()
                .find(|(key, _)| get_clean_tag_name(key) == local_name)
                .map(|(_, value)| value.as_str())
        })
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    pub fn children(&self) -> &IndexMap<String, ParsedNode> {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<&ParsedNode> {
        self.children.get(name)
    }

    /// 按去掉前缀后的标签名查找第一个匹配的子节点
    pub fn child_by_local_name(&self, local_name: &str) -> Option<&ParsedNode> {
        self.children
            .iter()
            .find(|(key, _)| get_clean_tag_name(key) == local_name)
            .map(|(_, node)| node)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// 转换为最终节点：没有属性也没有子元素的元素折叠为标量
    ///
    /// 文本先去掉首尾空白，内部连续空白合并为一个空格；只剩空白的文本视为没有文本。
    pub fn into_node(mut self) -> ParsedNode {
        self.text = self
            .text
            .take()
            .map(|raw| normalize_whitespace(&raw))
            .filter(|text| !text.is_empty());

        if self.attributes.is_empty() && self.children.is_empty() {
            ParsedNode::Scalar(self.text.unwrap_or_default())
        } else {
            ParsedNode::Element(self)
        }
    }
}

fn normalize_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
