//! XML到对象树的转换
//!
//! 基于quick-xml的事件流构建 [`ParsedNode`] 树：
//! - 属性与子元素分开存放，属性名保留前缀
//! - 单个子元素保存为裸值，同名兄弟元素折叠为有序序列
//! - 空元素表示为空字符串，不会丢失键
//! - 文本在元素闭合时统一去掉首尾空白并合并内部空白，混合内容的词之间保留一个空格

use crate::epub::error::{EpubError, Result};
use crate::epub::opf::node::{Element, ParsedNode};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// 解析XML文本，返回根元素的标签名及其节点
///
/// # 参数
/// * `xml_content` - XML文本
///
/// # 返回值
/// * `Result<(String, ParsedNode)>` - (根标签名, 根节点)；文档不是良构XML时返回 `MalformedDocument`
pub fn parse_root(xml_content: &str) -> Result<(String, ParsedNode)> {
    let mut reader = Reader::from_str(xml_content);
    // 不按事件裁剪，空白由 Element::into_node 统一规范化
    reader.config_mut().trim_text(false);
    reader.config_mut().expand_empty_elements = true;

    let mut stack: Vec<(String, Element)> = Vec::new();
    let mut root: Option<(String, ParsedNode)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                if root.is_some() {
                    return Err(EpubError::MalformedDocument(
                        "根元素之后出现了多余的元素".to_string(),
                    ));
                }
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                stack.push((name, read_attributes(e)?));
            }
            Event::End(_) => {
                let (name, element) = stack.pop().ok_or_else(|| {
                    EpubError::MalformedDocument("出现了没有对应开始标签的结束标签".to_string())
                })?;
                let node = element.into_node();
                match stack.last_mut() {
                    Some((_, parent)) => parent.push_child(name, node),
                    None => root = Some((name, node)),
                }
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                push_text(&mut stack, &text)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((name, _)) = stack.last() {
        return Err(EpubError::MalformedDocument(format!("元素 <{}> 没有闭合", name)));
    }

    root.ok_or_else(|| EpubError::MalformedDocument("文档中没有根元素".to_string()))
}

/// 收集开始标签上的全部属性
fn read_attributes(e: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new();
    for attr_result in e.attributes() {
        let attr = attr_result?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?;
        element.set_attribute(key, value);
    }
    Ok(element)
}

fn push_text(stack: &mut [(String, Element)], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some((_, element)) => {
            element.push_text(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(EpubError::MalformedDocument(
            "根元素之外出现了文本内容".to_string(),
        )),
    }
}
