//! 标识符标签解释
//!
//! 每个标识符条目都会被处理：ISBN与UUID写入不同的键，互不冲突；
//! 同一类型出现多次时以文档中最后一个为准。

use crate::epub::opf::config::ParserConfig;
use crate::epub::opf::metadata::{ISBN, Metadata, UUID};
use crate::epub::opf::node::ParsedNode;
use crate::epub::opf::value::get_first_string_value_from_node;
use tracing::debug;

/// 一条分类规则：匹配时返回 (键, 值)
type IdentifierRule = fn(&ParsedNode, &ParserConfig) -> Option<(&'static str, String)>;

/// 按优先级排列，第一个匹配的规则生效
const RULES: [IdentifierRule; 2] = [isbn_rule, uuid_rule];

/// 使用默认配置解析标识符节点
pub fn parse_and_set_identifier_node_data(identifier_node: &ParsedNode, out: &mut Metadata) {
    parse_and_set_identifier_node_data_with(identifier_node, out, &ParserConfig::default_config());
}

/// 解析标识符节点，按配置的比较方式区分ISBN与UUID
pub fn parse_and_set_identifier_node_data_with(
    identifier_node: &ParsedNode,
    out: &mut Metadata,
    config: &ParserConfig,
) {
    for entry in identifier_node.entries() {
        match RULES.iter().find_map(|rule| rule(entry, config)) {
            Some((key, value)) => out.set(key, Some(value)),
            None => debug!("标识符条目既不是ISBN也不是UUID，已跳过"),
        }
    }
}

/// `scheme="ISBN"`（可带 `opf:` 前缀）
fn isbn_rule(entry: &ParsedNode, config: &ParserConfig) -> Option<(&'static str, String)> {
    let scheme = entry.attribute("scheme")?;
    config
        .identifier_matching
        .matches(scheme, "ISBN")
        .then(|| (ISBN, get_first_string_value_from_node(entry)))
}

/// `id="uuid"`，值去掉 `urn:uuid:` 前缀
fn uuid_rule(entry: &ParsedNode, config: &ParserConfig) -> Option<(&'static str, String)> {
    let id = entry.attribute("id")?;
    let matching = config.identifier_matching;
    if !matching.matches(id, "uuid") {
        return None;
    }
    let value = get_first_string_value_from_node(entry);
    let uuid = matching
        .strip_prefix(&value, &config.uuid_urn_prefix)
        .unwrap_or(&value)
        .to_string();
    Some((UUID, uuid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epub::opf::config::IdentifierMatching;
    use crate::epub::opf::xml::parse_root;

    fn identifiers_of(xml: &str, config: &ParserConfig) -> Metadata {
        let (name, node) = parse_root(xml).unwrap();
        let node = if name == "metadata" {
            node.as_element().unwrap().child("dc:identifier").unwrap().clone()
        } else {
            node
        };
        let mut metadata = Metadata::new();
        parse_and_set_identifier_node_data_with(&node, &mut metadata, config);
        metadata
    }

    fn identifiers(xml: &str) -> Metadata {
        identifiers_of(xml, &ParserConfig::default_config())
    }

    #[test]
    fn test_isbn() {
        let metadata = identifiers(r#"<dc:identifier opf:scheme="ISBN">978-3-16-148410-0</dc:identifier>"#);
        assert_eq!(metadata.isbn(), Some("978-3-16-148410-0"));
        assert_eq!(metadata.len(), 1);
    }

    #[test]
    fn test_uuid_prefix_is_stripped() {
        let metadata = identifiers(r#"<dc:identifier id="uuid">urn:uuid:978-3-16-148410-0</dc:identifier>"#);
        assert_eq!(metadata.uuid(), Some("978-3-16-148410-0"));
        assert_eq!(metadata.len(), 1);

        let metadata = identifiers(r#"<dc:identifier id="uuid">2d1c7f3e-0000-4000-8000-000000000000</dc:identifier>"#);
        assert_eq!(metadata.uuid(), Some("2d1c7f3e-0000-4000-8000-000000000000"));
    }

    #[test]
    fn test_isbn_and_uuid_siblings() {
        let metadata = identifiers(concat!(
            r#"<metadata>"#,
            r#"<dc:identifier opf:scheme="ISBN">978-3-16-148410-1</dc:identifier>"#,
            r#"<dc:identifier id="uuid">urn:uuid:978-3-16-148410-0</dc:identifier>"#,
            r#"</metadata>"#
        ));
        assert_eq!(metadata.isbn(), Some("978-3-16-148410-1"));
        assert_eq!(metadata.uuid(), Some("978-3-16-148410-0"));
    }

    #[test]
    fn test_last_isbn_wins() {
        let metadata = identifiers(concat!(
            r#"<metadata>"#,
            r#"<dc:identifier opf:scheme="ISBN">first</dc:identifier>"#,
            r#"<dc:identifier opf:scheme="ISBN">second</dc:identifier>"#,
            r#"</metadata>"#
        ));
        assert_eq!(metadata.isbn(), Some("second"));
    }

    #[test]
    fn test_unclassified_identifiers_are_ignored() {
        let metadata = identifiers(concat!(
            r#"<metadata>"#,
            r#"<dc:identifier id="BookId" opf:scheme="DOI">10.1000/182</dc:identifier>"#,
            r#"<dc:identifier>plain</dc:identifier>"#,
            r#"</metadata>"#
        ));
        assert!(metadata.is_empty());
    }

    #[test]
    fn test_scheme_takes_priority_over_id() {
        let metadata = identifiers(r#"<dc:identifier id="uuid" opf:scheme="ISBN">978-0</dc:identifier>"#);
        assert_eq!(metadata.isbn(), Some("978-0"));
        assert_eq!(metadata.uuid(), None);
    }

    // 默认忽略大小写是一个假定，Exact模式只接受 "ISBN" 与 "uuid"
    #[test]
    fn test_case_insensitive_matching_is_assumed_default() {
        let metadata = identifiers(concat!(
            r#"<metadata>"#,
            r#"<dc:identifier scheme="isbn">978-1</dc:identifier>"#,
            r#"<dc:identifier id="UUID">URN:UUID:abc</dc:identifier>"#,
            r#"</metadata>"#
        ));
        assert_eq!(metadata.isbn(), Some("978-1"));
        assert_eq!(metadata.uuid(), Some("abc"));
    }

    #[test]
    fn test_exact_matching() {
        let config = ParserConfig {
            identifier_matching: IdentifierMatching::Exact,
            ..ParserConfig::default_config()
        };
        let xml = concat!(
            r#"<metadata>"#,
            r#"<dc:identifier scheme="isbn">978-1</dc:identifier>"#,
            r#"<dc:identifier id="UUID">urn:uuid:abc</dc:identifier>"#,
            r#"</metadata>"#
        );
        assert!(identifiers_of(xml, &config).is_empty());

        let metadata = identifiers_of(
            r#"<dc:identifier id="uuid">urn:uuid:abc</dc:identifier>"#,
            &config,
        );
        assert_eq!(metadata.uuid(), Some("abc"));
    }
}
