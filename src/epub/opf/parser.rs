//! OPF元数据解析器模块
//!
//! 遍历metadata元素的子标签，按去掉前缀后的标签名分派给对应的解释器，
//! 其余标签走通用路径：取第一个字符串值。

use crate::epub::book::MetadataSink;
use crate::epub::error::{EpubError, Result};
use crate::epub::opf::config::{MissingMetadataPolicy, ParserConfig};
use crate::epub::opf::creator::parse_and_set_creator_node_data;
use crate::epub::opf::identifier::parse_and_set_identifier_node_data_with;
use crate::epub::opf::meta::parse_meta_node_with;
use crate::epub::opf::metadata::Metadata;
use crate::epub::opf::node::{Element, ParsedNode};
use crate::epub::opf::tag::{get_clean_tag_name, get_tag_names};
use crate::epub::opf::value::get_first_string_value_from_node;
use crate::epub::opf::xml::parse_root;
use tracing::{debug, instrument, warn};

/// 使用默认配置解析OPF内容，并把元数据交给目标文档
///
/// # 参数
/// * `xml_content` - OPF文件的XML内容
/// * `target` - 接收元数据的文档，为 `None` 时只做解析
///
/// # 返回值
/// * `Result<()>` - XML不是良构文档时返回 `MalformedDocument`
pub fn parse_content_file_to_epub(
    xml_content: &str,
    target: Option<&mut dyn MetadataSink>,
) -> Result<()> {
    ContentFileParser::new().parse_into(xml_content, target)
}

/// OPF元数据解析器
#[derive(Debug, Clone, Default)]
pub struct ContentFileParser {
    config: ParserConfig,
}

impl ContentFileParser {
    /// 使用默认配置创建解析器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定配置创建解析器
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// 解析OPF内容并把元数据交给目标文档
    pub fn parse_into(&self, xml_content: &str, target: Option<&mut dyn MetadataSink>) -> Result<()> {
        let metadata = self.parse(xml_content)?;
        match target {
            Some(sink) => sink.set_metadata(metadata),
            None => debug!("没有目标文档，丢弃解析结果"),
        }
        Ok(())
    }

    /// 解析OPF内容，返回元数据记录
    #[instrument(skip_all, fields(len = xml_content.len()))]
    pub fn parse(&self, xml_content: &str) -> Result<Metadata> {
        let (root_name, root) = parse_root(xml_content)?;
        let mut metadata = Metadata::new();

        match find_metadata_node(&root_name, &root) {
            // 空的metadata元素折叠为标量，没有可解析的子标签
            Some(ParsedNode::Element(metadata_node)) => self.parse_metadata_node(metadata_node, &mut metadata),
            Some(_) => debug!("metadata元素为空"),
            None => match self.config.missing_metadata {
                MissingMetadataPolicy::Empty => {
                    warn!(root = %root_name, "文档中没有metadata元素，返回空元数据");
                }
                MissingMetadataPolicy::Error => {
                    return Err(EpubError::MalformedDocument(format!(
                        "<{}> 中没有metadata元素",
                        root_name
                    )));
                }
            },
        }

        debug!(fields = metadata.len(), "元数据解析完成");
        Ok(metadata)
    }

    /// 按标签名分派metadata元素的每个子节点
    pub fn parse_metadata_node(&self, metadata_node: &Element, out: &mut Metadata) {
        let mut meta_done = false;

        for tag in get_tag_names(metadata_node) {
            let Some(child) = metadata_node.child(tag) else {
                continue;
            };

            match get_clean_tag_name(tag) {
                "meta" => {
                    if !meta_done {
                        parse_meta_node_with(metadata_node, out, self.config.inline_property_meta);
                        meta_done = true;
                    }
                }
                "creator" => parse_and_set_creator_node_data(child, out),
                "identifier" => parse_and_set_identifier_node_data_with(child, out, &self.config),
                clean => out.set(clean, Some(get_first_string_value_from_node(child))),
            }
        }
    }
}

/// 查找metadata节点：根元素本身，或根元素的直接子元素（按去掉前缀后的名称比较）
///
/// 多个metadata元素时取第一个。
fn find_metadata_node<'a>(root_name: &str, root: &'a ParsedNode) -> Option<&'a ParsedNode> {
    if get_clean_tag_name(root_name) == "metadata" {
        return Some(root);
    }
    root.as_element()?.child_by_local_name("metadata")?.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epub::book::Book;

    const DUMMY_CONTENT_OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="uuid">
    <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
        <dc:title>Alice's Adventures in Wonderland</dc:title>
        <dc:creator opf:role="aut" opf:file-as="Carroll, Lewis">Lewis Carroll</dc:creator>
        <dc:creator opf:role="ill">John Tenniel</dc:creator>
        <dc:language>en</dc:language>
        <dc:publisher>Macmillan</dc:publisher>
        <dc:publisher>Second Publisher</dc:publisher>
        <dc:identifier opf:scheme="ISBN">978-3-16-148410-0</dc:identifier>
        <dc:identifier id="uuid">urn:uuid:2d1c7f3e-5b7a-4e0a-9c3e-1f2a3b4c5d6e</dc:identifier>
        <dc:subject/>
        <meta name="cover" content="id-4342825810081545813"/>
        <meta name="calibre:timestamp" content="2024-01-01T00:00:00+00:00"/>
    </metadata>
    <manifest>
        <item id="id-4342825810081545813" href="cover.jpg" media-type="image/jpeg"/>
    </manifest>
    <spine/>
</package>"#;

    #[test]
    fn test_parse_content_file_without_target() {
        parse_content_file_to_epub(DUMMY_CONTENT_OPF, None).unwrap();
    }

    #[test]
    fn test_parse_content_file_into_book() {
        let mut book = Book::new();
        parse_content_file_to_epub(DUMMY_CONTENT_OPF, Some(&mut book)).unwrap();

        let metadata = &book.metadata;
        assert_eq!(metadata.title(), Some("Alice's Adventures in Wonderland"));
        assert_eq!(metadata.creator(), Some("Lewis Carroll"));
        assert_eq!(metadata.creator_file_as(), Some("Carroll, Lewis"));
        assert_eq!(metadata.language(), Some("en"));
        assert_eq!(metadata.publisher(), Some("Macmillan"));
        assert_eq!(metadata.isbn(), Some("978-3-16-148410-0"));
        assert_eq!(metadata.uuid(), Some("2d1c7f3e-5b7a-4e0a-9c3e-1f2a3b4c5d6e"));
        assert_eq!(metadata.get("subject"), Some(&Some(String::new())));
        assert_eq!(metadata.cover(), Some("id-4342825810081545813"));
        assert_eq!(metadata.value("calibre:timestamp"), Some("2024-01-01T00:00:00+00:00"));
    }

    #[test]
    fn test_field_order_follows_document() {
        let metadata = ContentFileParser::new().parse(DUMMY_CONTENT_OPF).unwrap();
        let keys: Vec<_> = metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "title",
                "creator",
                "creatorFileAs",
                "language",
                "publisher",
                "ISBN",
                "UUID",
                "subject",
                "cover",
                "calibre:timestamp",
            ]
        );
    }

    #[test]
    fn test_metadata_as_root() {
        let metadata = ContentFileParser::new()
            .parse("<metadata><publisher>test</publisher><dc:creator>test</dc:creator></metadata>")
            .unwrap();
        assert_eq!(metadata.publisher(), Some("test"));
        assert_eq!(metadata.creator(), Some("test"));
        assert_eq!(metadata.creator_file_as(), Some("test"));
    }

    #[test]
    fn test_prefixed_metadata_element() {
        let xml = r#"<opf:package xmlns:opf="http://www.idpf.org/2007/opf"><opf:metadata><dc:title>T</dc:title><opf:meta name="cover" content="c"/></opf:metadata></opf:package>"#;
        let metadata = ContentFileParser::new().parse(xml).unwrap();
        assert_eq!(metadata.title(), Some("T"));
        assert_eq!(metadata.cover(), Some("c"));
    }

    #[test]
    fn test_mixed_meta_prefixes() {
        let xml = concat!(
            r#"<package><metadata>"#,
            r#"<meta name="cover" content="c1"/>"#,
            r#"<dc:title>T</dc:title>"#,
            r#"<opf:meta name="calibre:series" content="S"/>"#,
            r#"</metadata></package>"#
        );
        let metadata = ContentFileParser::new().parse(xml).unwrap();
        assert_eq!(metadata.cover(), Some("c1"));
        assert_eq!(metadata.value("calibre:series"), Some("S"));
        assert_eq!(metadata.title(), Some("T"));
        assert!(!metadata.contains_key("meta"));
    }

    #[test]
    fn test_text_values_are_whitespace_normalized() {
        let xml = concat!(
            "<package><metadata>\n",
            "  <dc:title>Alice's\n      Adventures</dc:title>\n",
            "  <dc:description>Tom <i>and</i> Jerry</dc:description>\n",
            "</metadata></package>"
        );
        let metadata = ContentFileParser::new().parse(xml).unwrap();
        assert_eq!(metadata.title(), Some("Alice's Adventures"));
        assert_eq!(metadata.value("description"), Some("Tom Jerry"));
    }

    #[test]
    fn test_malformed_document() {
        let result = parse_content_file_to_epub("<package><metadata></package>", None);
        assert!(matches!(result, Err(EpubError::MalformedDocument(_))));
    }

    #[test]
    fn test_missing_metadata_policies() {
        let xml = r#"<package version="3.0"><manifest/></package>"#;

        let mut book = Book::new();
        ContentFileParser::new().parse_into(xml, Some(&mut book)).unwrap();
        assert!(book.metadata.is_empty());

        let strict = ContentFileParser::with_config(ParserConfig {
            missing_metadata: MissingMetadataPolicy::Error,
            ..ParserConfig::default_config()
        });
        assert!(matches!(strict.parse(xml), Err(EpubError::MalformedDocument(_))));

        // 空的metadata元素不属于缺失
        assert!(strict.parse("<package><metadata/></package>").unwrap().is_empty());
    }

    #[test]
    fn test_inline_property_meta_from_config() {
        let xml = r#"<package><metadata><dc:title>T</dc:title><meta property="dcterms:modified">2024-05-01T00:00:00Z</meta></metadata></package>"#;
        assert_eq!(ContentFileParser::new().parse(xml).unwrap().len(), 1);

        let parser = ContentFileParser::with_config(ParserConfig {
            inline_property_meta: true,
            ..ParserConfig::default_config()
        });
        let metadata = parser.parse(xml).unwrap();
        assert_eq!(metadata.value("dcterms:modified"), Some("2024-05-01T00:00:00Z"));
    }
}
