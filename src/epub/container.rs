use crate::epub::error::{EpubError, Result};
use crate::epub::opf::{ParsedNode, parse_root};

/// OPF包文件的媒体类型
pub const OPF_MEDIA_TYPE: &str = "application/oebps-package+xml";

/// Container.xml中的rootfile信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootFile {
    pub full_path: String,
    pub media_type: String,
}

/// Container.xml的解析结果
#[derive(Debug, Clone)]
pub struct Container {
    pub rootfiles: Vec<RootFile>,
}

impl Container {
    /// 解析container.xml内容
    ///
    /// # 参数
    /// * `xml_content` - container.xml的文件内容
    ///
    /// # 返回值
    /// * `Result<Container, EpubError>` - 解析后的Container信息
    pub fn parse_xml(xml_content: &str) -> Result<Container> {
        let (_, root) = parse_root(xml_content)?;

        // rootfiles/rootfile 可能是单个元素，也可能是序列
        let rootfiles: Vec<RootFile> = root
            .as_element()
            .and_then(|container| container.child_by_local_name("rootfiles"))
            .and_then(ParsedNode::first)
            .and_then(ParsedNode::as_element)
            .and_then(|rootfiles| rootfiles.child_by_local_name("rootfile"))
            .map(ParsedNode::entries)
            .unwrap_or_default()
            .iter()
            .filter_map(|entry| {
                let full_path = entry.attribute("full-path").filter(|p| !p.is_empty())?;
                let media_type = entry.attribute("media-type").filter(|t| !t.is_empty())?;
                Some(RootFile {
                    full_path: full_path.to_string(),
                    media_type: media_type.to_string(),
                })
            })
            .collect();

        if rootfiles.is_empty() {
            return Err(EpubError::ContainerParseError(
                "没有找到任何rootfile条目".to_string()
            ));
        }

        Ok(Container { rootfiles })
    }

    /// 获取主要的OPF文件路径
    ///
    /// # 返回值
    /// * `Option<String>` - OPF文件的完整路径
    pub fn get_opf_path(&self) -> Option<String> {
        // 查找第一个application/oebps-package+xml类型的rootfile，
        // 没有时退回第一个rootfile
        self.rootfiles
            .iter()
            .find(|rootfile| rootfile.media_type == OPF_MEDIA_TYPE)
            .or_else(|| self.rootfiles.first())
            .map(|rootfile| rootfile.full_path.clone())
    }
}
