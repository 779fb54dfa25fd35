//! 解析器配置模块
//!
//! 提供元数据解析策略的配置管理功能，支持从YAML文件加载配置。

use crate::epub::error::{EpubError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "opfmeta.yaml";

/// 标识符属性值（`scheme`、`id`）的比较方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierMatching {
    /// 忽略大小写，`isbn` 与 `ISBN` 等价
    #[default]
    CaseInsensitive,
    /// 精确匹配
    Exact,
}

impl IdentifierMatching {
    /// 按当前方式比较属性值
    pub fn matches(self, value: &str, expected: &str) -> bool {
        match self {
            IdentifierMatching::CaseInsensitive => value.eq_ignore_ascii_case(expected),
            IdentifierMatching::Exact => value == expected,
        }
    }

    /// 按当前方式去掉前缀，不匹配时返回 `None`
    pub fn strip_prefix<'a>(self, value: &'a str, prefix: &str) -> Option<&'a str> {
        match self {
            IdentifierMatching::Exact => value.strip_prefix(prefix),
            IdentifierMatching::CaseInsensitive => {
                let head = value.get(..prefix.len())?;
                head.eq_ignore_ascii_case(prefix).then(|| &value[prefix.len()..])
            }
        }
    }
}

/// 文档中缺少 `<metadata>` 元素时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingMetadataPolicy {
    /// 视为空元数据，解析成功
    #[default]
    Empty,
    /// 视为文档格式错误
    Error,
}

/// 元数据解析配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// 标识符属性值的比较方式
    pub identifier_matching: IdentifierMatching,
    /// 缺少metadata元素时的处理方式
    pub missing_metadata: MissingMetadataPolicy,
    /// 是否接受meta元素自身携带property属性和文本的写法，
    /// 如 `<meta property="dcterms:modified">2024-01-01</meta>`
    pub inline_property_meta: bool,
    /// UUID标识符要去掉的URN前缀
    pub uuid_urn_prefix: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl ParserConfig {
    /// 获取默认配置
    pub fn default_config() -> Self {
        Self {
            identifier_matching: IdentifierMatching::CaseInsensitive,
            missing_metadata: MissingMetadataPolicy::Empty,
            inline_property_meta: false,
            uuid_urn_prefix: "urn:uuid:".to_string(),
        }
    }

    /// 从指定的配置文件中加载解析配置
    ///
    /// 文件中缺省的字段使用默认值。
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use opfmeta::ParserConfig;
    /// let config = ParserConfig::from_file("opfmeta.yaml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| EpubError::ConfigError(format!("无法读取配置文件: {}", e)))?;
        Self::from_yaml(&content)
    }

    /// 从YAML文本解析配置
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yml::from_str(content)
            .map_err(|e| EpubError::ConfigError(format!("配置文件格式错误: {}", e)))
    }

    /// 序列化为带注释头的YAML文本
    pub fn to_yaml(&self) -> Result<String> {
        let yaml_content = serde_yml::to_string(self)
            .map_err(|e| EpubError::ConfigError(format!("序列化配置失败: {}", e)))?;

        Ok(format!(
            "# opfmeta 解析配置文件\n# identifier_matching: case-insensitive | exact\n# missing_metadata: empty | error\n\n{}",
            yaml_content
        ))
    }

    /// 生成默认配置文件到指定路径
    ///
    /// 目标文件已存在时返回 `ConfigError`，不会覆盖已有内容。
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let content = Self::default_config().to_yaml()?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => {
                    EpubError::ConfigError(format!("配置文件已存在: {}", path.display()))
                }
                _ => EpubError::ConfigError(format!("写入配置文件失败: {}", e)),
            })?;
        file.write_all(content.as_bytes())
            .map_err(|e| EpubError::ConfigError(format!("写入配置文件失败: {}", e)))
    }
}
