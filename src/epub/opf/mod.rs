//! OPF（Open Packaging Format）元数据解析模块
//! 
//! 此模块从EPUB包文件的metadata元素中提取键值元数据：标题、创建者、标识符、封面等。

mod config;
mod creator;
mod identifier;
mod meta;
mod metadata;
mod node;
mod parser;
mod tag;
mod value;
mod xml;

// 重新导出公共类型
pub use config::{DEFAULT_CONFIG_PATH, IdentifierMatching, MissingMetadataPolicy, ParserConfig};
pub use creator::parse_and_set_creator_node_data;
pub use identifier::{parse_and_set_identifier_node_data, parse_and_set_identifier_node_data_with};
pub use meta::{parse_meta_node, parse_meta_node_with};
pub use metadata::{COVER, CREATOR, CREATOR_FILE_AS, ISBN, Metadata, UUID};
pub use node::{Element, ParsedNode};
pub use parser::{ContentFileParser, parse_content_file_to_epub};
pub use tag::{get_clean_tag_name, get_tag_names};
pub use value::get_first_string_value_from_node;
pub use xml::parse_root;
