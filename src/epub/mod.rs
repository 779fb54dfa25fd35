pub mod book;
pub mod container;
pub mod error;
pub mod opf;
pub mod reader;

// 重新导出错误处理
pub use error::{EpubError, Result};

// 重新导出容器相关
pub use container::{Container, RootFile};

// 重新导出EPUB读取器和书籍文档
pub use book::{Book, MetadataSink};
pub use reader::Epub;

// 重新导出OPF相关
pub use opf::{
    ContentFileParser,
    Element,
    IdentifierMatching,
    Metadata,
    MissingMetadataPolicy,
    ParsedNode,
    ParserConfig,
    parse_content_file_to_epub,
};
