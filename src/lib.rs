pub mod epub;

// === 核心API重新导出 ===

/// EPUB文件读取器
pub use epub::Epub;

/// 错误处理
pub use epub::{EpubError, Result};

// === 数据结构 ===

/// 书籍文档与元数据接收方
pub use epub::{Book, MetadataSink};

/// 元数据记录
pub use epub::Metadata;

// === 底层组件（高级用法） ===

/// 容器组件
pub use epub::{Container, RootFile};

/// OPF元数据解析组件
pub use epub::{
    ContentFileParser,
    Element,
    IdentifierMatching,
    MissingMetadataPolicy,
    ParsedNode,
    ParserConfig,
    parse_content_file_to_epub,
};

// === 库信息 ===

/// 库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库的描述
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

// === 便捷函数 ===

/// 快速读取EPUB文件的书籍元数据
///
/// 这是 `Epub::from_path` 与 `Epub::read_book` 的便捷包装函数。
///
/// # 示例
///
/// ```no_run
/// let book = opfmeta::open("book.epub")?;
/// println!("书名: {}", book.title());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Book> {
    Epub::from_path(path)?.read_book()
}
