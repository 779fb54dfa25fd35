use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::{debug, info, instrument};
use zip::ZipArchive;

use crate::epub::book::Book;
use crate::epub::container::Container;
use crate::epub::error::{EpubError, Result};
use crate::epub::opf::ContentFileParser;

/// EPUB的mimetype
const EPUB_MIMETYPE: &str = "application/epub+zip";
/// container.xml在包中的路径
const CONTAINER_PATH: &str = "META-INF/container.xml";

/// 表示一个EPUB文件
pub struct Epub<R: Read + Seek = File> {
    archive: ZipArchive<R>,
}

impl Epub<File> {
    /// 从文件路径创建Epub实例
    ///
    /// # 参数
    /// * `path` - epub文件的路径
    ///
    /// # 返回值
    /// * `Result<Epub, EpubError>` - 成功返回Epub实例，失败返回错误
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> Epub<R> {
    /// 从任意可寻址的读取器创建Epub实例
    pub fn from_reader(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;

        let mut epub = Epub { archive };
        epub.validate()?;

        Ok(epub)
    }

    /// 验证EPUB文件的合法性
    ///
    /// 检查是否存在mimetype文件，且内容为"application/epub+zip"
    fn validate(&mut self) -> Result<()> {
        let mut file = self
            .archive
            .by_name("mimetype")
            .map_err(|_| EpubError::MissingMimetype)?;

        let mut content = String::new();
        file.read_to_string(&mut content)?;

        // 去除可能的换行符和空白字符
        let content = content.trim();
        if content != EPUB_MIMETYPE {
            return Err(EpubError::InvalidMimetype {
                expected: EPUB_MIMETYPE.to_string(),
                found: content.to_string(),
            });
        }

        debug!("EPUB验证成功: mimetype文件正确");
        Ok(())
    }

    /// 提取指定文件的内容
    ///
    /// # 参数
    /// * `filename` - 要提取的文件名
    ///
    /// # 返回值
    /// * `Result<String, EpubError>` - 文件内容
    pub fn extract_file(&mut self, filename: &str) -> Result<String> {
        let mut file = self.archive.by_name(filename)?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        Ok(content)
    }

    /// 解析container.xml文件
    pub fn parse_container(&mut self) -> Result<Container> {
        let container_content = self.extract_file(CONTAINER_PATH)?;
        Container::parse_xml(&container_content)
    }

    /// 获取主要的OPF文件路径
    pub fn get_opf_path(&mut self) -> Result<String> {
        let container = self.parse_container()?;

        container.get_opf_path().ok_or_else(|| {
            EpubError::ContainerParseError(
                "container.xml中没有找到有效的rootfile".to_string()
            )
        })
    }

    /// 使用默认配置读取书籍元数据
    pub fn read_book(&mut self) -> Result<Book> {
        self.read_book_with(&ContentFileParser::new())
    }

    /// 使用指定的解析器读取书籍元数据
    ///
    /// # 参数
    /// * `parser` - 元数据解析器
    ///
    /// # 返回值
    /// * `Result<Book, EpubError>` - 带有元数据的书籍
    pub fn read_book_with(&mut self, parser: &ContentFileParser) -> Result<Book> {
        let opf_path = self.get_opf_path()?;
        let opf_content = self.extract_file(&opf_path)?;

        let mut book = Book::with_opf_path(&opf_path);
        parser.parse_into(&opf_content, Some(&mut book))?;

        info!(opf = %opf_path, fields = book.metadata.len(), "读取书籍元数据");
        Ok(book)
    }
}
