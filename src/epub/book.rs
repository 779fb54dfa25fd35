//! 书籍文档模块
//!
//! 元数据解析结果的接收方。

use crate::epub::opf::Metadata;

/// 接收解析完成的元数据记录
pub trait MetadataSink {
    /// 一次解析只调用一次
    fn set_metadata(&mut self, metadata: Metadata);
}

/// 书籍文档
#[derive(Debug, Clone, Default)]
pub struct Book {
    /// OPF文件在EPUB包中的路径
    pub opf_path: Option<String>,
    /// 元数据记录
    pub metadata: Metadata,
}

impl Book {
    /// 创建空书籍
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建关联OPF路径的书籍
    pub fn with_opf_path(opf_path: impl Into<String>) -> Self {
        Self {
            opf_path: Some(opf_path.into()),
            metadata: Metadata::new(),
        }
    }

    /// 书名，缺失时返回"未知标题"
    pub fn title(&self) -> &str {
        self.metadata.title().unwrap_or("未知标题")
    }

    /// 作者
    pub fn author(&self) -> Option<&str> {
        self.metadata.creator()
    }

    /// 作者排序名
    pub fn author_sort(&self) -> Option<&str> {
        self.metadata.creator_file_as()
    }

    /// 封面对应的清单项ID
    pub fn cover_id(&self) -> Option<&str> {
        self.metadata.cover()
    }
}

impl MetadataSink for Book {
    fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = metadata;
    }
}
