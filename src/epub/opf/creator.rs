//! 创建者标签解释

use crate::epub::opf::metadata::{CREATOR, CREATOR_FILE_AS, Metadata};
use crate::epub::opf::node::ParsedNode;
use crate::epub::opf::value::get_first_string_value_from_node;

/// 解析创建者节点，写入 `creator` 与 `creatorFileAs`
///
/// 存在多个创建者时只使用第一个，后续创建者不参与这两个字段。
/// `file-as` 属性（可带 `opf:` 等前缀）缺失时，排序名回退为创建者名。
pub fn parse_and_set_creator_node_data(creator_node: &ParsedNode, out: &mut Metadata) {
    let Some(first) = creator_node.first() else {
        return;
    };

    let creator = get_first_string_value_from_node(first);
    let file_as = first
        .attribute("file-as")
        .map(str::to_string)
        .unwrap_or_else(|| creator.clone());

    out.set(CREATOR, Some(creator));
    out.set(CREATOR_FILE_AS, Some(file_as));
}
