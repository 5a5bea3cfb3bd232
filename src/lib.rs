pub mod api;
pub mod error;
pub mod models;
pub mod parser;
pub mod utils;

pub use error::{ConfigError, ParseError, ParseResult};

pub use models::{
    Conf, Document, Element, Location, Note, Scene, ScreenplayProperties, StructKind, StructToken,
    Synopsis, TitleFields, TitleKey,
};

pub use parser::{
    extract_title_block, generate_html, generate_title_html, resolve_emphasis, resolve_inline,
    FountainParser, TitleBlock,
};

pub use api::{
    export_html, parse_fountain_bytes, parse_fountain_json, parse_fountain_text, HtmlExport,
};

/// 解析Fountain格式文本
///
/// # Arguments
///
/// * `script` - Fountain格式的剧本文本
/// * `config` - 配置对象
///
/// # Returns
///
/// 解析出的文档，标题页字段加正文元素
pub fn parse(script: &str, config: &Conf) -> Document {
    FountainParser::new(config.clone()).parse(script)
}
