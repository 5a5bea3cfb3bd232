//! 外部调用接口
//!
//! Thin entry points for hosts that hand over optional buffers or raw bytes.
//! These are the only places a parse can be refused.

use serde::Serialize;
use tracing::warn;

use crate::error::{ParseError, ParseResult};
use crate::models::{Conf, Document};
use crate::parser::{generate_html, generate_title_html, FountainParser};

/// HTML 预览结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlExport {
    pub title_html: String,
    pub script_html: String,
}

/// 解析Fountain文本
pub fn parse_fountain_text(text: Option<&str>, config: Option<Conf>) -> ParseResult<Document> {
    let text = text.ok_or_else(|| {
        warn!("parse requested without an input buffer");
        ParseError::InvalidInput("no input text".to_string())
    })?;
    let parser = FountainParser::new(config.unwrap_or_default());
    Ok(parser.parse(text))
}

/// Parses raw bytes, refusing anything that is not UTF-8.
pub fn parse_fountain_bytes(bytes: &[u8], config: Option<Conf>) -> ParseResult<Document> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        warn!(error = %e, "input is not valid UTF-8");
        ParseError::InvalidInput(format!("input is not valid UTF-8: {}", e))
    })?;
    parse_fountain_text(Some(text), config)
}

/// 解析并返回JSON
pub fn parse_fountain_json(text: Option<&str>, config: Option<Conf>) -> ParseResult<String> {
    let document = parse_fountain_text(text, config)?;
    Ok(serde_json::to_string(&document)?)
}

/// 导出HTML预览
pub fn export_html(text: Option<&str>, config: Option<Conf>) -> ParseResult<HtmlExport> {
    let config = config.unwrap_or_default();
    let document = parse_fountain_text(text, Some(config.clone()))?;
    Ok(HtmlExport {
        title_html: generate_title_html(&document),
        script_html: generate_html(&document, &config),
    })
}
