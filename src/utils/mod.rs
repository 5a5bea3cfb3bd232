pub mod fountain_constants;

pub use fountain_constants::FountainConstants;
use fountain_constants::{CHARACTER_EXTENSION, EMPHASIS_TAG};

/// 检查一行文本是否为空行（只含空白字符）
pub fn is_blank_line(text: &str) -> bool {
    text.trim().is_empty()
}

/// 转义 HTML 特殊字符
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes resolved element text, leaving the `<b>`/`<i>`/`<u>` emphasis tags intact.
pub fn escape_html_keep_emphasis(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for tag in EMPHASIS_TAG.find_iter(text) {
        out.push_str(&escape_html(&text[last..tag.start()]));
        out.push_str(tag.as_str());
        last = tag.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

/// 去除角色名后的扩展部分，如 `(V.O.)`
pub fn trim_character_extension(name: &str) -> &str {
    match CHARACTER_EXTENSION.find(name) {
        Some(m) if m.start() > 0 => name[..m.start()].trim_end(),
        _ => name.trim(),
    }
}
