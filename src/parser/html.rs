use crate::models::{Conf, Document, TitleKey};
use crate::parser::text_processor::resolve_emphasis;
use crate::utils::escape_html;

// 生成正文HTML输出
pub fn generate_html(document: &Document, config: &Conf) -> String {
    let mut buffer = String::new();
    for (index, element) in document.elements().iter().enumerate() {
        buffer.push_str(&element.to_html());
        buffer.push('\n');
        if config.print_notes {
            for note in document.notes_for(index) {
                buffer.push_str("<!-- ");
                buffer.push_str(&comment_safe(&note.note));
                buffer.push_str(" -->\n");
            }
        }
    }
    buffer
}

// 生成标题页HTML输出，按固定顺序
pub fn generate_title_html(document: &Document) -> String {
    let mut buffer = String::new();
    for (key, value) in document.title_fields().iter() {
        let value = resolve_emphasis(&escape_html(value));
        let line = match key {
            TitleKey::Title => format!("<h1 class=\"title\">{}</h1>", value),
            other => format!(
                "<p class=\"{}\">{}</p>",
                other.as_str().replace(' ', "-"),
                value
            ),
        };
        buffer.push_str(&line);
        buffer.push('\n');
    }
    buffer
}

// 注释内不能出现 `-`，否则 `-->` 会提前结束注释
fn comment_safe(note: &str) -> String {
    note.replace('-', "&#45;")
}
