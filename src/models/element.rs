use serde::Serialize;

use crate::utils::{escape_html, escape_html_keep_emphasis};

/// 剧本元素：解析器输出的语义单元
///
/// Text payloads have already been run through the inline resolver, so
/// emphasis appears as `<b>`, `<i>` and `<u>` tags and notes/boneyard are gone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    SceneHeading {
        text: String,
        /// Running 1-based count, or the explicit `#n#` value when numeric.
        number: u32,
        /// Raw content of an explicit `#...#` marker.
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Transition {
        text: String,
    },
    Action {
        text: String,
    },
    Character {
        name: String,
        dual: bool,
    },
    Parenthetical {
        text: String,
    },
    Dialogue {
        text: String,
        dual: bool,
    },
    Centered {
        text: String,
    },
    PageBreak,
    Section {
        level: u8,
        text: String,
    },
    Synopsis {
        text: String,
    },
}

impl Element {
    // 元素类型名，与序列化时的 type 字段一致
    pub fn type_name(&self) -> &'static str {
        match self {
            Element::SceneHeading { .. } => "scene_heading",
            Element::Transition { .. } => "transition",
            Element::Action { .. } => "action",
            Element::Character { .. } => "character",
            Element::Parenthetical { .. } => "parenthetical",
            Element::Dialogue { .. } => "dialogue",
            Element::Centered { .. } => "centered",
            Element::PageBreak => "page_break",
            Element::Section { .. } => "section",
            Element::Synopsis { .. } => "synopsis",
        }
    }

    /// The visible text of the element, `None` for page breaks.
    pub fn text(&self) -> Option<&str> {
        match self {
            Element::SceneHeading { text, .. }
            | Element::Transition { text }
            | Element::Action { text }
            | Element::Parenthetical { text }
            | Element::Dialogue { text, .. }
            | Element::Centered { text }
            | Element::Section { text, .. }
            | Element::Synopsis { text } => Some(text),
            Element::Character { name, .. } => Some(name),
            Element::PageBreak => None,
        }
    }

    pub fn is_type(&self, types: &[&str]) -> bool {
        types.contains(&self.type_name())
    }

    /// Whether this element belongs to an open dialogue block.
    pub fn is_dialogue_part(&self) -> bool {
        matches!(
            self,
            Element::Character { .. } | Element::Parenthetical { .. } | Element::Dialogue { .. }
        )
    }

    // 转换为HTML格式(用于预览)
    pub fn to_html(&self) -> String {
        match self {
            Element::SceneHeading { text, number, .. } => format!(
                "<div class=\"scene-heading\" data-number=\"{}\">{}</div>",
                number,
                escape_html_keep_emphasis(text)
            ),
            Element::Character { name, dual } => {
                let class = if *dual { "dual-dialogue-character" } else { "character" };
                format!("<div class=\"{}\">{}</div>", class, escape_html(name))
            }
            Element::Dialogue { text, dual: true } => div("dual-dialogue", text),
            Element::Dialogue { text, .. } => div("dialogue", text),
            Element::Transition { text } => div("transition", text),
            Element::Action { text } => div("action", text),
            Element::Parenthetical { text } => div("parenthetical", text),
            Element::Centered { text } => div("centered", text),
            Element::PageBreak => "<hr>".to_string(),
            Element::Section { level, text } => format!(
                "<div class=\"section\" data-level=\"{}\">{}</div>",
                level,
                escape_html_keep_emphasis(text)
            ),
            Element::Synopsis { text } => div("synopsis", text),
        }
    }
}

fn div(class: &str, text: &str) -> String {
    format!("<div class=\"{}\">{}</div>", class, escape_html_keep_emphasis(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let element = Element::Character {
            name: "JANE".to_string(),
            dual: false,
        };
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "character");
        assert_eq!(json["name"], "JANE");

        let json = serde_json::to_value(Element::PageBreak).unwrap();
        assert_eq!(json["type"], "page_break");
    }

    #[test]
    fn dual_cues_use_dual_classes() {
        let cue = Element::Character {
            name: "BRICK".to_string(),
            dual: true,
        };
        assert_eq!(cue.to_html(), "<div class=\"dual-dialogue-character\">BRICK</div>");
        assert!(cue.is_dialogue_part());
        assert!(cue.is_type(&["character", "dialogue"]));
    }

    #[test]
    fn html_escapes_text_but_keeps_emphasis() {
        let action = Element::Action {
            text: "A < B & <i>C</i>".to_string(),
        };
        assert_eq!(
            action.to_html(),
            "<div class=\"action\">A &lt; B &amp; <i>C</i></div>"
        );
    }
}
