//! 行分类规则
//!
//! Classification is an ordered list of predicates. Each rule either claims
//! the line and returns what it extracted, or passes; the first rule to claim
//! a line wins. The last rule (action) claims everything, so classification
//! is total.

use crate::utils::fountain_constants::{
    CENTERED, CHARACTER, PAGE_BREAK, SCENE_HEADING, SCENE_HEADING_FORCED, SCENE_NUMBER, SECTION,
    SYNOPSIS, TRANSITION_FORCED,
};
use crate::utils::FountainConstants;

/// 行类型标签，顺序即优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Blank,
    PageBreak,
    Section,
    Synopsis,
    Centered,
    SceneHeading,
    Transition,
    Character,
    DialogueContent,
    Action,
}

/// What a rule sees of the current line.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    /// Visible text with surrounding whitespace trimmed.
    pub text: &'a str,
    /// Trimmed text of the next line that is not note-only; `None` at end of input.
    pub next: Option<&'a str>,
    pub dialogue_open: bool,
}

/// 规则匹配结果，携带从行中切出的文本片段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified<'a> {
    Blank,
    PageBreak,
    Section {
        level: u8,
        text: &'a str,
    },
    Synopsis {
        text: &'a str,
    },
    Centered {
        text: &'a str,
    },
    SceneHeading {
        /// `INT`, `EXT`, ... as written; `None` for forced headings.
        prefix: Option<&'a str>,
        text: &'a str,
        label: Option<&'a str>,
    },
    Transition {
        text: &'a str,
    },
    Character {
        name: &'a str,
        dual: bool,
    },
    Parenthetical {
        text: &'a str,
    },
    Dialogue {
        text: &'a str,
    },
    Action {
        text: &'a str,
        forced: bool,
    },
}

impl Classified<'_> {
    pub fn kind(&self) -> LineKind {
        match self {
            Classified::Blank => LineKind::Blank,
            Classified::PageBreak => LineKind::PageBreak,
            Classified::Section { .. } => LineKind::Section,
            Classified::Synopsis { .. } => LineKind::Synopsis,
            Classified::Centered { .. } => LineKind::Centered,
            Classified::SceneHeading { .. } => LineKind::SceneHeading,
            Classified::Transition { .. } => LineKind::Transition,
            Classified::Character { .. } => LineKind::Character,
            Classified::Parenthetical { .. } | Classified::Dialogue { .. } => {
                LineKind::DialogueContent
            }
            Classified::Action { .. } => LineKind::Action,
        }
    }
}

pub type RuleFn = for<'a, 'b> fn(&'b LineContext<'a>) -> Option<Classified<'a>>;

pub struct Rule {
    pub kind: LineKind,
    pub test: RuleFn,
}

pub static RULES: [Rule; 10] = [
    Rule { kind: LineKind::Blank, test: blank },
    Rule { kind: LineKind::PageBreak, test: page_break },
    Rule { kind: LineKind::Section, test: section },
    Rule { kind: LineKind::Synopsis, test: synopsis },
    Rule { kind: LineKind::Centered, test: centered },
    Rule { kind: LineKind::SceneHeading, test: scene_heading },
    Rule { kind: LineKind::Transition, test: transition },
    Rule { kind: LineKind::Character, test: character },
    Rule { kind: LineKind::DialogueContent, test: dialogue_content },
    Rule { kind: LineKind::Action, test: action },
];

/// Runs the rules in order and returns the first claim.
pub fn classify<'a>(ctx: &LineContext<'a>) -> Classified<'a> {
    RULES
        .iter()
        .find_map(|rule| (rule.test)(ctx))
        .unwrap_or(Classified::Action {
            text: ctx.text,
            forced: false,
        })
}

/// Whether `text` (trimmed) opens a scene, forced or by prefix.
pub fn is_scene_heading(text: &str) -> bool {
    SCENE_HEADING_FORCED.is_match(text) || SCENE_HEADING.is_match(text)
}

fn blank<'a>(ctx: &LineContext<'a>) -> Option<Classified<'a>> {
    ctx.text.is_empty().then_some(Classified::Blank)
}

fn page_break<'a>(ctx: &LineContext<'a>) -> Option<Classified<'a>> {
    PAGE_BREAK.is_match(ctx.text).then_some(Classified::PageBreak)
}

fn section<'a>(ctx: &LineContext<'a>) -> Option<Classified<'a>> {
    let caps = SECTION.captures(ctx.text)?;
    let level = caps.get(1)?.as_str().len() as u8;
    let text = caps.get(2).map_or("", |m| m.as_str()).trim();
    Some(Classified::Section { level, text })
}

fn synopsis<'a>(ctx: &LineContext<'a>) -> Option<Classified<'a>> {
    let caps = SYNOPSIS.captures(ctx.text)?;
    let text = caps.get(1).map_or("", |m| m.as_str()).trim();
    Some(Classified::Synopsis { text })
}

fn centered<'a>(ctx: &LineContext<'a>) -> Option<Classified<'a>> {
    let caps = CENTERED.captures(ctx.text)?;
    let text = caps.get(1).map_or("", |m| m.as_str());
    Some(Classified::Centered { text })
}

fn scene_heading<'a>(ctx: &LineContext<'a>) -> Option<Classified<'a>> {
    let (prefix, body) = if let Some(caps) = SCENE_HEADING_FORCED.captures(ctx.text) {
        (None, caps.get(1)?.as_str())
    } else {
        let caps = SCENE_HEADING.captures(ctx.text)?;
        (
            Some(caps.get(1)?.as_str()),
            caps.get(2).map_or("", |m| m.as_str()),
        )
    };

    let (text, label) = match SCENE_NUMBER.captures(body) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()),
            caps.get(2).map(|m| m.as_str()),
        ),
        None => (body, None),
    };

    Some(Classified::SceneHeading {
        prefix,
        text: text.trim(),
        label,
    })
}

fn transition<'a>(ctx: &LineContext<'a>) -> Option<Classified<'a>> {
    if let Some(caps) = TRANSITION_FORCED.captures(ctx.text) {
        let text = caps.get(1).map_or("", |m| m.as_str()).trim();
        return Some(Classified::Transition { text });
    }

    // `!` forces action even when the line ends like a transition
    if ctx.text.starts_with('!') {
        return None;
    }

    FountainConstants::TRANSITION_SUFFIXES
        .iter()
        .any(|suffix| ctx.text.ends_with(suffix))
        .then_some(Classified::Transition { text: ctx.text })
}

fn character<'a>(ctx: &LineContext<'a>) -> Option<Classified<'a>> {
    if ctx.dialogue_open {
        return None;
    }

    let next = ctx.next?;
    if next.is_empty() || is_scene_heading(next) {
        return None;
    }

    let caps = CHARACTER.captures(ctx.text)?;
    let forced = caps.get(1).is_some();
    if !forced && !ctx.text.chars().any(char::is_uppercase) {
        return None;
    }

    let dual = caps.get(4).is_some();
    let mut name = ctx.text;
    if dual {
        name = name.strip_suffix('^').unwrap_or(name).trim_end();
    }
    if forced {
        name = name.strip_prefix('@').unwrap_or(name).trim_start();
    }

    Some(Classified::Character { name, dual })
}

fn dialogue_content<'a>(ctx: &LineContext<'a>) -> Option<Classified<'a>> {
    if !ctx.dialogue_open {
        return None;
    }

    if is_wrapped_in_parens(ctx.text) {
        Some(Classified::Parenthetical { text: ctx.text })
    } else {
        Some(Classified::Dialogue { text: ctx.text })
    }
}

fn action<'a>(ctx: &LineContext<'a>) -> Option<Classified<'a>> {
    match ctx.text.strip_prefix('!') {
        Some(rest) => Some(Classified::Action {
            text: rest.trim(),
            forced: true,
        }),
        None => Some(Classified::Action {
            text: ctx.text,
            forced: false,
        }),
    }
}

/// `(...)` where the opening parenthesis is closed by the final character.
fn is_wrapped_in_parens(text: &str) -> bool {
    if text.len() < 2 || !text.starts_with('(') || !text.ends_with(')') {
        return false;
    }

    let last = text.len() - 1;
    let mut depth = 0i32;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 && i != last {
                    return false;
                }
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
