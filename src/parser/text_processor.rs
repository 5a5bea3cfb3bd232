use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::models::Note;
use crate::utils::fountain_constants::{BOLD, BOLD_ITALIC, EMPHASIS_TAG, ITALIC, UNDERLINE};
use crate::utils::{is_blank_line, FountainConstants};

/// 扫描后的行：去掉 boneyard 和 note 之后的可见文本
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedLine {
    /// 0-based source line.
    pub line: usize,
    /// Visible text, leading whitespace preserved.
    pub text: String,
    /// Notes that closed on this line.
    pub notes: Vec<Note>,
    note_only: bool,
}

impl ScannedLine {
    /// Blank for classification. Lines carrying nothing but note content are
    /// not blank: they are skipped without closing a dialogue block.
    pub fn is_blank(&self) -> bool {
        !self.note_only && is_blank_line(&self.text)
    }

    pub fn is_note_only(&self) -> bool {
        self.note_only
    }

    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// 逐行去除 boneyard（`/* */`）和 note（`[[ ]]`）
///
/// Both constructs may stay open across line ends, so the scanner carries that
/// state from one line to the next. Boneyard is removed first; note text is
/// collected into [`Note`] values.
#[derive(Debug, Default)]
pub struct InlineScanner {
    in_boneyard: bool,
    open_note: Option<Note>,
}

impl InlineScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scan_line(&mut self, line: usize, raw: &str) -> ScannedLine {
        let without_boneyard = self.strip_boneyard(raw);
        let mut notes = Vec::new();
        let note_seen = self.open_note.is_some()
            || without_boneyard.contains(FountainConstants::NOTE_OPEN);
        let text = self.extract_notes(&without_boneyard, line, &mut notes);

        ScannedLine {
            line,
            note_only: note_seen && is_blank_line(&text),
            text,
            notes,
        }
    }

    /// Returns a note still open at end of input.
    pub fn finish(&mut self) -> Option<Note> {
        self.in_boneyard = false;
        self.open_note.take().map(|mut note| {
            note.note = note.note.trim().to_string();
            note
        })
    }

    fn strip_boneyard(&mut self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        loop {
            if self.in_boneyard {
                match rest.find(FountainConstants::BONEYARD_CLOSE) {
                    Some(idx) => {
                        rest = &rest[idx + FountainConstants::BONEYARD_CLOSE.len()..];
                        self.in_boneyard = false;
                    }
                    None => return out,
                }
            } else {
                match rest.find(FountainConstants::BONEYARD_OPEN) {
                    Some(idx) => {
                        out.push_str(&rest[..idx]);
                        rest = &rest[idx + FountainConstants::BONEYARD_OPEN.len()..];
                        self.in_boneyard = true;
                    }
                    None => {
                        out.push_str(rest);
                        return out;
                    }
                }
            }
        }
    }

    fn extract_notes(&mut self, text: &str, line: usize, notes: &mut Vec<Note>) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        loop {
            match self.open_note.take() {
                Some(mut note) => match rest.find(FountainConstants::NOTE_CLOSE) {
                    Some(idx) => {
                        note.note.push_str(&rest[..idx]);
                        note.note = note.note.trim().to_string();
                        notes.push(note);
                        rest = &rest[idx + FountainConstants::NOTE_CLOSE.len()..];
                    }
                    None => {
                        note.note.push_str(rest);
                        note.note.push('\n');
                        self.open_note = Some(note);
                        return out;
                    }
                },
                None => match rest.find(FountainConstants::NOTE_OPEN) {
                    Some(idx) => {
                        out.push_str(&rest[..idx]);
                        self.open_note = Some(Note::new(String::new(), line));
                        rest = &rest[idx + FountainConstants::NOTE_OPEN.len()..];
                    }
                    None => {
                        out.push_str(rest);
                        return out;
                    }
                },
            }
        }
    }
}

/// 行内文本解析结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineText {
    pub text: String,
    pub notes: Vec<String>,
}

/// Resolves one piece of free text: boneyard removal, note extraction, then
/// emphasis with escapes honoured.
pub fn resolve_inline(text: &str) -> InlineText {
    let mut scanner = InlineScanner::new();
    let scanned = scanner.scan_line(0, text);
    let mut notes: Vec<String> = scanned.notes.into_iter().map(|n| n.note).collect();
    if let Some(open) = scanner.finish() {
        notes.push(open.note);
    }

    InlineText {
        text: resolve_emphasis(&scanned.text),
        notes,
    }
}

/// 处理行内样式：`***` 粗斜体、`**` 粗体、`*` 斜体、`_` 下划线
///
/// Escaped characters are swapped for a placeholder before any span is
/// matched and put back afterwards, so `\*` can never open or close a span.
pub fn resolve_emphasis(text: &str) -> String {
    let (masked, literals) = mask_escapes(text);

    let styled = BOLD_ITALIC.replace_all(&masked, "<b><i>${1}</i></b>");
    let styled = BOLD.replace_all(&styled, "<b>${1}</b>");
    let styled = ITALIC.replace_all(&styled, "<i>${1}</i>");
    let styled = UNDERLINE.replace_all(&styled, "<u>${1}</u>");

    restore_escapes(&styled, &literals)
}

/// Removes the tags produced by [`resolve_emphasis`].
pub fn strip_emphasis_tags(text: &str) -> String {
    EMPHASIS_TAG.replace_all(text, "").into_owned()
}

fn mask_escapes(text: &str) -> (String, Vec<&str>) {
    let mut masked = String::with_capacity(text.len());
    let mut literals = Vec::new();
    let mut graphemes = text.graphemes(true);

    while let Some(g) = graphemes.next() {
        if g == "\\" {
            match graphemes.next() {
                Some(escaped) => {
                    masked.push(FountainConstants::ESCAPE_MARK);
                    literals.push(escaped);
                }
                None => masked.push_str(g),
            }
        } else if g.contains(FountainConstants::ESCAPE_MARK) {
            // 原文中的占位符本身也按字面量处理
            masked.push(FountainConstants::ESCAPE_MARK);
            literals.push(g);
        } else {
            masked.push_str(g);
        }
    }

    (masked, literals)
}

fn restore_escapes(text: &str, literals: &[&str]) -> String {
    if literals.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut literals = literals.iter();
    for c in text.chars() {
        if c == FountainConstants::ESCAPE_MARK {
            if let Some(literal) = literals.next() {
                out.push_str(literal);
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("*italic* and **bold**", "<i>italic</i> and <b>bold</b>")]
    #[case("***both***", "<b><i>both</i></b>")]
    #[case("_under_ line", "<u>under</u> line")]
    #[case("**bold** then *it*", "<b>bold</b> then <i>it</i>")]
    #[case("an *unclosed marker", "an *unclosed marker")]
    #[case("2 * 3 = 6", "2 * 3 = 6")]
    fn emphasis_spans(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(resolve_emphasis(input), expected);
    }

    #[rstest]
    #[case(r"\*not italic\*", "*not italic*")]
    #[case(r"*keep \* inside*", "<i>keep * inside</i>")]
    #[case(r"snake\_case\_name", "snake_case_name")]
    #[case(r"back\\slash", r"back\slash")]
    #[case(r"trailing \", r"trailing \")]
    fn escapes_are_literal(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(resolve_emphasis(input), expected);
    }

    #[test]
    fn escape_keeps_whole_grapheme() {
        assert_eq!(resolve_emphasis("\\e\u{301}*x*"), "e\u{301}<i>x</i>");
    }

    #[test]
    fn placeholder_in_source_survives() {
        let input = format!("a{}b", FountainConstants::ESCAPE_MARK);
        assert_eq!(resolve_emphasis(&input), input);
    }

    #[test]
    fn boneyard_goes_before_emphasis() {
        let resolved = resolve_inline("*a /* b* */c*");
        assert_eq!(resolved.text, "<i>a c</i>");
    }

    #[test]
    fn notes_are_collected_not_shown() {
        let resolved = resolve_inline("Hello [[check this]] world");
        assert_eq!(resolved.text, "Hello  world");
        assert_eq!(resolved.notes, vec!["check this".to_string()]);
    }

    #[test]
    fn boneyard_spans_lines() {
        let mut scanner = InlineScanner::new();
        let first = scanner.scan_line(0, "keep /* drop");
        let middle = scanner.scan_line(1, "all of this");
        let last = scanner.scan_line(2, "still */ back");
        assert_eq!(first.text, "keep ");
        assert!(middle.is_blank());
        assert_eq!(last.text, " back");
    }

    #[test]
    fn note_only_lines_are_not_blank() {
        let mut scanner = InlineScanner::new();
        let opened = scanner.scan_line(4, "[[a long");
        let closed = scanner.scan_line(5, "note]]");
        assert!(opened.is_note_only() && !opened.is_blank());
        assert!(closed.is_note_only());
        assert_eq!(closed.notes.len(), 1);
        assert_eq!(closed.notes[0].note, "a long\nnote");
        assert_eq!(closed.notes[0].line, 4);
    }

    #[test]
    fn unterminated_note_is_returned_on_finish() {
        let mut scanner = InlineScanner::new();
        scanner.scan_line(0, "text [[dangling");
        let note = scanner.finish().unwrap();
        assert_eq!(note.note, "dangling");
    }

    #[test]
    fn strips_tags() {
        assert_eq!(strip_emphasis_tags("<b><i>x</i></b> y"), "x y");
    }
}
