use crate::models::Note;
use crate::parser::text_processor::{InlineScanner, ScannedLine};

/// 行游标：顺序读取扫描后的行，并支持向前查看下一行
#[derive(Debug)]
pub struct LineCursor {
    lines: Vec<ScannedLine>,
    /// For each index, the first line at or after it that is not note-only.
    significant: Vec<Option<usize>>,
    position: usize,
    dangling_note: Option<Note>,
}

impl LineCursor {
    /// Splits on `\n` or `\r\n` and runs every line through the boneyard/note
    /// scanner up front, so lookahead sees exactly what classification sees.
    pub fn new(script: &str) -> Self {
        let mut scanner = InlineScanner::new();
        let lines = script
            .lines()
            .enumerate()
            .map(|(i, raw)| scanner.scan_line(i, raw))
            .collect::<Vec<ScannedLine>>();

        let mut significant = vec![None; lines.len()];
        let mut next = None;
        for (i, line) in lines.iter().enumerate().rev() {
            if !line.is_note_only() {
                next = Some(i);
            }
            significant[i] = next;
        }

        LineCursor {
            lines,
            significant,
            position: 0,
            dangling_note: scanner.finish(),
        }
    }

    pub fn line_index(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> &[ScannedLine] {
        &self.lines[self.position..]
    }

    /// Moves past `count` lines already consumed by a caller.
    pub fn advance(&mut self, count: usize) {
        self.position = (self.position + count).min(self.lines.len());
    }

    /// The first line after the current one that carries more than note text.
    pub fn peek_significant(&self) -> Option<&ScannedLine> {
        let index = (*self.significant.get(self.position)?)?;
        self.lines.get(index)
    }

    /// Note left open when the input ended.
    pub fn take_dangling_note(&mut self) -> Option<Note> {
        self.dangling_note.take()
    }
}

impl Iterator for LineCursor {
    type Item = ScannedLine;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.get(self.position).cloned()?;
        self.position += 1;
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_line_endings() {
        let cursor = LineCursor::new("one\r\ntwo\nthree");
        let texts: Vec<String> = cursor.map(|l| l.text).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn peek_skips_note_only_lines() {
        let mut cursor = LineCursor::new("JANE\n[[aside]]\nHello.");
        let first = cursor.next().unwrap();
        assert_eq!(first.text, "JANE");
        assert_eq!(cursor.peek_significant().unwrap().text, "Hello.");
        assert_eq!(cursor.line_index(), 1);
    }

    #[test]
    fn peek_past_trailing_notes_is_none() {
        let mut cursor = LineCursor::new("JANE\n[[one]]\n[[two]]");
        cursor.next();
        assert!(cursor.peek_significant().is_none());
    }

    #[test]
    fn peek_follows_the_cursor() {
        let mut cursor = LineCursor::new("a\n[[n]]\nb\n[[m]]\nc");
        cursor.next();
        assert_eq!(cursor.peek_significant().unwrap().text, "b");
        cursor.advance(2);
        assert_eq!(cursor.peek_significant().unwrap().text, "c");
    }

    #[test]
    fn peek_at_end_is_none() {
        let mut cursor = LineCursor::new("ONLY");
        cursor.next();
        assert!(cursor.peek_significant().is_none());
    }
}
