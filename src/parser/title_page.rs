use crate::models::{Note, TitleFields, TitleKey};
use crate::parser::text_processor::ScannedLine;

/// 标题页解析结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleBlock {
    /// Index of the first body line.
    pub cursor: usize,
    pub fields: TitleFields,
    /// Notes found inside the title block.
    pub notes: Vec<Note>,
}

/// 解析开头的 `key: value` 标题页
///
/// Consumes lines from the top while each one is a recognized metadata line
/// or an indented, colon-free continuation of the previous field. The first
/// line that is neither (a blank line, an unknown key, plain text) is left
/// for the body.
pub fn extract_title_block(lines: &[ScannedLine]) -> TitleBlock {
    let mut block = TitleBlock::default();
    let mut last_key: Option<TitleKey> = None;

    for line in lines {
        if let Some(key) = last_key {
            if line.is_note_only() {
                block.notes.extend(line.notes.iter().cloned());
                block.cursor += 1;
                continue;
            }
            if is_continuation(&line.text) {
                if let Some(value) = block.fields.get_mut(key) {
                    if !value.is_empty() {
                        value.push(' ');
                    }
                    value.push_str(line.trimmed());
                }
                block.notes.extend(line.notes.iter().cloned());
                block.cursor += 1;
                continue;
            }
        }

        match parse_metadata_line(&line.text) {
            Some((key, value)) => {
                block.fields.insert(key, value);
                block.notes.extend(line.notes.iter().cloned());
                block.cursor += 1;
                last_key = Some(key);
            }
            None => break,
        }
    }

    block
}

/// Splits `key: value` when the key is one of the recognized title keys.
pub fn parse_metadata_line(text: &str) -> Option<(TitleKey, String)> {
    let (raw_key, value) = text.split_once(':')?;
    let key = TitleKey::from_raw(raw_key)?;
    Some((key, value.trim().to_string()))
}

fn is_continuation(text: &str) -> bool {
    text.starts_with(char::is_whitespace) && !text.trim().is_empty() && !text.contains(':')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::line_cursor::LineCursor;
    use pretty_assertions::assert_eq;

    fn scan(script: &str) -> Vec<ScannedLine> {
        LineCursor::new(script).collect()
    }

    #[test]
    fn stops_at_blank_line() {
        let block = extract_title_block(&scan("Title: ALPHA\nAuthor: Jane\n\nINT. ROOM - DAY"));
        assert_eq!(block.cursor, 2);
        assert_eq!(block.fields.get(TitleKey::Title), Some("ALPHA"));
        assert_eq!(block.fields.get(TitleKey::Author), Some("Jane"));
        assert_eq!(block.fields.len(), 2);
    }

    #[test]
    fn indented_lines_continue_a_value() {
        let block = extract_title_block(&scan(
            "Title:\n    BRICK & STEEL\n    FULL RETIRED\nContact: Next Level\n\tSuite 100",
        ));
        assert_eq!(block.cursor, 5);
        assert_eq!(block.fields.get(TitleKey::Title), Some("BRICK & STEEL FULL RETIRED"));
        assert_eq!(block.fields.get(TitleKey::Contact), Some("Next Level Suite 100"));
    }

    #[test]
    fn unknown_key_is_left_for_the_body() {
        let block = extract_title_block(&scan("Title: X\nRevision: blue\nAction."));
        assert_eq!(block.cursor, 1);
        assert_eq!(block.fields.len(), 1);
    }

    #[test]
    fn no_colon_means_no_title_block() {
        let block = extract_title_block(&scan("JANE\nHello there!"));
        assert_eq!(block.cursor, 0);
        assert!(block.fields.is_empty());
    }

    #[test]
    fn redeclared_key_overwrites() {
        let block = extract_title_block(&scan("Draft date: 1 May\nDate: 2 May\n"));
        assert_eq!(block.fields.get(TitleKey::DraftDate), Some("2 May"));
    }

    #[test]
    fn value_keeps_later_colons() {
        let (key, value) = parse_metadata_line("Notes: call at 10:30").unwrap();
        assert_eq!(key, TitleKey::Notes);
        assert_eq!(value, "call at 10:30");
    }

    #[test]
    fn indented_line_with_colon_is_not_a_continuation() {
        let block = extract_title_block(&scan("Title: X\n  INT: hmm"));
        assert_eq!(block.cursor, 1);
    }
}
