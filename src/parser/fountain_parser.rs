use tracing::{debug, instrument, trace};

use crate::models::{Conf, Document, Element, Location, Note};
use crate::parser::line_cursor::LineCursor;
use crate::parser::properties::build_properties;
use crate::parser::rules::{classify, Classified, LineContext};
use crate::parser::text_processor::{resolve_emphasis, strip_emphasis_tags, ScannedLine};
use crate::parser::title_page::extract_title_block;

/// Fountain 解析器
///
/// Holds only configuration. Every call to [`parse`](FountainParser::parse)
/// owns its own transient state, so one parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct FountainParser {
    config: Conf,
}

impl FountainParser {
    pub fn new(config: Conf) -> Self {
        FountainParser { config }
    }

    pub fn config(&self) -> &Conf {
        &self.config
    }

    /// 解析Fountain格式文本
    ///
    /// Never fails: a line no other rule claims becomes action text.
    #[instrument(level = "debug", skip_all, fields(bytes = script.len()))]
    pub fn parse(&self, script: &str) -> Document {
        let mut cursor = LineCursor::new(script);

        let title = extract_title_block(cursor.remaining());
        cursor.advance(title.cursor);
        debug!(
            fields = title.fields.len(),
            body_start = title.cursor,
            "title block extracted"
        );

        let mut state = ClassifierState::new(self.config.use_dual_dialogue, title.notes);
        while let Some(line) = cursor.next() {
            let next = cursor.peek_significant().map(ScannedLine::trimmed);
            state = state.step(&line, next);
        }
        let output = state.finish(cursor.take_dangling_note());

        let properties = build_properties(
            &output.elements,
            &output.source_lines,
            &output.locations,
            &self.config,
        );
        debug!(
            elements = output.elements.len(),
            scenes = properties.scenes.len(),
            notes = output.notes.len(),
            "document parsed"
        );

        Document::new(
            title.fields,
            output.elements,
            output.source_lines,
            output.notes,
            properties,
        )
    }
}

/// 对话块状态
#[derive(Debug, Clone, Copy)]
struct DialogueBlock {
    dual: bool,
}

/// 连续 action 行的缓冲
#[derive(Debug, Default)]
struct ActionBuffer {
    lines: Vec<String>,
    start_line: usize,
}

impl ActionBuffer {
    fn push(&mut self, line: usize, text: String) {
        if self.lines.is_empty() {
            self.start_line = line;
        }
        self.lines.push(text);
    }

    fn take(&mut self) -> Option<(usize, String)> {
        if self.lines.is_empty() {
            return None;
        }
        let text = self.lines.join(" ").trim().to_string();
        self.lines.clear();
        Some((self.start_line, text))
    }
}

/// Everything the fold has emitted so far.
#[derive(Debug, Default)]
struct Emitted {
    elements: Vec<Element>,
    source_lines: Vec<usize>,
    notes: Vec<Note>,
    /// One entry per scene heading, in order.
    locations: Vec<Location>,
}

/// 分类器状态，在逐行折叠中传递
#[derive(Debug)]
struct ClassifierState {
    use_dual_dialogue: bool,
    dialogue: Option<DialogueBlock>,
    action: ActionBuffer,
    scene_counter: u32,
    /// Notes waiting for the next element to be emitted.
    pending_notes: Vec<Note>,
    emitted: Emitted,
}

impl ClassifierState {
    fn new(use_dual_dialogue: bool, title_notes: Vec<Note>) -> Self {
        ClassifierState {
            use_dual_dialogue,
            dialogue: None,
            action: ActionBuffer::default(),
            scene_counter: 0,
            pending_notes: Vec::new(),
            emitted: Emitted {
                notes: title_notes,
                ..Emitted::default()
            },
        }
    }

    fn step(mut self, line: &ScannedLine, next: Option<&str>) -> Self {
        if line.is_note_only() {
            self.pending_notes.extend(line.notes.iter().cloned());
            return self;
        }

        let ctx = LineContext {
            text: line.trimmed(),
            next,
            dialogue_open: self.dialogue.is_some(),
        };
        let classified = classify(&ctx);
        trace!(line = line.line, kind = ?classified.kind(), "classified line");

        match classified {
            Classified::Action {
                text,
                forced: false,
            } => {
                self.action.push(line.line, resolve_emphasis(text));
                self.pending_notes.extend(line.notes.iter().cloned());
            }
            Classified::Blank => {
                self.flush_action();
                self.dialogue = None;
            }
            other => {
                self.flush_action();
                self.pending_notes.extend(line.notes.iter().cloned());
                self.apply(other, line.line);
            }
        }
        self
    }

    fn apply(&mut self, classified: Classified<'_>, line: usize) {
        match classified {
            Classified::Blank => {}
            Classified::PageBreak => {
                self.dialogue = None;
                self.emit(Element::PageBreak, line);
            }
            Classified::Section { level, text } => {
                self.dialogue = None;
                let text = resolve_emphasis(text);
                self.emit(Element::Section { level, text }, line);
            }
            Classified::Synopsis { text } => {
                self.dialogue = None;
                let text = resolve_emphasis(text);
                self.emit(Element::Synopsis { text }, line);
            }
            Classified::Centered { text } => {
                self.dialogue = None;
                let text = resolve_emphasis(text);
                self.emit(Element::Centered { text }, line);
            }
            Classified::SceneHeading {
                prefix,
                text,
                label,
            } => {
                self.dialogue = None;
                self.scene_counter += 1;
                let number = label
                    .and_then(|l| l.parse::<u32>().ok())
                    .unwrap_or(self.scene_counter);
                let text = resolve_emphasis(text);
                self.emitted
                    .locations
                    .push(Location::from_heading(prefix, &strip_emphasis_tags(&text)));
                self.emit(
                    Element::SceneHeading {
                        text,
                        number,
                        label: label.map(str::to_string),
                    },
                    line,
                );
            }
            Classified::Transition { text } => {
                self.dialogue = None;
                let text = resolve_emphasis(text);
                self.emit(Element::Transition { text }, line);
            }
            Classified::Character { name, dual } => {
                let dual = dual && self.use_dual_dialogue;
                self.dialogue = Some(DialogueBlock { dual });
                self.emit(
                    Element::Character {
                        name: name.to_string(),
                        dual,
                    },
                    line,
                );
            }
            Classified::Parenthetical { text } => {
                let text = resolve_emphasis(text);
                self.emit(Element::Parenthetical { text }, line);
            }
            Classified::Dialogue { text } => {
                let dual = self.dialogue.map_or(false, |block| block.dual);
                let text = resolve_emphasis(text);
                self.emit(Element::Dialogue { text, dual }, line);
            }
            Classified::Action { text, .. } => {
                // 单独的 `!` 不产生空的 action
                if !text.is_empty() {
                    let text = resolve_emphasis(text);
                    self.emit(Element::Action { text }, line);
                }
            }
        }
    }

    fn flush_action(&mut self) {
        if let Some((line, text)) = self.action.take() {
            self.emit(Element::Action { text }, line);
        }
    }

    fn emit(&mut self, element: Element, line: usize) {
        let index = self.emitted.elements.len();
        self.emitted.elements.push(element);
        self.emitted.source_lines.push(line);
        for mut note in self.pending_notes.drain(..) {
            note.element = Some(index);
            self.emitted.notes.push(note);
        }
    }

    /// End of input: flush pending action and hand trailing notes to the last element.
    fn finish(mut self, dangling_note: Option<Note>) -> Emitted {
        self.flush_action();
        self.pending_notes.extend(dangling_note);

        let last = self.emitted.elements.len().checked_sub(1);
        for mut note in self.pending_notes.drain(..) {
            note.element = last;
            self.emitted.notes.push(note);
        }
        self.emitted
    }
}
