pub mod fountain_parser;
pub mod html;
pub mod line_cursor;
pub mod properties;
pub mod rules;
pub mod text_processor;
pub mod title_page;

pub use fountain_parser::FountainParser;
pub use html::{generate_html, generate_title_html};
pub use line_cursor::LineCursor;
pub use properties::{action_duration, build_properties, dialogue_duration};
pub use rules::{classify, Classified, LineContext, LineKind, RULES};
pub use text_processor::{
    resolve_emphasis, resolve_inline, strip_emphasis_tags, InlineScanner, InlineText, ScannedLine,
};
pub use title_page::{extract_title_block, parse_metadata_line, TitleBlock};
