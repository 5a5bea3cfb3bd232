use serde::Serialize;

use crate::models::element::Element;
use crate::models::screenplay_properties::ScreenplayProperties;
use crate::models::struct_token::Note;
use crate::models::title::TitleFields;

/// 解析结果：标题页字段 + 有序元素流
///
/// Built once per parse call and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    title_fields: TitleFields,
    elements: Vec<Element>,
    source_lines: Vec<usize>,
    notes: Vec<Note>,
    properties: ScreenplayProperties,
}

impl Document {
    pub(crate) fn new(
        title_fields: TitleFields,
        elements: Vec<Element>,
        source_lines: Vec<usize>,
        notes: Vec<Note>,
        properties: ScreenplayProperties,
    ) -> Self {
        debug_assert_eq!(elements.len(), source_lines.len());
        Document {
            title_fields,
            elements,
            source_lines,
            notes,
            properties,
        }
    }

    pub fn title_fields(&self) -> &TitleFields {
        &self.title_fields
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// 0-based input line on which each element starts, parallel to `elements()`.
    pub fn source_lines(&self) -> &[usize] {
        &self.source_lines
    }

    /// Every note in document order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Notes attached to the element at `index`.
    pub fn notes_for(&self, index: usize) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(move |n| n.element == Some(index))
    }

    pub fn properties(&self) -> &ScreenplayProperties {
        &self.properties
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}
