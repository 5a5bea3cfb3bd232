use serde::Serialize;

/// 概要：挂在大纲节点上的 `= ...` 行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Synopsis {
    pub synopsis: String,
    pub line: usize,
}

/// 注解：`[[...]]` 的内容，不参与显示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub note: String,
    /// Source line the note opened on.
    pub line: usize,
    /// Index into `Document::elements()` of the element carrying the note.
    pub element: Option<usize>,
}

impl Note {
    pub fn new(note: String, line: usize) -> Self {
        Note {
            note,
            line,
            element: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructKind {
    Section,
    Scene,
}

/// 大纲树节点：章节或场景
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructToken {
    pub text: String,
    pub kind: StructKind,
    /// Section depth (1-6); scenes take the depth of their enclosing section + 1.
    pub level: usize,
    pub line: usize,
    /// Index of the element this node was built from.
    pub element: usize,
    pub children: Vec<StructToken>,
    pub synopses: Vec<Synopsis>,
    /// Estimated screen time covered by the node, children included.
    pub duration_sec: f64,
}

impl StructToken {
    pub fn new(text: String, kind: StructKind, level: usize, line: usize, element: usize) -> Self {
        StructToken {
            text,
            kind,
            level,
            line,
            element,
            children: Vec::new(),
            synopses: Vec::new(),
            duration_sec: 0.0,
        }
    }

    pub fn is_section(&self) -> bool {
        self.kind == StructKind::Section
    }

    pub fn is_scene(&self) -> bool {
        self.kind == StructKind::Scene
    }
}
