use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::location::Location;
use crate::models::struct_token::StructToken;

/// 场景摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub number: u32,
    pub label: Option<String>,
    pub heading: String,
    pub location: Location,
    pub line: usize,
    /// Index of the scene heading in `Document::elements()`.
    pub element: usize,
    pub action_sec: f64,
    pub dialogue_sec: f64,
}

impl Scene {
    pub fn duration_sec(&self) -> f64 {
        self.action_sec + self.dialogue_sec
    }
}

/// 剧本统计信息：场景、角色、地点、大纲和时长估算
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenplayProperties {
    pub scenes: Vec<Scene>,
    /// Character base name (extension stripped) to the scene numbers they speak in.
    pub characters: BTreeMap<String, Vec<u32>>,
    /// Location name to the scene numbers set there.
    pub locations: BTreeMap<String, Vec<u32>>,
    pub structure: Vec<StructToken>,
    pub length_action: f64,
    pub length_dialogue: f64,
    pub first_scene_line: Option<usize>,
}

impl ScreenplayProperties {
    pub fn new() -> Self {
        ScreenplayProperties {
            scenes: Vec::new(),
            characters: BTreeMap::new(),
            locations: BTreeMap::new(),
            structure: Vec::new(),
            length_action: 0.0,
            length_dialogue: 0.0,
            first_scene_line: None,
        }
    }

    pub fn scene(&self, number: u32) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.number == number)
    }
}

impl Default for ScreenplayProperties {
    fn default() -> Self {
        Self::new()
    }
}
