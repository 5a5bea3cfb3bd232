//! 剧本统计：场景列表、角色与地点索引、大纲树、时长估算

use tracing::debug;

use crate::models::{
    Conf, Element, Location, Scene, ScreenplayProperties, StructKind, StructToken, Synopsis,
};
use crate::parser::text_processor::strip_emphasis_tags;
use crate::utils::fountain_constants::{NON_SPOKEN, PUNCTUATION};
use crate::utils::trim_character_extension;

/// Builds the statistics for an already classified element stream.
///
/// `locations` holds one entry per scene heading, in element order. Screen
/// time before the first scene heading is not counted.
pub fn build_properties(
    elements: &[Element],
    source_lines: &[usize],
    locations: &[Location],
    conf: &Conf,
) -> ScreenplayProperties {
    let mut props = ScreenplayProperties::new();
    let mut outline = OutlineBuilder::default();
    let mut locations = locations.iter();

    for (index, element) in elements.iter().enumerate() {
        let line = source_lines.get(index).copied().unwrap_or_default();
        match element {
            Element::SceneHeading {
                text,
                number,
                label,
            } => {
                let heading = strip_emphasis_tags(text);
                let location = locations
                    .next()
                    .cloned()
                    .unwrap_or_else(|| Location::from_heading(None, &heading));

                push_unique(props.locations.entry(location.name.clone()).or_default(), *number);
                if props.first_scene_line.is_none() {
                    props.first_scene_line = Some(line);
                }
                outline.open_scene(StructToken::new(
                    heading.clone(),
                    StructKind::Scene,
                    0,
                    line,
                    index,
                ));
                props.scenes.push(Scene {
                    number: *number,
                    label: label.clone(),
                    heading,
                    location,
                    line,
                    element: index,
                    action_sec: 0.0,
                    dialogue_sec: 0.0,
                });
            }
            Element::Section { level, text } => {
                outline.open_section(StructToken::new(
                    strip_emphasis_tags(text),
                    StructKind::Section,
                    usize::from(*level),
                    line,
                    index,
                ));
            }
            Element::Synopsis { text } => outline.add_synopsis(Synopsis {
                synopsis: strip_emphasis_tags(text),
                line,
            }),
            Element::Character { name, .. } => {
                let speaker = props
                    .characters
                    .entry(trim_character_extension(name).to_string())
                    .or_default();
                if let Some(scene) = props.scenes.last() {
                    push_unique(speaker, scene.number);
                }
            }
            Element::Action { text } => {
                if let Some(scene) = props.scenes.last_mut() {
                    let sec = action_duration(&strip_emphasis_tags(text), conf);
                    scene.action_sec += sec;
                    props.length_action += sec;
                    outline.add_duration(sec);
                }
            }
            Element::Dialogue { text, .. } => {
                if let Some(scene) = props.scenes.last_mut() {
                    let sec = dialogue_duration(&strip_emphasis_tags(text), conf);
                    scene.dialogue_sec += sec;
                    props.length_dialogue += sec;
                    outline.add_duration(sec);
                }
            }
            Element::Transition { .. }
            | Element::Parenthetical { .. }
            | Element::Centered { .. }
            | Element::PageBreak => {}
        }
    }

    props.structure = outline.finish();
    debug!(
        scenes = props.scenes.len(),
        characters = props.characters.len(),
        locations = props.locations.len(),
        "screenplay properties built"
    );
    props
}

/// Number of characters that take screen time: whitespace, punctuation and
/// symbols removed.
pub fn spoken_chars(text: &str) -> usize {
    NON_SPOKEN.replace_all(text, "").chars().count()
}

// 计算动作持续时间
pub fn action_duration(text: &str, conf: &Conf) -> f64 {
    spoken_chars(text) as f64 * conf.action_sec_per_char
}

// 计算对话持续时间，标点按长短额外计时
pub fn dialogue_duration(text: &str, conf: &Conf) -> f64 {
    let mut duration = spoken_chars(text) as f64 * conf.dial_sec_per_char;
    for cap in PUNCTUATION.captures_iter(text) {
        if cap.get(1).is_some() {
            duration += conf.dial_sec_per_punc_long;
        } else if cap.get(2).is_some() {
            duration += conf.dial_sec_per_punc_short;
        }
    }
    duration
}

fn push_unique(numbers: &mut Vec<u32>, number: u32) {
    if !numbers.contains(&number) {
        numbers.push(number);
    }
}

/// 大纲栈：章节按层级嵌套，场景挂在最近的章节下
#[derive(Debug, Default)]
struct OutlineBuilder {
    roots: Vec<StructToken>,
    stack: Vec<StructToken>,
}

impl OutlineBuilder {
    fn open_section(&mut self, node: StructToken) {
        while let Some(top) = self.stack.last() {
            if top.is_scene() || top.level >= node.level {
                self.close_top();
            } else {
                break;
            }
        }
        self.stack.push(node);
    }

    fn open_scene(&mut self, mut node: StructToken) {
        if self.stack.last().map_or(false, StructToken::is_scene) {
            self.close_top();
        }
        node.level = self.stack.last().map_or(1, |parent| parent.level + 1);
        self.stack.push(node);
    }

    fn add_synopsis(&mut self, synopsis: Synopsis) {
        if let Some(top) = self.stack.last_mut() {
            top.synopses.push(synopsis);
        }
    }

    fn add_duration(&mut self, sec: f64) {
        if let Some(top) = self.stack.last_mut() {
            top.duration_sec += sec;
        }
    }

    fn close_top(&mut self) {
        if let Some(node) = self.stack.pop() {
            match self.stack.last_mut() {
                Some(parent) => {
                    parent.duration_sec += node.duration_sec;
                    parent.children.push(node);
                }
                None => self.roots.push(node),
            }
        }
    }

    fn finish(mut self) -> Vec<StructToken> {
        while !self.stack.is_empty() {
            self.close_top();
        }
        self.roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::FountainParser;

    fn props(script: &str) -> ScreenplayProperties {
        FountainParser::default().parse(script).properties().clone()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn spoken_chars_skip_punctuation_and_space() {
        assert_eq!(spoken_chars("Hi, you!"), 5);
        assert_eq!(spoken_chars("你好，世界。"), 4);
    }

    #[test]
    fn dialogue_counts_punctuation() {
        let conf = Conf::default();
        // 2 chars * 0.3 + one long stop
        assert!(approx(dialogue_duration("No.", &conf), 0.6 + 0.75));
        // 4 chars * 0.3 + one short + one long
        assert!(approx(dialogue_duration("Ah, no!", &conf), 1.2 + 0.3 + 0.75));
    }

    #[test]
    fn action_uses_its_own_rate() {
        let conf = Conf {
            action_sec_per_char: 1.0,
            ..Conf::default()
        };
        assert!(approx(action_duration("a b c.", &conf), 3.0));
    }

    #[test]
    fn scenes_characters_and_locations() {
        let p = props(
            "INT. KITCHEN - NIGHT\n\nJANE (V.O.)\nHi.\n\n\
             EXT. GARDEN - DAY\n\nJANE\nBye.\n\nBOB\nOk.\n\n\
             INT. KITCHEN - DAY\nEmpty.",
        );
        assert_eq!(p.scenes.len(), 3);
        assert_eq!(p.scenes[0].location.name, "KITCHEN");
        assert_eq!(p.characters["JANE"], vec![1, 2]);
        assert_eq!(p.characters["BOB"], vec![2]);
        assert_eq!(p.locations["KITCHEN"], vec![1, 3]);
        assert_eq!(p.first_scene_line, Some(0));
        assert!(p.scenes[2].action_sec > 0.0);
        assert!(approx(p.scenes[2].dialogue_sec, 0.0));
        let second = p.scene(2).unwrap();
        assert_eq!(second.location.name, "GARDEN");
        assert!(approx(
            second.duration_sec(),
            second.action_sec + second.dialogue_sec
        ));
        assert!(second.duration_sec() > 0.0);
        assert!(p.scene(9).is_none());
    }

    #[test]
    fn time_before_first_scene_is_ignored() {
        let p = props("Opening crawl.\n\nINT. ROOM\n\nA.");
        assert!(approx(p.length_action, 0.4));
        assert_eq!(p.first_scene_line, Some(2));
    }

    #[test]
    fn outline_nests_sections_and_scenes() {
        let p = props(
            "# Act One\n= Things start\n\n## Setup\n\n\
             INT. A\n\nWalks.\n\nINT. B\n\n# Act Two\n\nEXT. C",
        );
        assert_eq!(p.structure.len(), 2);
        let act_one = &p.structure[0];
        assert_eq!(act_one.text, "Act One");
        assert_eq!(act_one.synopses[0].synopsis, "Things start");
        let setup = &act_one.children[0];
        assert_eq!(setup.level, 2);
        let scenes: Vec<&str> = setup.children.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(scenes, vec!["A", "B"]);
        assert_eq!(setup.children[0].level, 3);
        assert!(approx(act_one.duration_sec, setup.children[0].duration_sec));
        assert_eq!(p.structure[1].children[0].text, "C");
    }
}
