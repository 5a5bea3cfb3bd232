use lazy_static::lazy_static;
use regex::Regex;

pub struct FountainConstants;

impl FountainConstants {
    /// 转场后缀
    pub const TRANSITION_SUFFIXES: [&'static str; 5] =
        ["TO:", "FADE IN:", "FADE OUT.", "FADE TO BLACK.", "CUT TO BLACK."];

    // 内部占位符：私有区字符，不会出现在输出中
    pub const ESCAPE_MARK: char = '\u{E000}';

    pub const BONEYARD_OPEN: &'static str = "/*";
    pub const BONEYARD_CLOSE: &'static str = "*/";
    pub const NOTE_OPEN: &'static str = "[[";
    pub const NOTE_CLOSE: &'static str = "]]";
}

lazy_static! {
    // 块级元素正则（作用于去掉首尾空白后的行）
    pub static ref PAGE_BREAK: Regex = Regex::new(r"^={3,}$").expect("page break pattern");
    pub static ref SECTION: Regex = Regex::new(r"^(#{1,6})\s+(.*)$").expect("section pattern");
    pub static ref SYNOPSIS: Regex = Regex::new(r"^=\s+(.*)$").expect("synopsis pattern");
    pub static ref CENTERED: Regex = Regex::new(r"^>\s*(.*?)\s*<$").expect("centered pattern");
    pub static ref SCENE_HEADING_FORCED: Regex =
        Regex::new(r"^\.([^.].*)$").expect("forced scene heading pattern");
    pub static ref SCENE_HEADING: Regex = Regex::new(
        r"(?i)^(INT\./EXT|INT/EXT|I\./E|I/E|INT|EXT|EST)(?:\.|\s)\s*(.*)$"
    )
    .expect("scene heading pattern");
    pub static ref SCENE_NUMBER: Regex =
        Regex::new(r"^(.*?)\s*#\s*([^#\s][^#]*?)\s*#$").expect("scene number pattern");
    pub static ref TRANSITION_FORCED: Regex =
        Regex::new(r"^>\s*(.*)$").expect("forced transition pattern");
    pub static ref CHARACTER: Regex = Regex::new(
        r"^(?:@([^(^]+?)|([\p{Lu}\d][^\p{Ll}@(^]*?))\s*(\(.*\))?\s*(\^)?$"
    )
    .expect("character pattern");
    pub static ref CHARACTER_EXTENSION: Regex =
        Regex::new(r"\s*\(.*\)\s*$").expect("character extension pattern");

    // 行内样式正则，按标记长度从长到短应用
    pub static ref BOLD_ITALIC: Regex =
        Regex::new(r"\*{3}(.+?)\*{3}").expect("bold italic pattern");
    pub static ref BOLD: Regex = Regex::new(r"\*{2}(.+?)\*{2}").expect("bold pattern");
    pub static ref ITALIC: Regex = Regex::new(r"\*(.+?)\*").expect("italic pattern");
    pub static ref UNDERLINE: Regex = Regex::new(r"_(.+?)_").expect("underline pattern");
    pub static ref EMPHASIS_TAG: Regex = Regex::new(r"</?[biu]>").expect("emphasis tag pattern");

    // 时长估算
    pub static ref NON_SPOKEN: Regex = Regex::new(r"\s|\p{P}|\p{S}").expect("non spoken pattern");
    pub static ref PUNCTUATION: Regex =
        Regex::new(r"([.?!:。？！：])|([,，;；、])").expect("punctuation pattern");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_heading_prefixes() {
        for line in [
            "INT. HOUSE - DAY",
            "ext. park",
            "EST. CITY",
            "I/E CAR",
            "INT./EXT. CAR - MOVING",
            "INT/EXT BARN",
        ] {
            assert!(SCENE_HEADING.is_match(line), "{}", line);
        }
        for line in ["INTERIOR", "EXTRA", "INT", "Estimate the cost."] {
            assert!(!SCENE_HEADING.is_match(line), "{}", line);
        }
    }

    #[test]
    fn character_captures() {
        let caps = CHARACTER.captures("BRICK (V.O.) ^").unwrap();
        assert_eq!(caps.get(2).unwrap().as_str(), "BRICK");
        assert_eq!(caps.get(3).unwrap().as_str(), "(V.O.)");
        assert!(caps.get(4).is_some());

        let caps = CHARACTER.captures("@McCLANE").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "McCLANE");

        assert!(!CHARACTER.is_match("Jane"));
    }

    #[test]
    fn scene_number_suffix() {
        let caps = SCENE_NUMBER.captures("ROOM - DAY #12A#").unwrap();
        assert_eq!(&caps[1], "ROOM - DAY");
        assert_eq!(&caps[2], "12A");
        assert!(!SCENE_NUMBER.is_match("ROOM ##"));
    }
}
