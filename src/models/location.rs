use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref LOCATION_TIME_SPLIT: Regex =
        Regex::new(r"^(.*?)[\-–—−](.*)$").expect("location split pattern");
}

/// 场景地点信息，从场景标题拆出
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub name: String,
    pub interior: bool,
    pub exterior: bool,
    pub time_of_day: String,
}

impl Location {
    pub fn new(name: String, interior: bool, exterior: bool, time_of_day: String) -> Self {
        Location {
            name,
            interior,
            exterior,
            time_of_day,
        }
    }

    /// Builds the location of a heading from its prefix (`INT`, `EXT`, `I/E`, ...)
    /// and the heading text that followed it.
    ///
    /// The name and time of day split on the first dash; both are upper-cased
    /// with whitespace runs normalized.
    pub fn from_heading(prefix: Option<&str>, text: &str) -> Self {
        let prefix = prefix.unwrap_or("").to_uppercase();
        let interior = prefix.contains('I');
        let exterior = prefix.contains("EX") || prefix.contains("/E");

        let (name, time) = match LOCATION_TIME_SPLIT.captures(text) {
            Some(caps) => (
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
            ),
            None => (text, ""),
        };

        Location::new(normalize(name), interior, exterior, normalize(time))
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
