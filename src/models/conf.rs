use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conf {
    /// 是否识别双对话；关闭时 `^` 仍会被去掉
    pub use_dual_dialogue: bool,
    /// HTML 预览中是否以注释形式输出 note
    pub print_notes: bool,
    /// 对白中每字符耗时预估(不含标点)
    pub dial_sec_per_char: f64,
    /// 对白中每个短标点耗时预估(逗号顿号等)
    pub dial_sec_per_punc_short: f64,
    /// 对白中每个长标点耗时预估(句号问号等)
    pub dial_sec_per_punc_long: f64,
    /// action文本中每字符转化成影片时长预估(不含标点)
    pub action_sec_per_char: f64,
}

impl Default for Conf {
    fn default() -> Self {
        Conf {
            use_dual_dialogue: true,
            print_notes: false,
            dial_sec_per_char: 0.3,
            dial_sec_per_punc_short: 0.3,
            dial_sec_per_punc_long: 0.75,
            action_sec_per_char: 0.4,
        }
    }
}

impl Conf {
    /// Parses a (possibly partial) JSON object; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let conf: Conf = serde_json::from_str(json)?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let timings = [
            ("dial_sec_per_char", self.dial_sec_per_char),
            ("dial_sec_per_punc_short", self.dial_sec_per_punc_short),
            ("dial_sec_per_punc_long", self.dial_sec_per_punc_long),
            ("action_sec_per_char", self.action_sec_per_char),
        ];
        for (field, value) in timings {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a non-negative number of seconds, got {}", value),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let conf = Conf::from_json(r#"{ "use_dual_dialogue": false }"#).unwrap();
        assert!(!conf.use_dual_dialogue);
        assert_eq!(conf.dial_sec_per_char, 0.3);
        assert_eq!(conf.action_sec_per_char, 0.4);
    }

    #[test]
    fn rejects_negative_timings() {
        let err = Conf::from_json(r#"{ "action_sec_per_char": -1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "action_sec_per_char",
                ..
            }
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(Conf::from_json("{"), Err(ConfigError::Json(_))));
    }
}
