use crate::config::ScoringConfiguration;
use crate::consts::{MISS_LABEL, X_LABEL};
use crate::error::{QuiverError, QvResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A keypad tap as it arrives from the UI, before it is checked against any rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "EventValue", into = "EventValue")]
pub enum RawArrow {
    X,
    Miss,
    Points(u32),
    /// Backspace: clears the slot.
    Unset,
}

/// Stored value of a filled slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shot {
    X,
    Hit(u32),
    Miss,
}

impl Shot {
    #[inline(always)]
    pub fn points(&self, config: &ScoringConfiguration) -> u32 {
        match self {
            Shot::X => config.x_value,
            Shot::Hit(p) => *p,
            Shot::Miss => 0,
        }
    }

    #[inline(always)]
    pub fn is_x(&self) -> bool {
        matches!(self, Shot::X)
    }

    pub fn label(&self) -> String {
        match self {
            Shot::X => X_LABEL.to_string(),
            Shot::Hit(p) => p.to_string(),
            Shot::Miss => MISS_LABEL.to_string(),
        }
    }
}

impl fmt::Display for Shot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for RawArrow {
    type Err = QuiverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "-" {
            return Ok(RawArrow::Unset);
        }
        if s.eq_ignore_ascii_case(X_LABEL) {
            return Ok(RawArrow::X);
        }
        if s.eq_ignore_ascii_case(MISS_LABEL) {
            return Ok(RawArrow::Miss);
        }
        s.parse::<u32>()
            .map(RawArrow::Points)
            .map_err(|_| QuiverError::InvalidInput(format!("Unrecognised arrow value '{}'", s)))
    }
}

impl fmt::Display for RawArrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawArrow::X => f.write_str(X_LABEL),
            RawArrow::Miss => f.write_str(MISS_LABEL),
            RawArrow::Points(p) => write!(f, "{}", p),
            RawArrow::Unset => Ok(()),
        }
    }
}

impl From<Shot> for RawArrow {
    fn from(shot: Shot) -> Self {
        match shot {
            Shot::X => RawArrow::X,
            Shot::Hit(p) => RawArrow::Points(p),
            Shot::Miss => RawArrow::Miss,
        }
    }
}

/// JSON form of an event value: `"X"`, `"M"`, an integer, or `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventValue {
    Number(i64),
    Text(String),
    Null,
}

impl TryFrom<EventValue> for RawArrow {
    type Error = QuiverError;

    fn try_from(value: EventValue) -> QvResult<Self> {
        match value {
            EventValue::Number(n) => u32::try_from(n)
                .map(RawArrow::Points)
                .map_err(|_| QuiverError::InvalidInput(format!("Arrow value {} out of range", n))),
            EventValue::Text(s) => s.parse(),
            EventValue::Null => Ok(RawArrow::Unset),
        }
    }
}

impl From<RawArrow> for EventValue {
    fn from(raw: RawArrow) -> Self {
        match raw {
            RawArrow::Points(p) => EventValue::Number(p as i64),
            RawArrow::Unset => EventValue::Null,
            other => EventValue::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keypad_labels() {
        assert_eq!("X".parse::<RawArrow>().unwrap(), RawArrow::X);
        assert_eq!("x".parse::<RawArrow>().unwrap(), RawArrow::X);
        assert_eq!(" m ".parse::<RawArrow>().unwrap(), RawArrow::Miss);
        assert_eq!("9".parse::<RawArrow>().unwrap(), RawArrow::Points(9));
        assert_eq!("".parse::<RawArrow>().unwrap(), RawArrow::Unset);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("ten".parse::<RawArrow>().is_err());
        assert!("-3".parse::<RawArrow>().is_err());
    }

    #[test]
    fn test_json_event_values() {
        let values: Vec<RawArrow> = serde_json::from_str(r#"["X", "M", 7, null, ""]"#).unwrap();
        assert_eq!(
            values,
            vec![
                RawArrow::X,
                RawArrow::Miss,
                RawArrow::Points(7),
                RawArrow::Unset,
                RawArrow::Unset
            ]
        );

        let out = serde_json::to_string(&vec![RawArrow::X, RawArrow::Points(10), RawArrow::Unset])
            .unwrap();
        assert_eq!(out, r#"["X",10,null]"#);
    }

    #[test]
    fn test_negative_json_number_is_rejected() {
        let res: Result<RawArrow, _> = serde_json::from_str("-1");
        assert!(res.is_err());
    }
}
