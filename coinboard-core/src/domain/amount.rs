//! Numbers as the endpoint sent them.
//!
//! The endpoint writes `"67321.10"` and `"1.00"`; parsing to `f64` alone would
//! print them back as `67321.1` and `1`. An [`Amount`] keeps the received text
//! for display, search and export, and the parsed value for sorting and charts.

use std::fmt;
use std::num::ParseFloatError;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub struct Amount {
    value: f64,
    text: String,
}

impl Amount {
    /// An amount with no source text; the text is the value's shortest form.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            text: value.to_string(),
        }
    }

    /// Parse `text`, keeping it verbatim. Surrounding whitespace is ignored
    /// by the parse only.
    pub fn parse(text: &str) -> Result<Self, ParseFloatError> {
        let value = text.trim().parse()?;
        Ok(Self {
            value,
            text: text.to_string(),
        })
    }

    /// A field the endpoint sent as `""` or `null`. Sorts as zero, renders empty.
    pub fn blank() -> Self {
        Self {
            value: 0.0,
            text: String::new(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.text)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
            Null,
        }

        match Raw::deserialize(d)? {
            Raw::Number(n) => Ok(Amount::new(n)),
            Raw::Text(s) if s.trim().is_empty() => Ok(Amount::blank()),
            Raw::Text(s) => Amount::parse(&s)
                .map_err(|e| serde::de::Error::custom(format!("invalid number {s:?}: {e}"))),
            Raw::Null => Ok(Amount::blank()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_source_text() {
        let a: Amount = serde_json::from_str(r#""67321.10""#).unwrap();
        assert_eq!(a.value(), 67321.1);
        assert_eq!(a.as_str(), "67321.10");
        assert_eq!(a.to_string(), "67321.10");
    }

    #[test]
    fn json_numbers_use_shortest_form() {
        let a: Amount = serde_json::from_str("28736491234.12").unwrap();
        assert_eq!(a.as_str(), "28736491234.12");
        let b: Amount = serde_json::from_str("1").unwrap();
        assert_eq!(b.as_str(), "1");
    }

    #[test]
    fn blank_and_null_are_blank() {
        for json in [r#""""#, r#""  ""#, "null"] {
            let a: Amount = serde_json::from_str(json).unwrap();
            assert!(a.is_blank(), "{json}");
            assert_eq!(a.value(), 0.0);
        }
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(serde_json::from_str::<Amount>(r#""12abc""#).is_err());
    }

    #[test]
    fn serializes_as_received() {
        let a = Amount::parse("1.00").unwrap();
        assert_eq!(serde_json::to_string(&a).unwrap(), r#""1.00""#);
    }
}
