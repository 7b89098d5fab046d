use serde::Serialize;
use serde_json::Value;

use super::{Config, ConfigKind};
use crate::fields::{FieldCollector, ParseError, read_color};
use crate::types::ColorF;

/// Fills the scene with a single colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolidColorBackground {
    pub color: ColorF,
}

impl ConfigKind for SolidColorBackground {
    const DATA_TYPE: &'static str = "solidColorBackground";

    fn parse(document: &Value) -> Result<Self, ParseError> {
        let mut fields = FieldCollector::new(document, Self::DATA_TYPE);

        match fields.read("color", read_color) {
            Some(color) => Ok(Self { color }),
            None => Err(fields.into_error()),
        }
    }

    fn into_config(self) -> Config {
        Config::SolidColorBackground(self)
    }

    fn narrow(config: &Config) -> Option<&Self> {
        match config {
            Config::SolidColorBackground(background) => Some(background),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldError;
    use serde_json::json;

    #[test]
    fn test_parse_background() {
        let doc = json!({
            "dataType": "solidColorBackground",
            "color": { "type": "ColorF", "r": 0.6, "g": 0.8, "b": 0.7 }
        });

        let background = SolidColorBackground::parse(&doc).unwrap();
        assert_eq!(background.color, ColorF::opaque(0.6, 0.8, 0.7));
    }

    #[test]
    fn test_missing_blue_channel_names_the_field() {
        let doc = json!({
            "dataType": "solidColorBackground",
            "color": { "type": "ColorF", "r": 1, "g": 1 }
        });

        let err = SolidColorBackground::parse(&doc).unwrap_err();
        assert_eq!(err.failed_fields(), vec!["color"]);
        assert_eq!(err.failure("color"), Some(&FieldError::MissingKey { key: "b" }));
    }
}
