use serde::Serialize;
use serde_json::Value;

use super::{Config, ConfigKind};
use crate::fields::{FieldCollector, ParseError, read_double, read_vec2};
use crate::types::Vec2;

/// A circle drawn at `center` with `radius`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircleObject {
    pub center: Vec2,
    pub radius: f64,
}

impl ConfigKind for CircleObject {
    const DATA_TYPE: &'static str = "circleObject";

    fn parse(document: &Value) -> Result<Self, ParseError> {
        let mut fields = FieldCollector::new(document, Self::DATA_TYPE);
        let center = fields.read("center", read_vec2);
        let radius = fields.read("radius", read_double);

        match (center, radius) {
            (Some(center), Some(radius)) => Ok(Self { center, radius }),
            _ => Err(fields.into_error()),
        }
    }

    fn into_config(self) -> Config {
        Config::CircleObject(self)
    }

    fn narrow(config: &Config) -> Option<&Self> {
        match config {
            Config::CircleObject(circle) => Some(circle),
            _ => None,
        }
    }
}
