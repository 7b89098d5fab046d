//! The closed family of config kinds that documents can describe.
//!
//! Each kind declares a unique data type tag and a parse function. The
//! [`Config`] enum is the only way variants travel through the dispatcher and
//! the store, so narrowing a stored value back to its concrete kind is a match
//! rather than a runtime type check.

mod background;
mod circle;

pub use background::SolidColorBackground;
pub use circle::CircleObject;
pub use print_test::PrintTest;

use serde::Serialize;
use serde_json::Value;

use crate::fields::ParseError;

/// One fully parsed config value of a known kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "dataType")]
pub enum Config {
    #[serde(rename = "solidColorBackground")]
    SolidColorBackground(SolidColorBackground),
    #[serde(rename = "circleObject")]
    CircleObject(CircleObject),
    #[serde(rename = "printTest")]
    PrintTest(PrintTest),
}

impl Config {
    /// Data type tag of the contained kind.
    pub fn data_type(&self) -> &'static str {
        match self {
            Config::SolidColorBackground(_) => SolidColorBackground::DATA_TYPE,
            Config::CircleObject(_) => CircleObject::DATA_TYPE,
            Config::PrintTest(_) => PrintTest::DATA_TYPE,
        }
    }
}

/// A concrete config kind.
///
/// `narrow` must only return `Some` for the variant built by `into_config`,
/// and `DATA_TYPE` must be unique among all kinds.
pub trait ConfigKind: Sized {
    /// Tag stored in a document's top-level `dataType` field.
    const DATA_TYPE: &'static str;

    /// Build the kind from a document whose `dataType` matched.
    fn parse(document: &Value) -> Result<Self, ParseError>;

    fn into_config(self) -> Config;

    fn narrow(config: &Config) -> Option<&Self>;

    /// Parse straight into the sum type. Usable as a registry parse function.
    fn parse_config(document: &Value) -> Result<Config, ParseError> {
        Self::parse(document).map(Self::into_config)
    }
}

/// Tags of every built-in kind.
pub const BUILTIN_DATA_TYPES: [&str; 3] = [
    SolidColorBackground::DATA_TYPE,
    CircleObject::DATA_TYPE,
    PrintTest::DATA_TYPE,
];
