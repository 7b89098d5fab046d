//! Load one config file and hand it to the parser for its data type.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use super::{LoadError, ParserRegistry};
use crate::configs::Config;
use crate::messages::MessageSink;

/// Loads config documents and dispatches them by `dataType`.
pub struct ConfigDispatcher {
    registry: ParserRegistry,
    sink: Arc<dyn MessageSink>,
}

impl ConfigDispatcher {
    pub fn new(registry: ParserRegistry, sink: Arc<dyn MessageSink>) -> Self {
        Self { registry, sink }
    }

    /// Load `path` and parse it into a config variant.
    ///
    /// Emits one message per step: the load attempt, the identified data type,
    /// and the parse outcome.
    pub fn load(&self, path: &Path) -> Result<Config, LoadError> {
        let friendly = friendly_path(path);
        self.sink
            .info(&format!("loading config file `{friendly}` as JSON"));

        let document = match read_document(path) {
            Ok(document) => document,
            Err(e) => {
                self.sink
                    .error(&format!("failed to load config file `{friendly}`: {e}"));
                return Err(e);
            }
        };

        let Some(data_type) = document.get("dataType").and_then(Value::as_str) else {
            self.sink.error(&format!(
                "config file `{friendly}`: `dataType` is missing or not a string"
            ));
            return Err(LoadError::MissingTypeTag);
        };
        self.sink.success(&format!("data type is `{data_type}`"));

        let Some(parse) = self.registry.get(data_type) else {
            self.sink
                .error(&format!("no parser registered for data type `{data_type}`"));
            return Err(LoadError::UnknownTypeTag(data_type.to_string()));
        };

        match parse(&document) {
            Ok(config) if config.data_type() != data_type => {
                let err = LoadError::TagMismatch {
                    expected: data_type.to_string(),
                    produced: config.data_type(),
                };
                self.sink.error(&format!("config file `{friendly}`: {err}"));
                Err(err)
            }
            Ok(config) => {
                self.sink
                    .success(&format!("parsed data type `{data_type}`"));
                crate::debug_event!("dispatch", "parsed", "{data_type} from {friendly}");
                Ok(config)
            }
            Err(e) => {
                self.sink
                    .error(&format!("failed to parse data type `{data_type}`: {e}"));
                Err(e.into())
            }
        }
    }
}

fn read_document(path: &Path) -> Result<Value, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// `path` relative to the working directory when it lies beneath it.
pub fn friendly_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::{CircleObject, ConfigKind};
    use crate::fields::{FieldError, ParseError};
    use crate::messages::{RecordingSink, Severity};
    use tempfile::TempDir;

    fn dispatcher() -> (ConfigDispatcher, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        (
            ConfigDispatcher::new(ParserRegistry::builtin(), sink.clone()),
            sink,
        )
    }

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_circle() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "circle.json",
            r#"{
                "dataType": "circleObject",
                "center": { "type": "Vec2", "x": 3, "y": 4 },
                "radius": { "type": "double", "value": 5 }
            }"#,
        );

        let (dispatcher, sink) = dispatcher();
        let config = dispatcher.load(&path).unwrap();
        let circle = CircleObject::narrow(&config).unwrap();
        assert_eq!((circle.center.x, circle.center.y), (3.0, 4.0));
        assert_eq!(circle.radius, 5.0);

        assert!(sink.contains(Severity::Info, "circle.json"));
        assert!(sink.contains(Severity::Success, "data type is `circleObject`"));
        assert!(sink.contains(Severity::Success, "parsed data type `circleObject`"));
        assert!(sink.texts(Severity::Error).is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "broken.json", r#"{ "dataType": "circleObject", "#);

        let (dispatcher, sink) = dispatcher();
        let err = dispatcher.load(&path).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDocument(_)));
        assert_eq!(sink.texts(Severity::Error).len(), 1);
    }

    #[test]
    fn test_missing_type_tag() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "untagged.json", r#"{ "radius": { "type": "double", "value": 1 } }"#);

        let (dispatcher, _) = dispatcher();
        assert!(matches!(dispatcher.load(&path), Err(LoadError::MissingTypeTag)));
    }

    #[test]
    fn test_non_string_or_non_object_tag() {
        let dir = TempDir::new().unwrap();
        let numeric = write(&dir, "numeric.json", r#"{ "dataType": 4 }"#);
        let array = write(&dir, "array.json", r#"[1, 2, 3]"#);

        let (dispatcher, _) = dispatcher();
        assert!(matches!(dispatcher.load(&numeric), Err(LoadError::MissingTypeTag)));
        assert!(matches!(dispatcher.load(&array), Err(LoadError::MissingTypeTag)));
    }

    #[test]
    fn test_unknown_type_tag() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "unknown.json", r#"{ "dataType": "doesNotExist" }"#);

        let (dispatcher, sink) = dispatcher();
        match dispatcher.load(&path) {
            Err(LoadError::UnknownTypeTag(tag)) => assert_eq!(tag, "doesNotExist"),
            other => panic!("expected UnknownTypeTag, got {other:?}"),
        }
        assert!(sink.contains(Severity::Error, "doesNotExist"));
    }

    #[test]
    fn test_parse_error_names_field() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "background.json",
            r#"{ "dataType": "solidColorBackground", "color": { "type": "ColorF", "r": 1, "g": 0 } }"#,
        );

        let (dispatcher, sink) = dispatcher();
        let Err(LoadError::Parse(err)) = dispatcher.load(&path) else {
            panic!("expected a parse error");
        };
        assert_eq!(err.failure("color"), Some(&FieldError::MissingKey { key: "b" }));
        assert!(sink.contains(Severity::Error, "color"));
    }

    #[test]
    fn test_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let (dispatcher, _) = dispatcher();
        let err = dispatcher.load(&dir.path().join("gone.json")).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[test]
    fn test_tag_mismatch_is_rejected() {
        fn wrong(_: &Value) -> Result<Config, ParseError> {
            Ok(CircleObject {
                center: Default::default(),
                radius: 1.0,
            }
            .into_config())
        }

        let dir = TempDir::new().unwrap();
        let path = write(&dir, "custom.json", r#"{ "dataType": "custom" }"#);

        let mut registry = ParserRegistry::new();
        registry.register("custom", wrong).unwrap();
        let dispatcher = ConfigDispatcher::new(registry, Arc::new(RecordingSink::new()));

        assert!(matches!(
            dispatcher.load(&path),
            Err(LoadError::TagMismatch { produced: "circleObject", .. })
        ));
    }

    #[test]
    fn test_friendly_path_outside_cwd_is_unchanged() {
        let path = Path::new("/definitely/not/under/cwd.json");
        assert_eq!(friendly_path(path), "/definitely/not/under/cwd.json");
    }
}
