//! Error types for loading and dispatching config documents.

use std::path::PathBuf;
use thiserror::Error;

use crate::fields::ParseError;

/// Why a config file did not produce a variant.
///
/// None of these are fatal: the store keeps its previous value for the tag
/// and the file is only retried after it changes again.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a valid JSON document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("`dataType` is missing or not a string")]
    MissingTypeTag,

    #[error("no parser registered for data type `{0}`")]
    UnknownTypeTag(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("parser registered for `{expected}` produced `{produced}`")]
    TagMismatch {
        expected: String,
        produced: &'static str,
    },
}

/// Errors from building a [`ParserRegistry`](super::ParserRegistry).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("a parser for data type `{0}` is already registered")]
    DuplicateTag(&'static str),
}
