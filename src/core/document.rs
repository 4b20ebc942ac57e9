//! Purpose: Narrow read interface over a parsed query document.
//! Exports: `DocumentView`, `RawDocument`, and `require_*`/`read_*` helpers.
//! Role: The only place that knows the parsed tree is a serde_json object.
//! Invariants: Validators and extractors depend on `DocumentView`, never on serde_json types.
//! Invariants: A missing member is `MissingField`; a member of the wrong type is `InvalidField`.

use crate::core::error::{Error, ErrorKind};
use crate::json::parse;
use serde_json::{Map, Value};

/// Member access on one JSON object level.
pub trait DocumentView {
    fn has_field(&self, name: &str) -> bool;
    fn get_string(&self, name: &str) -> Option<&str>;
    fn get_u64(&self, name: &str) -> Option<u64>;
    fn get_object(&self, name: &str) -> Option<&dyn DocumentView>;
}

impl DocumentView for Map<String, Value> {
    fn has_field(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn get_string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    fn get_u64(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(Value::as_u64)
    }

    fn get_object(&self, name: &str) -> Option<&dyn DocumentView> {
        self.get(name)
            .and_then(Value::as_object)
            .map(|map| map as &dyn DocumentView)
    }
}

/// Root object of a parsed query document. Dropped once extraction finishes.
#[derive(Clone, Debug)]
pub struct RawDocument {
    root: Map<String, Value>,
}

impl RawDocument {
    pub fn parse(text: &str) -> Result<Self, Error> {
        let value: Value = parse::from_str(text).map_err(parse_error)?;
        Self::from_value(value)
    }

    pub fn parse_slice(bytes: &[u8]) -> Result<Self, Error> {
        let value: Value = parse::from_slice(bytes).map_err(parse_error)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(Error::new(ErrorKind::Parse)
                .with_message("query document must be a JSON object")),
        }
    }
}

impl DocumentView for RawDocument {
    fn has_field(&self, name: &str) -> bool {
        self.root.has_field(name)
    }

    fn get_string(&self, name: &str) -> Option<&str> {
        self.root.get_string(name)
    }

    fn get_u64(&self, name: &str) -> Option<u64> {
        self.root.get_u64(name)
    }

    fn get_object(&self, name: &str) -> Option<&dyn DocumentView> {
        self.root.get_object(name)
    }
}

fn parse_error(err: serde_json::Error) -> Error {
    let hint = parse::hint_for_error(&err, "query document");
    Error::new(ErrorKind::Parse)
        .with_message("query document is not valid JSON")
        .with_hint(hint)
        .with_source(err)
}

/// Fails on the first name in `fields` that is not a member of `doc`.
pub fn require_fields(doc: &dyn DocumentView, fields: &[&str]) -> Result<(), Error> {
    match fields.iter().find(|field| !doc.has_field(field)) {
        Some(field) => Err(Error::missing_field(field)),
        None => Ok(()),
    }
}

pub fn read_string<'a>(doc: &'a dyn DocumentView, field: &str) -> Result<&'a str, Error> {
    if !doc.has_field(field) {
        return Err(Error::missing_field(field));
    }
    doc.get_string(field)
        .ok_or_else(|| Error::invalid_field(field, "a string"))
}

pub fn read_u64(doc: &dyn DocumentView, field: &str) -> Result<u64, Error> {
    if !doc.has_field(field) {
        return Err(Error::missing_field(field));
    }
    doc.get_u64(field)
        .ok_or_else(|| Error::invalid_field(field, "an unsigned 64-bit integer"))
}

pub fn read_object<'a>(
    doc: &'a dyn DocumentView,
    field: &str,
) -> Result<&'a dyn DocumentView, Error> {
    if !doc.has_field(field) {
        return Err(Error::missing_field(field));
    }
    doc.get_object(field)
        .ok_or_else(|| Error::invalid_field(field, "an object"))
}
