//! Description-file model for transformations
//!
//! A description document lists stages as maps from parameter names (short
//! codes or descriptive long names) to scalar values. Variable bindings use
//! their `$name` key directly. JSON5 is accepted, so documents may carry
//! comments and trailing commas.
//!
//! ```json5
//! {
//!   stages: [
//!     { width: 100, height: 101, crop: "crop" },
//!     { crop: "fill", gravity: "north" }, // applied second
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::transformation::{Param, Transformation};

/// Error type for description-file failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DocError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("stage {stage}: unknown parameter '{name}'")]
    UnknownParam { stage: usize, name: String },
    #[error("stage {stage}: unsupported value for '{name}' (expected string, number, or bool)")]
    UnsupportedValue { stage: usize, name: String },
}

/// One stage: parameter name to scalar value. `BTreeMap` keeps doc
/// round-trips deterministic; serialization order is decided at render
/// time anyway.
pub type StageDoc = BTreeMap<String, Value>;

/// A transformation description document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TransformationDoc {
    pub stages: Vec<StageDoc>,
}

/// Parse a JSON5 description document.
pub fn parse_doc(text: &str) -> Result<TransformationDoc, DocError> {
    json5::from_str(text).map_err(|e| DocError::Parse(e.to_string()))
}

/// Convert a value to its parameter string form.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Build a [`Transformation`] from a parsed document.
///
/// Parameter names resolve through [`Param::from_name`]; `$`-prefixed keys
/// pass through as variable bindings.
pub fn to_transformation(doc: &TransformationDoc) -> Result<Transformation, DocError> {
    let mut t = Transformation::new();
    for (index, stage) in doc.stages.iter().enumerate() {
        if index > 0 {
            t = t.chain();
        }
        for (name, value) in stage {
            let value = scalar(value).ok_or_else(|| DocError::UnsupportedValue {
                stage: index,
                name: name.clone(),
            })?;
            if name.starts_with('$') {
                t = t.param(name, value);
            } else {
                let param = Param::from_name(name).ok_or_else(|| DocError::UnknownParam {
                    stage: index,
                    name: name.clone(),
                })?;
                t = t.set(param, value);
            }
        }
    }
    Ok(t)
}
