//! Value (Label Studio) export models
//!
//! A value export is a JSON array of tasks, one per page. Each task carries zero or
//! more annotations, each with a list of result records. Result records are kept as
//! raw JSON here; [`ResultRecord`] is the view the indexer reads them through.

use crate::domain::{LabelFuseError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::path::Path;

/// Nested task data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskData {
    #[serde(default)]
    pub image: Option<String>,
}

/// One annotator's work on a task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskAnnotation {
    #[serde(default)]
    pub result: Option<Vec<Value>>,
}

/// One page of the value export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelStudioTask {
    #[serde(default)]
    pub file_upload: Option<String>,

    #[serde(default)]
    pub data: Option<TaskData>,

    #[serde(default)]
    pub annotations: Option<Vec<TaskAnnotation>>,
}

impl LabelStudioTask {
    /// Filename of the page: `file_upload`, else `data.image`, ignoring empty strings
    pub fn filename(&self) -> Option<&str> {
        let upload = self.file_upload.as_deref().filter(|s| !s.is_empty());
        upload.or_else(|| {
            self.data
                .as_ref()
                .and_then(|d| d.image.as_deref())
                .filter(|s| !s.is_empty())
        })
    }

    /// All result records of all annotations, in export order
    pub fn results(&self) -> impl Iterator<Item = &Value> {
        self.annotations
            .iter()
            .flatten()
            .filter_map(|a| a.result.as_ref())
            .flatten()
    }
}

/// Parsed value export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueExport {
    pub tasks: Vec<LabelStudioTask>,
}

impl ValueExport {
    /// Builds the export from an already parsed JSON document
    ///
    /// # Errors
    ///
    /// Returns `MalformedExport` if the root is not an array or a task has a
    /// mistyped field.
    pub fn from_value(path: &Path, document: &Value) -> Result<Self> {
        let items = document.as_array().ok_or_else(|| {
            LabelFuseError::malformed(path, "<root>", "expected an array of tasks")
        })?;

        let tasks = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                LabelStudioTask::deserialize(item).map_err(|e| {
                    LabelFuseError::malformed(path, format!("tasks[{i}]"), e.to_string())
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { tasks })
    }
}

/// Read-only view of a raw result record
///
/// Every accessor reads one key and falls back on its own, so a mistyped field
/// only loses that field. Payload accessors read from the nested `value` object.
#[derive(Debug, Clone, Copy)]
pub struct ResultRecord<'a> {
    record: &'a Map<String, Value>,
}

impl<'a> ResultRecord<'a> {
    /// Wraps a raw record; `None` when it is not a JSON object
    pub fn from_raw(raw: &'a Value) -> Option<Self> {
        raw.as_object().map(|record| Self { record })
    }

    /// The `type` discriminator
    pub fn kind(&self) -> Option<&'a str> {
        self.record.get("type").and_then(Value::as_str)
    }

    /// The `from_name` discriminator
    pub fn from_name(&self) -> Option<&'a str> {
        self.record.get("from_name").and_then(Value::as_str)
    }

    /// Record-level resolution field such as `original_width`
    pub fn record_dimension(&self, key: &str) -> Option<u32> {
        self.record.get(key).and_then(as_dimension)
    }

    fn payload(&self, key: &str) -> Option<&'a Value> {
        self.record.get("value")?.as_object()?.get(key)
    }

    /// Numeric payload field; absent or non-numeric reads as `None`
    pub fn float(&self, key: &str) -> Option<f64> {
        self.payload(key).and_then(Value::as_f64)
    }

    /// `value.number` exactly as the export wrote it
    pub fn number(&self) -> Option<Number> {
        match self.payload("number") {
            Some(Value::Number(n)) => Some(n.clone()),
            _ => None,
        }
    }

    /// Payload resolution field such as `original_width`
    pub fn dimension(&self, key: &str) -> Option<u32> {
        self.payload(key).and_then(as_dimension)
    }

    /// String entries of a payload list; non-string entries are skipped
    pub fn strings(&self, key: &str) -> Vec<String> {
        self.payload(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First entry of a payload list when it is a string
    pub fn first_string(&self, key: &str) -> Option<&'a str> {
        self.payload(key)
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .and_then(Value::as_str)
    }
}

/// Pixel dimension; integral floats such as `2550.0` are accepted
fn as_dimension(value: &Value) -> Option<u32> {
    let whole = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= f64::from(u32::MAX))
            .map(|f| f as u64)
    })?;
    u32::try_from(whole).ok()
}
