//! Course record, extraction schema and progress events

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use std::time::Duration;

/// Instruction sent with every extraction request
pub const EXTRACTION_PROMPT: &str = "Extract full details of this course: course name, level, \
     fees (UK and International if available), intake / year of entry, entry requirements, \
     full description, duration. Return a structured object with these fields.";

/// JSON schema of one course, as requested from the extraction API
#[must_use]
pub fn extraction_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "course_name": {"type": "string"},
            "level": {"type": "string"},
            "fees": {"type": "string"},
            "intake_date": {"type": "string"},
            "requirements": {"type": "string"},
            "description": {"type": "string"},
            "duration": {"type": "string"}
        },
        "required": ["course_name"]
    })
}

/// Structured details of one course
///
/// Values the API returns as numbers or other non-string JSON are kept as
/// their JSON text; unknown keys are carried through in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub course_name: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub fees: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub intake_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub requirements: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub duration: Option<String>,
    /// Detail page the record was extracted from
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub source_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CourseRecord {
    /// Build a record from one API object, tagging it with its page
    pub fn from_object(mut object: Map<String, Value>, source_url: &str) -> serde_json::Result<Self> {
        object.insert("source_url".to_string(), Value::String(source_url.to_string()));
        serde_json::from_value(Value::Object(object))
    }

    /// Identity used for deduplication; `None` for unnamed records
    #[must_use]
    pub fn dedupe_key(&self) -> Option<String> {
        let key = self.course_name.trim().to_lowercase();
        (!key.is_empty()).then_some(key)
    }
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

/// Progress of a detail-extraction run, one per notable step
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionEvent {
    /// Extraction of URL `index` of `total` (1-based) has started
    Started { index: usize, total: usize, url: String },
    /// A course was extracted
    Record(CourseRecord),
    /// The call exceeded its bound and was abandoned
    Timeout { url: String, limit: Duration },
    /// The call failed
    Failed { url: String, message: String },
    /// The call succeeded without data
    Empty { url: String },
}

impl fmt::Display for ExtractionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { index, total, url } => write!(f, "[{index}/{total}] Extracting from {url}"),
            Self::Record(record) => write!(
                f,
                "Extracted '{}' from {}",
                record.course_name,
                record.source_url.as_deref().unwrap_or("unknown page")
            ),
            Self::Timeout { url, limit } => {
                write!(f, "Timeout extracting {url} ({}s limit)", limit.as_secs())
            }
            Self::Failed { url, message } => write!(f, "Error extracting {url}: {message}"),
            Self::Empty { url } => write!(f, "No data for {url}"),
        }
    }
}
