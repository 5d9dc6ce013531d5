use serde::{Deserialize, Deserializer, Serialize};

/// Structured answer returned to the browser. Fields the model left out stay
/// `None` and are omitted from the JSON body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerRecord {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub chapter: Option<String>,
    #[serde(
        rename = "pageNumber",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub page_number: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub answer: Option<String>,
}

impl AnswerRecord {
    pub fn new(
        chapter: impl Into<String>,
        page_number: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            chapter: Some(chapter.into()),
            page_number: Some(page_number.into()),
            answer: Some(answer.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Raw inputs pulled out of the multipart form before validation.
#[derive(Debug, Clone, Default)]
pub struct AskInput {
    pub file: Option<Vec<u8>>,
    pub file_name: Option<String>,
    pub question: Option<String>,
}

/// Models sometimes emit numbers (`"pageNumber": 14`) or nulls. Anything that
/// is not a string is kept in its JSON text form; null counts as missing.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    })
}
