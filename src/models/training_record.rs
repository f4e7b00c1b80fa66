use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Ordered sequence of normalized tokens derived from one text field
pub type Sentence = Vec<String>;

/// Question/answer pair exported from the chatbot training database
///
/// Only `question`, `answer` and `tags` feed the embedding pipeline. The
/// remaining fields are carried by the database export and used when ranking
/// records for similarity lookups. Unknown fields (`_id`, timestamps, ...)
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub question: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub answer: String,

    #[serde(default, deserialize_with = "tags_as_strings")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl TrainingRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            ..Default::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_usage_count(mut self, usage_count: u64) -> Self {
        self.usage_count = Some(usage_count);
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = Some(active);
        self
    }

    /// Records without an explicit flag are active
    pub fn is_active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }

    /// Priority used for ranking, defaulting to 1 like the database schema
    pub fn priority(&self) -> f64 {
        self.priority.unwrap_or(1.0)
    }

    pub fn usage_count(&self) -> u64 {
        self.usage_count.unwrap_or(0)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `null`, and stringifies non-string tag values (numbers, booleans)
fn tags_as_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();

    Ok(values
        .into_iter()
        .filter_map(|value| match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
        .collect())
}
