use crate::dates::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub const DEFAULT_QUALITY: i64 = 3;

/// What a practice session concentrated on.
///
/// Unknown tags are kept verbatim so older or hand-edited records still
/// display what the archer wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Form,
    Accuracy,
    Distance,
    Tuning,
    Mental,
    Other(String),
}

impl Focus {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "form" => Self::Form,
            "accuracy" => Self::Accuracy,
            "distance" => Self::Distance,
            "tuning" => Self::Tuning,
            "mental" => Self::Mental,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Form => "form",
            Self::Accuracy => "accuracy",
            Self::Distance => "distance",
            Self::Tuning => "tuning",
            Self::Mental => "mental",
            Self::Other(tag) => tag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Form => "Form & posture",
            Self::Accuracy => "Accuracy & grouping",
            Self::Distance => "Long range practice",
            Self::Tuning => "Equipment tuning",
            Self::Mental => "Mental reps & visualization",
            Self::Other(tag) => tag,
        }
    }
}

impl Serialize for Focus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Focus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(tag) if !tag.is_empty() => Self::from_tag(&tag),
            _ => Self::default(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResourceCategory {
    #[default]
    Article,
    Video,
    Equipment,
    Community,
    Other(String),
}

impl ResourceCategory {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "article" => Self::Article,
            "video" => Self::Video,
            "equipment" => Self::Equipment,
            "community" => Self::Community,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Article => "article",
            Self::Video => "video",
            Self::Equipment => "equipment",
            Self::Community => "community",
            Self::Other(tag) => tag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Article => "Article / Guide",
            Self::Video => "Video / Webinar",
            Self::Equipment => "Equipment Research",
            Self::Community => "Community & Coaching",
            Self::Other(tag) => tag,
        }
    }
}

impl Serialize for ResourceCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResourceCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(tag) if !tag.is_empty() => Self::from_tag(&tag),
            _ => Self::default(),
        })
    }
}

/// One logged practice day. At most one session exists per `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(default)]
    pub focus: Focus,
    #[serde(default, deserialize_with = "lenient_count")]
    pub arrows: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub bullseyes: u64,
    #[serde(default = "default_quality", deserialize_with = "lenient_quality")]
    pub quality: i64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub notes: String,
}

impl Session {
    pub fn practice_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Trims the free-text fields the way the log form submits them.
    pub fn normalized(mut self) -> Self {
        self.date = self.date.trim().to_string();
        self.location = self.location.trim().to_string();
        self.notes = self.notes.trim().to_string();
        self
    }
}

impl Default for Session {
    fn default() -> Self {
        Self {
            date: String::new(),
            location: String::new(),
            focus: Focus::default(),
            arrows: 0,
            bullseyes: 0,
            quality: DEFAULT_QUALITY,
            notes: String::new(),
        }
    }
}

/// A saved learning link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: String,
    #[serde(default)]
    pub category: ResourceCategory,
    #[serde(default, deserialize_with = "lenient_text")]
    pub notes: String,
    /// Epoch milliseconds.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub added: i64,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_sessions: usize,
    pub total_bullseyes: u64,
    pub monthly_sessions: usize,
    pub current_streak: usize,
    pub longest_streak: usize,
    pub streak_dates: Vec<NaiveDate>,
    pub longest_streak_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Motivation {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: Stats,
    pub motivation: Motivation,
    pub streak_message: String,
    pub streak_summary: String,
}

#[derive(Debug, Serialize)]
pub struct SavedSessionResponse {
    pub session: Session,
    pub replaced: bool,
    pub stats: Stats,
}

#[derive(Debug, Deserialize)]
pub struct NewResourceRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: String,
    #[serde(default)]
    pub category: ResourceCategory,
    #[serde(default, deserialize_with = "lenient_text")]
    pub notes: String,
}

#[derive(Debug, Serialize)]
pub struct ResourceView {
    #[serde(flatten)]
    pub resource: Resource,
    pub category_label: String,
    pub spotlighted: bool,
}

#[derive(Debug, Deserialize)]
pub struct ResourceQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub month: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PromptsResponse {
    pub prompts: Vec<&'static str>,
}

fn default_quality() -> i64 {
    DEFAULT_QUALITY
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    })
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(coerce_count(&Value::deserialize(deserializer)?).unwrap_or(0))
}

fn lenient_quality<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(coerce_integer(&Value::deserialize(deserializer)?)
        .filter(|quality| *quality != 0)
        .unwrap_or(DEFAULT_QUALITY))
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(coerce_integer(&Value::deserialize(deserializer)?).unwrap_or(0))
}

/// Numeric JSON values and numeric strings; fractions truncate toward zero.
fn coerce_integer(value: &Value) -> Option<i64> {
    let float = match value {
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                return Some(integer);
            }
            number.as_f64()?
        }
        Value::String(text) => {
            let text = text.trim();
            if let Ok(integer) = text.parse::<i64>() {
                return Some(integer);
            }
            text.parse::<f64>().ok()?
        }
        _ => return None,
    };
    float.is_finite().then(|| float.trunc() as i64)
}

fn coerce_count(value: &Value) -> Option<u64> {
    coerce_integer(value).and_then(|count| u64::try_from(count).ok())
}
