use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

/// One right-hand side of a front-matter assignment.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Date(NaiveDate),
    List(Vec<String>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<Vec<String>> for Value {
    fn from(l: Vec<String>) -> Self {
        Value::List(l)
    }
}

pub type Metadata = BTreeMap<String, Value>;

/// A parsed post: its front matter and the untouched text after it.
///
/// Built once by the parser and read-only afterwards.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Post {
    metadata: Metadata,
    body: String,
}

impl Post {
    pub fn new(metadata: Metadata, body: impl Into<String>) -> Self {
        Self {
            metadata,
            body: body.into(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }

    /// Tags from `tags`, or from a `[taxonomies]` table.
    pub fn tags(&self) -> &[String] {
        self.get("tags")
            .or_else(|| self.get("taxonomies.tags"))
            .and_then(Value::as_list)
            .unwrap_or_default()
    }

    /// The `date` key as a calendar date. Quoted `YYYY-MM-DD` strings count too.
    pub fn date(&self) -> Option<NaiveDate> {
        match self.get("date")? {
            Value::Date(d) => Some(*d),
            Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
            Value::List(_) => None,
        }
    }

    pub fn into_parts(self) -> (Metadata, String) {
        (self.metadata, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(entries: &[(&str, Value)]) -> Post {
        let metadata = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Post::new(metadata, "")
    }

    #[test]
    fn test_date_accepts_quoted_string() {
        let p = post(&[("date", "2020-02-29".into())]);
        assert_eq!(p.date(), NaiveDate::from_ymd_opt(2020, 2, 29));
    }

    #[test]
    fn test_date_rejects_garbage_string() {
        let p = post(&[("date", "someday".into())]);
        assert_eq!(p.date(), None);

        let (metadata, body) = p.into_parts();
        assert_eq!(metadata["date"], Value::from("someday"));
        assert!(body.is_empty());
    }

    #[test]
    fn test_tags_falls_back_to_taxonomies() {
        let tags = vec!["rust".to_string()];
        let p = post(&[("taxonomies.tags", tags.clone().into())]);
        assert_eq!(p.tags(), tags.as_slice());
        assert!(post(&[]).tags().is_empty());
    }

    #[test]
    fn test_value_serializes_untagged() {
        let p = post(&[
            ("date", NaiveDate::from_ymd_opt(2023, 1, 5).unwrap().into()),
            ("tags", vec!["a".to_string(), "b".to_string()].into()),
            ("title", "Hi".into()),
        ]);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "metadata": { "date": "2023-01-05", "tags": ["a", "b"], "title": "Hi" },
                "body": ""
            })
        );
    }
}
