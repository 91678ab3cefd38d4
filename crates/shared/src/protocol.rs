use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Framework, HistoryId, Tone};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosureRequest {
    pub company_name: String,
    pub sector: String,
    pub year: i32,
    pub frameworks: Vec<Framework>,
    pub metrics: Vec<Metric>,
    pub initiatives: String,
    #[serde(default)]
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosureResponse {
    pub disclosure_text: String,
    #[serde(default)]
    pub improvement_suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
}

impl DisclosureResponse {
    pub fn has_usage(&self) -> bool {
        self.model.is_some()
            || self.prompt_tokens.is_some()
            || self.completion_tokens.is_some()
            || self.total_tokens.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: HistoryId,
    pub company_name: String,
    pub year: i32,
    pub frameworks: Vec<Framework>,
    pub created_at: String,
    pub disclosure_preview: String,
}

impl HistoryItem {
    /// `created_at` parsed as RFC 3339. The raw string stays authoritative for display.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub has_openai_key: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_snake_case_and_wire_enum_names() {
        let request = DisclosureRequest {
            company_name: "Acme".into(),
            sector: "Technology".into(),
            year: 2024,
            frameworks: vec![Framework::Csrd, Framework::Cdp],
            metrics: vec![Metric {
                name: "Scope 1 emissions".into(),
                value: "12000".into(),
                unit: None,
            }],
            initiatives: "Renewables".into(),
            tone: Tone::InvestorFriendly,
        };

        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            json!({
                "company_name": "Acme",
                "sector": "Technology",
                "year": 2024,
                "frameworks": ["CSRD", "CDP"],
                "metrics": [{"name": "Scope 1 emissions", "value": "12000"}],
                "initiatives": "Renewables",
                "tone": "investor_friendly",
            })
        );
    }

    #[test]
    fn response_tolerates_missing_metadata() {
        let response: DisclosureResponse = serde_json::from_value(json!({
            "disclosure_text": "...",
            "improvement_suggestions": ["a", "b"],
        }))
        .expect("deserialize");

        assert_eq!(response.improvement_suggestions, vec!["a", "b"]);
        assert!(!response.has_usage());
    }

    #[test]
    fn response_reads_flat_usage_fields() {
        let response: DisclosureResponse = serde_json::from_value(json!({
            "disclosure_text": "text",
            "improvement_suggestions": [],
            "model": "gpt-4o-mini",
            "prompt_tokens": 120,
            "completion_tokens": 300,
            "total_tokens": 420,
        }))
        .expect("deserialize");

        assert!(response.has_usage());
        assert_eq!(response.total_tokens, Some(420));
    }

    #[test]
    fn history_item_parses_backend_timestamp() {
        let item: HistoryItem = serde_json::from_value(json!({
            "id": 1,
            "company_name": "Acme",
            "year": 2024,
            "frameworks": ["CSRD"],
            "created_at": "2024-01-01T00:00:00.123456Z",
            "disclosure_preview": "...",
        }))
        .expect("deserialize");

        assert_eq!(item.id, HistoryId(1));
        assert_eq!(item.frameworks, vec![Framework::Csrd]);
        assert!(item.created_at_utc().is_some());
    }

    #[test]
    fn unparseable_created_at_is_kept_raw() {
        let item = HistoryItem {
            id: HistoryId(2),
            company_name: "Acme".into(),
            year: 2023,
            frameworks: Vec::new(),
            created_at: "yesterday".into(),
            disclosure_preview: String::new(),
        };
        assert_eq!(item.created_at_utc(), None);
        assert_eq!(item.created_at, "yesterday");
    }
}
