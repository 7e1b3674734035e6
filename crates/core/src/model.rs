use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operational failure category assigned to an error report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    /// A call between services exceeded its deadline.
    #[serde(rename = "network/timeout")]
    NetworkTimeout,
    /// The target host actively refused the connection.
    #[serde(rename = "network/connection_refused")]
    NetworkConnectionRefused,
    /// A downstream dependency reported itself unavailable (503).
    #[serde(rename = "dependency/unavailable")]
    DependencyUnavailable,
    /// Authentication or authorization was rejected (401/403).
    #[serde(rename = "auth/permission")]
    AuthPermission,
    /// The process ran out of memory.
    #[serde(rename = "runtime/memory")]
    RuntimeMemory,
    /// A module or package could not be resolved at runtime.
    #[serde(rename = "runtime/dependency")]
    RuntimeDependency,
    /// Source or artifact failed to parse.
    #[serde(rename = "runtime/syntax")]
    RuntimeSyntax,
    /// Not enough signal to classify.
    #[serde(rename = "unknown")]
    Unknown,
}

impl Category {
    /// Every category, in rule priority order with `Unknown` last.
    pub const ALL: [Category; 8] = [
        Category::NetworkTimeout,
        Category::NetworkConnectionRefused,
        Category::DependencyUnavailable,
        Category::AuthPermission,
        Category::RuntimeMemory,
        Category::RuntimeDependency,
        Category::RuntimeSyntax,
        Category::Unknown,
    ];

    /// Wire label, e.g. `network/timeout`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::NetworkTimeout => "network/timeout",
            Category::NetworkConnectionRefused => "network/connection_refused",
            Category::DependencyUnavailable => "dependency/unavailable",
            Category::AuthPermission => "auth/permission",
            Category::RuntimeMemory => "runtime/memory",
            Category::RuntimeDependency => "runtime/dependency",
            Category::RuntimeSyntax => "runtime/syntax",
            Category::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a label does not name a known category.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown category label: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Operational impact tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Recommended human response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionSignal {
    /// Investigate when convenient.
    Review,
    /// Needs immediate attention.
    Escalate,
}

/// What kind of signal an evidence item records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    KeywordMatch,
    StatusCode,
    Heuristic,
    WeakPatternMatch,
}

/// One signal that contributed to a verdict.
///
/// `weight` is descriptive only; it is never summed into the confidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvidenceItem {
    #[serde(rename = "type")]
    pub kind: EvidenceKind,
    pub value: String,
    pub weight: f64,
}

impl EvidenceItem {
    pub fn new(kind: EvidenceKind, value: impl Into<String>, weight: f64) -> Self {
        Self {
            kind,
            value: value.into(),
            weight,
        }
    }
}

/// Human-readable guidance for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guidance {
    pub explanation: &'static str,
    pub next_step: &'static str,
}

/// Result of classifying one error report.
///
/// Serializes directly as the `/v1/explain-error` response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    #[serde(rename = "classification")]
    pub category: Category,
    pub confidence: f64,
    pub confidence_rationale: String,
    pub severity: Severity,
    /// Never empty; insertion order is evaluation order.
    pub evidence: Vec<EvidenceItem>,
    pub action_signal: ActionSignal,
    pub explanation: String,
    pub recommended_next_step: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip_through_from_str() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
            assert_eq!(c.to_string(), c.as_str());
        }
    }

    #[test]
    fn test_category_from_str_rejects_unlisted_label() {
        let err = "network/dns".parse::<Category>().unwrap_err();
        assert_eq!(err, UnknownCategory("network/dns".into()));
        assert_eq!(err.to_string(), "unknown category label: network/dns");
    }

    #[test]
    fn test_category_serde_uses_slash_labels() {
        let s = serde_json::to_string(&Category::NetworkConnectionRefused).unwrap();
        assert_eq!(s, r#""network/connection_refused""#);
        let back: Category = serde_json::from_str(r#""runtime/memory""#).unwrap();
        assert_eq!(back, Category::RuntimeMemory);
    }

    #[test]
    fn test_evidence_item_serializes_kind_as_type() {
        let item = EvidenceItem::new(EvidenceKind::StatusCode, "503", 0.35);
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"type": "status_code", "value": "503", "weight": 0.35})
        );
    }

    #[test]
    fn test_severity_and_action_serde() {
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), r#""high""#);
        assert_eq!(
            serde_json::to_string(&ActionSignal::Escalate).unwrap(),
            r#""escalate""#
        );
        assert!(Severity::Low < Severity::Medium && Severity::Medium < Severity::High);
    }
}
