//! Static rule table.
//!
//! Rules are evaluated in slice order and the first match wins, so the
//! position of a rule in [`RULES`] is its priority. Trigger and marker
//! patterns are lower-case because they are matched against normalized text.

use crate::model::{ActionSignal, Category, EvidenceItem, EvidenceKind, Severity};

/// A sub-pattern that yields one evidence item when any of its needles occur.
#[derive(Debug, Clone, Copy)]
pub struct Marker {
    pub needles: &'static [&'static str],
    pub kind: EvidenceKind,
    /// Literal reported back to the caller (original casing).
    pub value: &'static str,
    pub weight: f64,
}

impl Marker {
    const fn keyword(needles: &'static [&'static str], value: &'static str, weight: f64) -> Self {
        Self {
            needles,
            kind: EvidenceKind::KeywordMatch,
            value,
            weight,
        }
    }

    const fn status(needles: &'static [&'static str], value: &'static str, weight: f64) -> Self {
        Self {
            needles,
            kind: EvidenceKind::StatusCode,
            value,
            weight,
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        contains_any(text, self.needles)
    }

    pub fn evidence(&self) -> EvidenceItem {
        EvidenceItem::new(self.kind, self.value, self.weight)
    }
}

/// One entry of the priority chain: a predicate plus the outcome it selects.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub category: Category,
    /// The rule fires if any of these occur in the normalized text.
    pub triggers: &'static [&'static str],
    /// Evidence candidates, reported in this order when they match.
    pub markers: &'static [Marker],
    /// Pattern-class description appended after the markers.
    pub heuristic: &'static str,
    pub heuristic_weight: f64,
    pub confidence: f64,
    pub severity: Severity,
    pub action: ActionSignal,
    pub rationale: &'static str,
}

impl Rule {
    pub fn matches(&self, text: &str) -> bool {
        contains_any(text, self.triggers)
    }

    /// Evidence for a text this rule matched: one item per matching marker,
    /// then the heuristic item.
    pub fn evidence(&self, text: &str) -> Vec<EvidenceItem> {
        self.markers
            .iter()
            .filter(|m| m.matches(text))
            .map(Marker::evidence)
            .chain(std::iter::once(EvidenceItem::new(
                EvidenceKind::Heuristic,
                self.heuristic,
                self.heuristic_weight,
            )))
            .collect()
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

pub const UNKNOWN_CONFIDENCE: f64 = 0.35;
pub const UNKNOWN_RATIONALE: &str = "Insufficient signal to classify confidently.";
pub const UNKNOWN_EVIDENCE: &str = "no strong markers found";
pub const UNKNOWN_EVIDENCE_WEIGHT: f64 = 0.10;

/// Built-in rules in priority order.
pub static RULES: [Rule; 7] = [
    Rule {
        category: Category::NetworkTimeout,
        triggers: &["etimedout", "timed out", "timeout"],
        markers: &[
            Marker::keyword(&["etimedout"], "ETIMEDOUT", 0.40),
            Marker::keyword(&["timed out"], "timed out", 0.25),
            Marker::keyword(&["timeout"], "timeout", 0.20),
        ],
        heuristic: "timeout pattern",
        heuristic_weight: 0.32,
        confidence: 0.72,
        severity: Severity::Medium,
        action: ActionSignal::Review,
        rationale: "Matched timeout markers (ETIMEDOUT/timeout) in error text.",
    },
    Rule {
        category: Category::NetworkConnectionRefused,
        triggers: &["econnrefused", "connection refused"],
        markers: &[
            Marker::keyword(&["econnrefused"], "ECONNREFUSED", 0.45),
            Marker::keyword(&["connection refused"], "connection refused", 0.30),
        ],
        heuristic: "socket connect failure",
        heuristic_weight: 0.25,
        confidence: 0.78,
        severity: Severity::High,
        action: ActionSignal::Review,
        rationale: "Matched connection refusal markers (ECONNREFUSED/connection refused).",
    },
    Rule {
        category: Category::DependencyUnavailable,
        triggers: &[
            " 503",
            "503 ",
            "status 503",
            "service unavailable",
            "downstream dependency failed",
        ],
        markers: &[
            Marker::status(&["503"], "503", 0.35),
            Marker::keyword(&["service unavailable"], "service unavailable", 0.30),
            Marker::keyword(
                &["downstream dependency failed"],
                "downstream dependency failed",
                0.30,
            ),
        ],
        heuristic: "dependency outage",
        heuristic_weight: 0.25,
        confidence: 0.77,
        severity: Severity::High,
        action: ActionSignal::Review,
        rationale: "Matched downstream outage markers (503/service unavailable).",
    },
    Rule {
        category: Category::AuthPermission,
        triggers: &[
            " 401",
            "401 ",
            "status 401",
            " 403",
            "403 ",
            "status 403",
            "unauthorized",
            "forbidden",
        ],
        markers: &[
            Marker::status(&["401"], "401", 0.35),
            Marker::status(&["403"], "403", 0.35),
            Marker::keyword(&["unauthorized"], "unauthorized", 0.25),
            Marker::keyword(&["forbidden"], "forbidden", 0.25),
        ],
        heuristic: "authz/authn failure",
        heuristic_weight: 0.20,
        confidence: 0.80,
        severity: Severity::High,
        action: ActionSignal::Escalate,
        rationale: "Matched authentication/authorization markers (401/403/unauthorized/forbidden).",
    },
    Rule {
        category: Category::RuntimeMemory,
        triggers: &["out of memory", "heap out of memory", "javascript heap"],
        markers: &[
            Marker::keyword(&["heap out of memory"], "heap out of memory", 0.45),
            Marker::keyword(&["out of memory"], "out of memory", 0.35),
            Marker::keyword(&["javascript heap"], "javascript heap", 0.25),
        ],
        heuristic: "process memory limit exceeded",
        heuristic_weight: 0.20,
        confidence: 0.82,
        severity: Severity::High,
        action: ActionSignal::Escalate,
        rationale: "Matched memory exhaustion markers (out of memory/heap).",
    },
    Rule {
        category: Category::RuntimeDependency,
        triggers: &[
            "cannot find module",
            "module not found",
            "modulenotfounderror",
            "no module named",
        ],
        markers: &[
            Marker::keyword(&["cannot find module"], "cannot find module", 0.40),
            Marker::keyword(&["module not found"], "module not found", 0.30),
            Marker::keyword(&["no module named"], "no module named", 0.35),
            Marker::keyword(&["modulenotfounderror"], "ModuleNotFoundError", 0.35),
        ],
        heuristic: "dependency resolution failure",
        heuristic_weight: 0.20,
        confidence: 0.74,
        severity: Severity::Medium,
        action: ActionSignal::Review,
        rationale:
            "Matched missing dependency markers (cannot find module/module not found/no module named).",
    },
    Rule {
        category: Category::RuntimeSyntax,
        triggers: &["syntaxerror", "unexpected token", "missing initializer"],
        markers: &[
            Marker::keyword(&["syntaxerror"], "SyntaxError", 0.45),
            Marker::keyword(&["unexpected token"], "unexpected token", 0.30),
            Marker::keyword(&["missing initializer"], "missing initializer", 0.30),
        ],
        heuristic: "parsing failure",
        heuristic_weight: 0.20,
        confidence: 0.76,
        severity: Severity::Medium,
        action: ActionSignal::Review,
        rationale:
            "Matched syntax/parsing markers (SyntaxError/unexpected token/missing initializer).",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_has_one_rule_per_known_category() {
        let cats: Vec<Category> = RULES.iter().map(|r| r.category).collect();
        assert_eq!(cats, Category::ALL[..7].to_vec());
    }

    #[test]
    fn test_patterns_are_lowercase() {
        for rule in &RULES {
            for t in rule.triggers {
                assert_eq!(*t, t.to_lowercase(), "{} trigger", rule.category);
            }
            for m in rule.markers {
                for n in m.needles {
                    assert_eq!(*n, n.to_lowercase(), "{} marker", rule.category);
                }
            }
        }
    }

    #[test]
    fn test_confidence_and_weights_in_range() {
        for rule in &RULES {
            assert!(rule.confidence > 0.0 && rule.confidence <= 1.0);
            assert!((0.0..=1.0).contains(&rule.heuristic_weight));
            for m in rule.markers {
                assert!((0.0..=1.0).contains(&m.weight));
            }
        }
    }

    #[test]
    fn test_rule_evidence_ends_with_heuristic() {
        let rule = &RULES[1];
        let ev = rule.evidence("econnrefused 10.0.0.5 connection refused");
        assert_eq!(ev.len(), 3);
        assert_eq!(ev[0].value, "ECONNREFUSED");
        assert_eq!(ev[1].value, "connection refused");
        assert_eq!(ev[2].kind, EvidenceKind::Heuristic);
        assert_eq!(ev[2].value, "socket connect failure");
    }

    #[test]
    fn test_status_marker_matches_bare_code() {
        // Trigger needs a space, marker does not.
        let rule = &RULES[2];
        assert!(rule.matches("status 503"));
        assert!(!rule.matches("err503x"));
        let ev = rule.evidence("status 503");
        assert_eq!(ev[0].kind, EvidenceKind::StatusCode);
        assert_eq!(ev[0].value, "503");
    }
}
