use crate::guidance::explain;
use crate::model::{ActionSignal, Category, EvidenceItem, EvidenceKind, Severity, Verdict};
use crate::rules::{
    Rule, RULES, UNKNOWN_CONFIDENCE, UNKNOWN_EVIDENCE, UNKNOWN_EVIDENCE_WEIGHT, UNKNOWN_RATIONALE,
};

/// Joins message and stack with a single space and lower-cases the result.
pub fn normalize(message: &str, stack_trace: &str) -> String {
    format!("{message} {stack_trace}").to_lowercase()
}

/// Evaluates an ordered rule table against error text.
///
/// Stateless; a single instance can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    rules: &'static [Rule],
}

impl Default for Classifier {
    fn default() -> Self {
        Self { rules: &RULES }
    }
}

impl Classifier {
    /// Uses a custom rule table. Earlier rules take priority.
    pub fn with_rules(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Classify an error report. Never fails; unmatched input is `unknown`.
    pub fn classify(&self, message: &str, stack_trace: &str) -> Verdict {
        let text = normalize(message, stack_trace);

        match self.rules.iter().find(|r| r.matches(&text)) {
            Some(rule) => verdict(
                rule.category,
                rule.confidence,
                rule.rationale,
                rule.severity,
                rule.action,
                rule.evidence(&text),
            ),
            None => unknown_verdict(),
        }
    }
}

/// Classify with the built-in rule table.
pub fn classify(message: &str, stack_trace: &str) -> Verdict {
    Classifier::default().classify(message, stack_trace)
}

fn unknown_verdict() -> Verdict {
    verdict(
        Category::Unknown,
        UNKNOWN_CONFIDENCE,
        UNKNOWN_RATIONALE,
        Severity::Low,
        ActionSignal::Review,
        vec![EvidenceItem::new(
            EvidenceKind::WeakPatternMatch,
            UNKNOWN_EVIDENCE,
            UNKNOWN_EVIDENCE_WEIGHT,
        )],
    )
}

fn verdict(
    category: Category,
    confidence: f64,
    rationale: &str,
    severity: Severity,
    action_signal: ActionSignal,
    evidence: Vec<EvidenceItem>,
) -> Verdict {
    let guidance = explain(category);
    Verdict {
        category,
        confidence,
        confidence_rationale: rationale.to_string(),
        severity,
        evidence,
        action_signal,
        explanation: guidance.explanation.to_string(),
        recommended_next_step: guidance.next_step.to_string(),
    }
}
