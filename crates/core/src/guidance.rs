use crate::model::{Category, Guidance};

/// Guidance for a category. Total over the closed category set.
pub fn explain(category: Category) -> Guidance {
    let (explanation, next_step) = match category {
        Category::NetworkTimeout => (
            "Likely a timeout between services (dependency latency or network path issue).",
            "Check upstream latency, recent deploys, retries, and dependency health.",
        ),
        Category::NetworkConnectionRefused => (
            "Target service refused the connection (service down, wrong host/port, or firewall).",
            "Verify service health, endpoint/port, and network ACL/security group rules.",
        ),
        Category::DependencyUnavailable => (
            "A downstream dependency is unavailable (outage, overload, or deployment issue).",
            "Check dependency health, incident status, load, and recent deploys; add retries/backoff if safe.",
        ),
        Category::AuthPermission => (
            "Authentication/authorisation failure (credentials, token scope, or policy).",
            "Verify token/credentials, scopes/roles, and recent policy changes.",
        ),
        Category::RuntimeMemory => (
            "Process exceeded memory limits (leak, large payload, or insufficient memory allocation).",
            "Check memory limits, recent payload changes, and heap usage trends.",
        ),
        Category::RuntimeDependency => (
            "Missing dependency/module or incorrect runtime packaging/build output.",
            "Confirm build artifact includes dependencies; verify bundling and runtime path.",
        ),
        Category::RuntimeSyntax => (
            "Syntax error during parsing/execution (bad deploy artifact or incompatible runtime).",
            "Inspect the deployed build artifact; validate runtime/node version compatibility.",
        ),
        Category::Unknown => (
            "Not enough signal to classify confidently from the provided text.",
            "Provide stack trace + environment + component name to improve classification.",
        ),
    };
    Guidance {
        explanation,
        next_step,
    }
}

/// Guidance for a wire label. Unrecognized labels get the `unknown` entry.
pub fn explain_label(label: &str) -> Guidance {
    match label.parse::<Category>() {
        Ok(category) => explain(category),
        Err(e) => {
            tracing::debug!(error = %e, "falling back to unknown guidance");
            explain(Category::Unknown)
        }
    }
}
