use std::fmt;

use serde::Serialize;

/// How a domain rule matches hostnames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Suffix match: "example.com" matches "example.com" and "foo.example.com"
    Suffix,
    /// Exact match: "example.com" matches only "example.com"
    Exact,
}

/// Which document format a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Remote list lines: `DOMAIN-SUFFIX,example.com` or `DOMAIN,example.com`
    Remote,
    /// Local list lines: one domain per line, `.example.com` for suffix rules
    Local,
}

/// A classified domain rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DomainRule {
    pub kind: RuleKind,
    /// Normalized domain (no leading dot)
    pub value: String,
    /// Text as written in its source, used when rewriting local files
    pub original: String,
}

impl DomainRule {
    pub fn suffix(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            kind: RuleKind::Suffix,
            original: format!(".{}", value),
            value,
        }
    }

    pub fn exact(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            kind: RuleKind::Exact,
            original: value.clone(),
            value,
        }
    }

    /// Build a rule keeping a custom original text.
    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = original.into();
        self
    }
}

/// Result of parsing a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Rule(DomainRule),
    /// `#` comment, kept verbatim
    Comment(String),
    /// Empty or whitespace-only line, kept verbatim
    Blank(String),
    /// Line that cannot become a PAC domain rule (keyword, CIDR, malformed)
    Ignored,
}

/// Why a candidate rule is redundant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "reason", content = "parent", rename_all = "snake_case")]
pub enum Redundancy {
    /// The same value is already in the reference set
    ExactMatch,
    /// The value falls under a reference suffix rule
    SubdomainOf(String),
}

impl fmt::Display for Redundancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Redundancy::ExactMatch => write!(f, "exact match"),
            Redundancy::SubdomainOf(parent) => write!(f, "subdomain of {}", parent),
        }
    }
}

/// A candidate rule found redundant against a reference set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RedundancyRecord {
    pub rule: DomainRule,
    #[serde(flatten)]
    pub reason: Redundancy,
}

impl fmt::Display for RedundancyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.rule.original, self.reason)
    }
}
