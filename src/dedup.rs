//! Redundancy detection between a reference rule set and a candidate rule set.
//!
//! A candidate rule is redundant when the reference already covers it:
//!
//! | Candidate | Reference | Reason |
//! |-----------|-----------|--------|
//! | suffix `example.com` | suffix `example.com` | exact match |
//! | exact `api.example.com` | exact `api.example.com` | exact match |
//! | exact `example.com` | suffix `example.com` | exact match |
//! | suffix or exact `a.example.com` | suffix `example.com` | subdomain of `example.com` |
//!
//! Reference exact rules never cover anything but the identical exact value.

use serde::Serialize;
use tracing::debug;

use crate::ruleset::RuleSet;
use crate::types::{Redundancy, RedundancyRecord, RuleKind};

/// Outcome of comparing a candidate set against a reference set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DedupReport {
    /// Redundant candidate rules in candidate order
    pub redundant: Vec<RedundancyRecord>,
    /// Candidate rules not covered by the reference
    #[serde(skip)]
    pub residual: RuleSet,
}

impl DedupReport {
    pub fn has_redundancy(&self) -> bool {
        !self.redundant.is_empty()
    }

    pub fn exact_matches(&self) -> impl Iterator<Item = &RedundancyRecord> {
        self.redundant
            .iter()
            .filter(|r| r.reason == Redundancy::ExactMatch)
    }

    pub fn subdomains(&self) -> impl Iterator<Item = &RedundancyRecord> {
        self.redundant
            .iter()
            .filter(|r| matches!(r.reason, Redundancy::SubdomainOf(_)))
    }
}

/// Compare `candidate` against `reference` and split it into redundant records and
/// the residual set. Neither input is modified.
pub fn dedup(reference: &RuleSet, candidate: &RuleSet) -> DedupReport {
    let mut redundant = Vec::new();
    let mut residual = RuleSet::new();

    for rule in candidate.rules() {
        match classify(reference, rule.kind, &rule.value) {
            Some(reason) => {
                debug!("Redundant rule {}: {}", rule.original, reason);
                redundant.push(RedundancyRecord { rule, reason });
            }
            None => {
                residual.insert(rule);
            }
        }
    }

    DedupReport {
        redundant,
        residual,
    }
}

/// Find why a single candidate value is covered by the reference, if it is.
pub fn classify(reference: &RuleSet, kind: RuleKind, value: &str) -> Option<Redundancy> {
    if reference.contains(kind, value) {
        return Some(Redundancy::ExactMatch);
    }
    // A suffix rule also covers its own domain
    if kind == RuleKind::Exact && reference.contains(RuleKind::Suffix, value) {
        return Some(Redundancy::ExactMatch);
    }
    covering_suffix(reference, value).map(|parent| Redundancy::SubdomainOf(parent.to_string()))
}

/// Most specific proper ancestor of `value` present in the reference suffixes.
///
/// Ancestors are tried from the immediate parent upwards, so the first hit is the
/// longest one. The value itself is never tested.
pub fn covering_suffix<'a>(reference: &RuleSet, value: &'a str) -> Option<&'a str> {
    let suffixes = reference.suffixes();
    if suffixes.is_empty() {
        return None;
    }
    ancestors(value).find(|parent| suffixes.contains(parent))
}

/// Proper ancestors of a domain, nearest first: `a.b.c` yields `b.c`, then `c`.
fn ancestors(value: &str) -> impl Iterator<Item = &str> {
    value
        .match_indices('.')
        .map(move |(pos, _)| &value[pos + 1..])
        .filter(|parent| !parent.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DomainRule;

    fn suffixes(values: &[&str]) -> RuleSet {
        values.iter().map(|v| DomainRule::suffix(*v)).collect()
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let found: Vec<&str> = ancestors("a.b.example.com").collect();
        assert_eq!(found, vec!["b.example.com", "example.com", "com"]);
    }

    #[test]
    fn test_ancestors_single_label() {
        assert_eq!(ancestors("localhost").count(), 0);
    }

    #[test]
    fn test_ancestors_trailing_dot() {
        let found: Vec<&str> = ancestors("example.com.").collect();
        assert_eq!(found, vec!["com."]);
    }

    #[test]
    fn test_covering_suffix_most_specific() {
        let reference = suffixes(&["example.com", "cn", "b.example.com"]);
        assert_eq!(covering_suffix(&reference, "a.b.example.com"), Some("b.example.com"));
        assert_eq!(covering_suffix(&reference, "x.example.com"), Some("example.com"));
        assert_eq!(covering_suffix(&reference, "example.com"), None);
    }

    #[test]
    fn test_classify_exact_beats_subdomain() {
        let reference = suffixes(&["example.com", "a.example.com"]);
        assert_eq!(
            classify(&reference, RuleKind::Suffix, "a.example.com"),
            Some(Redundancy::ExactMatch)
        );
    }

    #[test]
    fn test_classify_exact_candidate_same_as_suffix() {
        let reference = suffixes(&["example.com"]);
        assert_eq!(
            classify(&reference, RuleKind::Exact, "example.com"),
            Some(Redundancy::ExactMatch)
        );
    }

    #[test]
    fn test_reference_exact_does_not_subsume() {
        let reference = RuleSet::from_rules([DomainRule::exact("example.com")]);
        assert_eq!(classify(&reference, RuleKind::Exact, "a.example.com"), None);
        assert_eq!(classify(&reference, RuleKind::Suffix, "example.com"), None);
    }

    #[test]
    fn test_single_label_only_exact() {
        let reference = suffixes(&["local"]);
        assert_eq!(classify(&reference, RuleKind::Suffix, "local"), Some(Redundancy::ExactMatch));
        assert_eq!(classify(&reference, RuleKind::Suffix, "intranet"), None);
    }

    #[test]
    fn test_report_partitions() {
        let reference = RuleSet::from_rules([
            DomainRule::suffix("example.com"),
            DomainRule::exact("api.test.org"),
        ]);
        let candidate = RuleSet::from_rules([
            DomainRule::suffix("foo.example.com"),
            DomainRule::exact("api.test.org"),
            DomainRule::exact("web.test.org"),
        ]);
        let report = dedup(&reference, &candidate);
        assert_eq!(report.exact_matches().count(), 1);
        assert_eq!(report.subdomains().count(), 1);
        assert_eq!(report.residual.len(), 1);
        assert!(report.residual.contains(RuleKind::Exact, "web.test.org"));
    }
}
