use std::collections::{HashMap, HashSet};

use crate::types::{DomainRule, RuleKind};

/// Insertion-ordered set of domain values.
#[derive(Debug, Clone, Default)]
pub struct DomainList {
    order: Vec<String>,
    index: HashSet<String>,
}

impl DomainList {
    /// Add a value. Returns false if it was already present.
    pub fn insert(&mut self, value: &str) -> bool {
        if self.index.contains(value) {
            return false;
        }
        self.index.insert(value.to_string());
        self.order.push(value.to_string());
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.index.contains(value)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl PartialEq for DomainList {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for DomainList {}

/// Domain rules partitioned into suffix and exact bins.
///
/// Sets built from local files also carry a side table mapping each suffix value
/// back to the text it was written as (`example.com` -> `.example.com`), so the
/// file can be rewritten without changing the user's formatting.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    suffixes: DomainList,
    exacts: DomainList,
    // Insertion order across both kinds
    entries: Vec<(RuleKind, String)>,
    originals: HashMap<String, String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from rules; later duplicates are dropped.
    pub fn from_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = DomainRule>,
    {
        let mut set = Self::new();
        for rule in rules {
            set.insert(rule);
        }
        set
    }

    /// Insert a rule. Re-inserting a value already present for the same kind is a
    /// no-op and keeps the first original text.
    pub fn insert(&mut self, rule: DomainRule) -> bool {
        let inserted = match rule.kind {
            RuleKind::Suffix => self.suffixes.insert(&rule.value),
            RuleKind::Exact => self.exacts.insert(&rule.value),
        };
        if !inserted {
            return false;
        }
        if rule.kind == RuleKind::Suffix && rule.original != format!(".{}", rule.value) {
            self.originals.insert(rule.value.clone(), rule.original);
        }
        self.entries.push((rule.kind, rule.value));
        true
    }

    pub fn suffixes(&self) -> &DomainList {
        &self.suffixes
    }

    pub fn exacts(&self) -> &DomainList {
        &self.exacts
    }

    /// The bin for a kind
    pub fn list(&self, kind: RuleKind) -> &DomainList {
        match kind {
            RuleKind::Suffix => &self.suffixes,
            RuleKind::Exact => &self.exacts,
        }
    }

    pub fn contains(&self, kind: RuleKind, value: &str) -> bool {
        self.list(kind).contains(value)
    }

    /// Text a rule was written as. Suffix rules without a recorded original are
    /// rendered with the leading-dot convention.
    pub fn original_text(&self, kind: RuleKind, value: &str) -> String {
        match kind {
            RuleKind::Suffix => self
                .originals
                .get(value)
                .cloned()
                .unwrap_or_else(|| format!(".{}", value)),
            RuleKind::Exact => value.to_string(),
        }
    }

    /// Rebuild the full rule for a stored value
    pub fn rule(&self, kind: RuleKind, value: &str) -> DomainRule {
        DomainRule {
            kind,
            value: value.to_string(),
            original: self.original_text(kind, value),
        }
    }

    /// All rules in insertion order
    pub fn rules(&self) -> impl Iterator<Item = DomainRule> + '_ {
        self.entries.iter().map(|(kind, v)| self.rule(*kind, v))
    }

    pub fn len(&self) -> usize {
        self.suffixes.len() + self.exacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty() && self.exacts.is_empty()
    }
}

impl PartialEq for RuleSet {
    fn eq(&self, other: &Self) -> bool {
        self.suffixes == other.suffixes
            && self.exacts == other.exacts
            && self.suffixes.iter().all(|v| {
                self.original_text(RuleKind::Suffix, v) == other.original_text(RuleKind::Suffix, v)
            })
    }
}

impl Eq for RuleSet {}

impl FromIterator<DomainRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = DomainRule>>(iter: I) -> Self {
        Self::from_rules(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = RuleSet::new();
        assert!(set.insert(DomainRule::suffix("example.com")));
        assert!(!set.insert(DomainRule::suffix("example.com")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_same_value_in_both_kinds() {
        let set = RuleSet::from_rules([
            DomainRule::suffix("example.com"),
            DomainRule::exact("example.com"),
        ]);
        assert!(set.contains(RuleKind::Suffix, "example.com"));
        assert!(set.contains(RuleKind::Exact, "example.com"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_first_original_wins() {
        let set = RuleSet::from_rules([
            DomainRule::suffix("example.com").with_original("  .example.com"),
            DomainRule::suffix("example.com"),
        ]);
        assert_eq!(set.original_text(RuleKind::Suffix, "example.com"), "  .example.com");
    }

    #[test]
    fn test_insertion_order_kept() {
        let set = RuleSet::from_rules([
            DomainRule::exact("b.com"),
            DomainRule::exact("a.com"),
            DomainRule::exact("c.com"),
        ]);
        let values: Vec<&str> = set.exacts().iter().collect();
        assert_eq!(values, vec!["b.com", "a.com", "c.com"]);
    }

    #[test]
    fn test_domain_list_default_is_empty() {
        let mut list = DomainList::default();
        assert!(list.is_empty());
        assert!(list.insert("a.com"));
        assert!(!list.insert("a.com"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = RuleSet::from_rules([DomainRule::exact("a.com"), DomainRule::exact("b.com")]);
        let b = RuleSet::from_rules([DomainRule::exact("b.com"), DomainRule::exact("a.com")]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rules_rebuild_originals() {
        let set = RuleSet::from_rules([DomainRule::exact("a.net"), DomainRule::suffix("example.com")]);
        let rules: Vec<DomainRule> = set.rules().collect();
        assert_eq!(rules[0].original, "a.net");
        assert_eq!(rules[1].original, ".example.com");
    }
}
