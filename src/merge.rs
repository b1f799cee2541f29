use std::collections::HashSet;

use crate::ruleset::RuleSet;

/// Union rule sets given in precedence order.
///
/// Each value keeps the position and original text of the first set that
/// contributed it.
pub fn merge(sets: &[&RuleSet]) -> RuleSet {
    let mut merged = RuleSet::new();
    for set in sets {
        for rule in set.rules() {
            merged.insert(rule);
        }
    }
    merged
}

/// All values of both kinds as one list, in insertion order, without duplicates.
pub fn flatten(set: &RuleSet) -> Vec<String> {
    let mut seen = HashSet::new();
    set.rules()
        .map(|rule| rule.value)
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DomainRule, RuleKind};

    #[test]
    fn test_merge_union() {
        let a = RuleSet::from_rules([DomainRule::suffix("a.com"), DomainRule::exact("x.a.com")]);
        let b = RuleSet::from_rules([DomainRule::suffix("b.com"), DomainRule::suffix("a.com")]);
        let merged = merge(&[&a, &b]);
        assert_eq!(merged.suffixes().len(), 2);
        assert_eq!(merged.exacts().len(), 1);
    }

    #[test]
    fn test_merge_precedence_controls_order() {
        let local = RuleSet::from_rules([DomainRule::suffix("lan"), DomainRule::suffix("shared.com")]);
        let china = RuleSet::from_rules([DomainRule::suffix("shared.com"), DomainRule::suffix("cn")]);

        let merged = merge(&[&local, &china]);
        let order: Vec<&str> = merged.suffixes().iter().collect();
        assert_eq!(order, vec!["lan", "shared.com", "cn"]);

        let merged = merge(&[&china, &local]);
        let order: Vec<&str> = merged.suffixes().iter().collect();
        assert_eq!(order, vec!["shared.com", "cn", "lan"]);
    }

    #[test]
    fn test_merge_membership_order_independent() {
        let a = RuleSet::from_rules([DomainRule::exact("a.com")]);
        let b = RuleSet::from_rules([DomainRule::exact("b.com")]);
        assert_eq!(merge(&[&a, &b]), merge(&[&b, &a]));
    }

    #[test]
    fn test_merge_keeps_first_original() {
        let custom = RuleSet::from_rules([DomainRule::suffix("a.com").with_original(".a.com ")]);
        let remote = RuleSet::from_rules([DomainRule::suffix("a.com")]);
        let merged = merge(&[&custom, &remote]);
        assert_eq!(merged.original_text(RuleKind::Suffix, "a.com"), ".a.com ");
    }

    #[test]
    fn test_flatten_dedups_across_kinds() {
        let set = RuleSet::from_rules([
            DomainRule::suffix("a.com"),
            DomainRule::exact("a.com"),
            DomainRule::exact("b.com"),
        ]);
        assert_eq!(flatten(&set), vec!["a.com", "b.com"]);
    }
}
