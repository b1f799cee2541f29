//! PAC Rules - build proxy auto-config domain lists from remote and local rule sets
//!
//! This library combines an authoritative remote list of direct-connect domains with
//! user-maintained local lists, drops local rules the remote list already covers,
//! and renders the result into a PAC template.
//!
//! # Example
//!
//! ```rust
//! use pac_rules::{dedup, parse_local, parse_remote, Redundancy};
//!
//! let reference = parse_remote("DOMAIN-SUFFIX,example.com\nDOMAIN,api.example.org\n");
//! let local = parse_local("# my rules\n.foo.example.com\napi.example.org\n.other.net\n");
//!
//! let report = dedup(&reference, &local.rules);
//! assert_eq!(report.redundant.len(), 2);
//! assert_eq!(
//!     report.redundant[0].reason,
//!     Redundancy::SubdomainOf("example.com".to_string())
//! );
//!
//! // Survivors keep their original spelling
//! let cleaned = local.with_rules(report.residual);
//! assert_eq!(cleaned.render(), "# my rules\n.other.net\n");
//! ```
//!
//! # Rule Syntax
//!
//! Remote lists use one `TYPE,value` rule per line:
//!
//! | Line | Rule |
//! |------|------|
//! | `DOMAIN-SUFFIX,example.com` | `example.com` and all subdomains |
//! | `DOMAIN,example.com` | `example.com` only |
//! | `DOMAIN-KEYWORD,...`, `IP-CIDR,...` | ignored |
//!
//! Local lists hold one domain per line; `#` starts a comment:
//!
//! | Line | Rule |
//! |------|------|
//! | `.example.com` | `example.com` and all subdomains |
//! | `example.com` | `example.com` only |

pub mod config;
pub mod dedup;
pub mod error;
pub mod fetch;
pub mod format;
pub mod generator;
pub mod local;
pub mod merge;
pub mod parser;
pub mod ruleset;
pub mod template;
pub mod types;

// Re-export commonly used items
pub use config::GeneratorConfig;
pub use dedup::{classify, covering_suffix, dedup, DedupReport};
pub use error::{ErrorKind, PacError, Result};
pub use fetch::{load_remote, HttpSource, MemorySource, NilSource, RuleSource};
pub use format::{to_compact_array, to_file_lines};
pub use generator::{clean_direct, generate, CleanSummary, GenerateSummary};
pub use local::LocalRuleFile;
pub use merge::{flatten, merge};
pub use parser::{parse_line, parse_local, parse_remote};
pub use ruleset::{DomainList, RuleSet};
pub use template::{load_template, render, PacValues};
pub use types::{DomainRule, ParsedLine, Redundancy, RedundancyRecord, RuleKind, SourceFormat};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_workflow() {
        let china = parse_remote(
            r#"
# ChinaDomain.list
DOMAIN-SUFFIX,example.cn
DOMAIN-SUFFIX,cn
DOMAIN,api.example.com
DOMAIN-KEYWORD,baidu
"#,
        );
        let lan = parse_remote("DOMAIN-SUFFIX,local\nDOMAIN,localhost\n");
        let custom = parse_local(
            r#"# custom direct
.shop.example.cn
api.example.com
.mysite.org
intranet
"#,
        );

        // Redundant custom rules are removed
        let report = dedup(&china, &custom.rules);
        assert_eq!(report.redundant.len(), 2);
        assert_eq!(report.residual.len(), 2);

        // Local-area rules lead the merged direct list
        let direct = merge(&[&lan, &china, &report.residual]);
        let front: std::collections::BTreeSet<String> = flatten(&lan).into_iter().collect();
        let array = to_compact_array(flatten(&direct).iter().map(String::as_str), Some(&front)).unwrap();
        assert_eq!(
            array,
            r#"["local","localhost","api.example.com","cn","example.cn","intranet","mysite.org"]"#
        );

        // The rewritten file keeps the user's formatting
        assert_eq!(
            custom.with_rules(report.residual).render(),
            "# custom direct\n.mysite.org\nintranet\n"
        );
    }
}
