use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::local::LocalRuleFile;
use crate::ruleset::RuleSet;
use crate::types::{DomainRule, ParsedLine, SourceFormat};

/// Regex pattern for remote rule lines
/// Format: TYPE,value[,policy...]
static REMOTE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9\-]+)\s*,\s*([^,]*?)\s*(?:,.*)?$")
        .expect("REMOTE_PATTERN: hardcoded regex is invalid")
});

const DOMAIN_SUFFIX: &str = "DOMAIN-SUFFIX";
const DOMAIN: &str = "DOMAIN";

/// Parse one line of a rule document.
pub fn parse_line(line: &str, format: SourceFormat) -> ParsedLine {
    let trimmed = line.trim();
    let raw = line.trim_end_matches(['\r', '\n']);

    if trimmed.is_empty() {
        return ParsedLine::Blank(raw.to_string());
    }
    if trimmed.starts_with('#') {
        return ParsedLine::Comment(raw.to_string());
    }

    match format {
        SourceFormat::Remote => parse_remote_line(trimmed),
        SourceFormat::Local => parse_local_line(trimmed),
    }
}

fn parse_remote_line(line: &str) -> ParsedLine {
    let Some(captures) = REMOTE_PATTERN.captures(line) else {
        return ParsedLine::Ignored;
    };

    let rule_type = &captures[1];
    let value = &captures[2];
    if value.is_empty() {
        debug!("Skipping remote rule without value: {}", line);
        return ParsedLine::Ignored;
    }

    // Keyword and CIDR rules have no PAC domain equivalent
    match rule_type {
        DOMAIN_SUFFIX => ParsedLine::Rule(DomainRule::suffix(value)),
        DOMAIN => ParsedLine::Rule(DomainRule::exact(value)),
        _ => ParsedLine::Ignored,
    }
}

fn parse_local_line(line: &str) -> ParsedLine {
    if let Some(value) = line.strip_prefix('.') {
        if value.is_empty() {
            return ParsedLine::Ignored;
        }
        return ParsedLine::Rule(DomainRule::suffix(value).with_original(line));
    }
    ParsedLine::Rule(DomainRule::exact(line))
}

/// Parse a remote rule document into a rule set.
///
/// Lines that are not domain rules are skipped.
pub fn parse_remote(text: &str) -> RuleSet {
    let mut set = RuleSet::new();
    for line in text.lines() {
        if let ParsedLine::Rule(rule) = parse_line(line, SourceFormat::Remote) {
            set.insert(rule);
        }
    }
    set
}

/// Parse a local rule file, keeping comments and blank lines for the rewrite.
pub fn parse_local(text: &str) -> LocalRuleFile {
    let mut file = LocalRuleFile::default();
    for line in text.lines() {
        match parse_line(line, SourceFormat::Local) {
            ParsedLine::Rule(rule) => {
                file.rules.insert(rule);
            }
            ParsedLine::Comment(text) | ParsedLine::Blank(text) => file.comments.push(text),
            ParsedLine::Ignored => debug!("Skipping local line: {}", line),
        }
    }
    file
}
