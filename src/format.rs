use std::collections::BTreeSet;

use crate::error::Result;
use crate::ruleset::RuleSet;

/// Lines for rewriting a local rule file.
///
/// Comments and blank lines come first, verbatim, then every rule as it was
/// originally written. Each line ends with exactly one newline.
pub fn to_file_lines(set: &RuleSet, comments: &[String]) -> Vec<String> {
    comments
        .iter()
        .map(|c| c.trim_end_matches(['\r', '\n']).to_string())
        .chain(set.rules().map(|rule| rule.original))
        .map(|mut line| {
            line.push('\n');
            line
        })
        .collect()
}

/// Compact array literal (`["a","b"]`) of sorted, deduplicated values.
///
/// Values that also appear in `front` are emitted first (sorted among
/// themselves), followed by the sorted remainder.
pub fn to_compact_array<'a, I>(values: I, front: Option<&BTreeSet<String>>) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let all: BTreeSet<&str> = values.into_iter().collect();
    let ordered: Vec<&str> = match front {
        Some(front) => {
            let (first, rest): (Vec<&str>, Vec<&str>) =
                all.into_iter().partition(|v| front.contains(*v));
            first.into_iter().chain(rest).collect()
        }
        None => all.into_iter().collect(),
    };
    Ok(serde_json::to_string(&ordered)?)
}
