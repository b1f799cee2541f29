//! PAC generation and local list cleanup runs.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::dedup::{dedup, DedupReport};
use crate::error::{PacError, Result};
use crate::fetch::{load_remote, NilSource, RuleSource};
use crate::format::to_compact_array;
use crate::local::LocalRuleFile;
use crate::merge::{flatten, merge};
use crate::ruleset::RuleSet;
use crate::template::{load_template, render, PacValues};

const DIRECT_HEADER: &str = "Custom direct domains, one per line (.example.com matches subdomains)";
const PROXY_HEADER: &str = "Custom proxy domains, one per line (.example.com matches subdomains)";

/// Counts from a PAC generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub local_area: usize,
    pub china: usize,
    pub custom_direct: usize,
    /// Custom direct rules dropped as redundant (only with duplicate checking)
    pub removed_duplicates: usize,
    pub direct_total: usize,
    pub proxy_total: usize,
    pub output: PathBuf,
}

/// Outcome of a direct list cleanup run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanSummary {
    pub report: DedupReport,
    /// Rules in the file before cleanup
    pub original_count: usize,
    /// Whether the file was rewritten
    pub rewritten: bool,
}

impl CleanSummary {
    fn unchanged(original_count: usize, residual: RuleSet) -> Self {
        Self {
            report: DedupReport {
                redundant: Vec::new(),
                residual,
            },
            original_count,
            rewritten: false,
        }
    }

    pub fn removed(&self) -> usize {
        if self.rewritten {
            self.report.redundant.len()
        } else {
            0
        }
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| PacError::Write {
        path: dir.to_path_buf(),
        source,
    })
}

fn log_redundancy(report: &DedupReport) {
    let mut lines: Vec<String> = report.redundant.iter().map(|r| r.to_string()).collect();
    lines.sort();
    for line in lines {
        info!("- {}", line);
    }
}

/// Load the local-area and China lists, honouring `skip_download`.
fn load_remote_lists(config: &GeneratorConfig, source: &dyn RuleSource) -> (RuleSet, RuleSet) {
    if config.skip_download {
        info!("Skipping rule list downloads");
        return (RuleSet::new(), RuleSet::new());
    }
    let local_area = load_remote(source, &config.local_area_url, config.timeout);
    let china = load_remote(source, &config.china_list_url, config.timeout);
    (local_area, china)
}

/// Build the PAC file described by `config`.
pub fn generate(config: &GeneratorConfig, source: &dyn RuleSource) -> Result<GenerateSummary> {
    config.validate()?;
    info!("Generating PAC file");

    create_dir(&config.config_dir)?;
    create_dir(&config.output_dir)?;
    LocalRuleFile::ensure_exists(config.direct_path(), DIRECT_HEADER)?;
    LocalRuleFile::ensure_exists(config.proxy_path(), PROXY_HEADER)?;

    let (local_area, china) = load_remote_lists(config, source);
    let mut custom_direct = LocalRuleFile::read(config.direct_path()).rules;
    let proxy = LocalRuleFile::read(config.proxy_path()).rules;

    let mut removed_duplicates = 0;
    if config.check_duplicates {
        let report = dedup(&china, &custom_direct);
        if report.has_redundancy() {
            info!(
                "{} custom direct rules are already covered by the China list:",
                report.redundant.len()
            );
            log_redundancy(&report);
            removed_duplicates = report.redundant.len();
            custom_direct = report.residual;
            info!("Custom direct rules after removing duplicates: {}", custom_direct.len());
        }
    }

    // Local-area rules come first in every direct list
    let direct = merge(&[&local_area, &china, &custom_direct]);
    let front: BTreeSet<String> = flatten(&local_area).into_iter().collect();

    info!("Local area rules: {}", local_area.len());
    info!("China rules: {}", china.len());
    info!("Custom direct rules: {}", custom_direct.len());
    info!("Direct rules total: {}", direct.len());
    info!("Proxy rules total: {}", proxy.len());

    let direct_domains = flatten(&direct);
    let proxy_domains = flatten(&proxy);
    let values = PacValues {
        direct_suffixes: to_compact_array(direct.suffixes().iter(), Some(&front))?,
        direct_exacts: to_compact_array(direct.exacts().iter(), Some(&front))?,
        direct_domains: to_compact_array(direct_domains.iter().map(String::as_str), Some(&front))?,
        proxy_suffixes: to_compact_array(proxy.suffixes().iter(), None)?,
        proxy_exacts: to_compact_array(proxy.exacts().iter(), None)?,
        proxy_domains: to_compact_array(proxy_domains.iter().map(String::as_str), None)?,
        proxy: config.proxy.clone(),
        direct: config.direct.clone(),
        default: config.default.clone(),
    };

    let template = load_template(&config.template_path)?;
    let pac = render(&template, &values);

    let output = config.output_path();
    fs::write(&output, pac).map_err(|source| PacError::Write {
        path: output.clone(),
        source,
    })?;
    info!("PAC file written to {}", output.display());

    Ok(GenerateSummary {
        local_area: local_area.len(),
        china: china.len(),
        custom_direct: custom_direct.len(),
        removed_duplicates,
        direct_total: direct.len(),
        proxy_total: proxy.len(),
        output,
    })
}

/// Remove rules from the custom direct file that the China list already covers.
///
/// `confirm` is asked before the file is rewritten and may decline.
pub fn clean_direct<F>(
    config: &GeneratorConfig,
    source: &dyn RuleSource,
    confirm: F,
) -> Result<CleanSummary>
where
    F: FnOnce(&DedupReport) -> bool,
{
    config.validate()?;
    let source: &dyn RuleSource = if config.skip_download {
        &NilSource
    } else {
        source
    };

    let china = load_remote(source, &config.china_list_url, config.timeout);
    if china.is_empty() {
        warn!("China list unavailable, nothing to compare against");
        return Ok(CleanSummary::unchanged(0, RuleSet::new()));
    }

    let path = config.direct_path();
    let file = LocalRuleFile::read(&path);
    let original_count = file.rules.len();
    if file.rules.is_empty() {
        warn!("No rules in {}, nothing to clean", path.display());
        return Ok(CleanSummary::unchanged(0, RuleSet::new()));
    }

    let report = dedup(&china, &file.rules);
    info!(
        "{} rules match the China list exactly",
        report.exact_matches().count()
    );
    info!(
        "{} rules are subdomains of China list suffixes",
        report.subdomains().count()
    );

    if !report.has_redundancy() {
        info!("No redundant rules in {}", path.display());
        return Ok(CleanSummary {
            report,
            original_count,
            rewritten: false,
        });
    }
    log_redundancy(&report);

    if !confirm(&report) {
        info!("Cleanup cancelled");
        return Ok(CleanSummary {
            report,
            original_count,
            rewritten: false,
        });
    }

    file.with_rules(report.residual.clone()).write(&path)?;
    info!(
        "Removed {} rules from {} ({} -> {})",
        report.redundant.len(),
        path.display(),
        original_count,
        report.residual.len()
    );

    Ok(CleanSummary {
        report,
        original_count,
        rewritten: true,
    })
}
