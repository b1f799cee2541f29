//! PAC template placeholder substitution.

use std::fs;
use std::path::Path;

use crate::error::{PacError, Result};

pub const DIRECT_SUFFIXES: &str = "__DIRECT_DOMAIN_SUFFIXES__";
pub const DIRECT_EXACTS: &str = "__DIRECT_DOMAIN_EXACTS__";
pub const PROXY_SUFFIXES: &str = "__PROXY_DOMAIN_SUFFIXES__";
pub const PROXY_EXACTS: &str = "__PROXY_DOMAIN_EXACTS__";
/// Single-list placeholders for templates that do not distinguish rule kinds
pub const DIRECT_DOMAINS: &str = "__DIRECT_DOMAINS_PLACEHOLDER__";
pub const PROXY_DOMAINS: &str = "__PROXY_DOMAINS_PLACEHOLDER__";

/// Values substituted into a PAC template. Array fields hold compact array literals.
#[derive(Debug, Clone, Default)]
pub struct PacValues {
    pub direct_suffixes: String,
    pub direct_exacts: String,
    pub direct_domains: String,
    pub proxy_suffixes: String,
    pub proxy_exacts: String,
    pub proxy_domains: String,
    pub proxy: String,
    pub direct: String,
    pub default: String,
}

/// Read a PAC template from disk.
pub fn load_template(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| PacError::TemplateMissing {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace every known placeholder. Placeholders absent from the template are skipped.
pub fn render(template: &str, values: &PacValues) -> String {
    let replacements = [
        (DIRECT_SUFFIXES, &values.direct_suffixes),
        (DIRECT_EXACTS, &values.direct_exacts),
        (DIRECT_DOMAINS, &values.direct_domains),
        (PROXY_SUFFIXES, &values.proxy_suffixes),
        (PROXY_EXACTS, &values.proxy_exacts),
        (PROXY_DOMAINS, &values.proxy_domains),
        ("{proxy}", &values.proxy),
        ("{direct}", &values.direct),
        ("{default}", &values.default),
    ];

    replacements
        .into_iter()
        .fold(template.to_string(), |text, (token, value)| {
            if text.contains(token) {
                text.replace(token, value)
            } else {
                text
            }
        })
}
