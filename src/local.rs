//! User-maintained rule files.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{PacError, Result};
use crate::format::to_file_lines;
use crate::parser::parse_local;
use crate::ruleset::RuleSet;

/// A local rule file: its comment/blank lines and its rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalRuleFile {
    pub comments: Vec<String>,
    pub rules: RuleSet,
}

impl LocalRuleFile {
    /// Read and parse a rule file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PacError::LocalRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(parse_local(&text))
    }

    /// Like `load`, but a missing or unreadable file yields an empty one.
    pub fn read(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(file) => {
                info!("Read {} rules from {}", file.rules.len(), path.display());
                file
            }
            Err(e) => {
                warn!("{}, treating as empty", e);
                Self::default()
            }
        }
    }

    /// Create the file with a header comment if it does not exist yet.
    pub fn ensure_exists(path: impl AsRef<Path>, header: &str) -> Result<()> {
        let path = path.as_ref();
        if path.exists() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| PacError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, format!("# {}\n", header)).map_err(|source| PacError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Created {}", path.display());
        Ok(())
    }

    /// Render the file text: comments first, then rules in their original form.
    pub fn render(&self) -> String {
        to_file_lines(&self.rules, &self.comments).concat()
    }

    /// Write the file back to disk.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.render()).map_err(|source| PacError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Same comments with a different rule set
    pub fn with_rules(&self, rules: RuleSet) -> Self {
        Self {
            comments: self.comments.clone(),
            rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RuleKind;

    #[test]
    fn test_read_missing_file_is_empty() {
        let file = LocalRuleFile::read("/nonexistent/path/direct.txt");
        assert!(file.rules.is_empty());
        assert!(file.comments.is_empty());
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = LocalRuleFile::load("/nonexistent/path/direct.txt").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::LocalReadFailed);
    }

    #[test]
    fn test_ensure_exists_and_round_trip() {
        let dir = std::env::temp_dir().join("pac_rules_test_local");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("direct.txt");

        LocalRuleFile::ensure_exists(&path, "Custom direct domains, one per line").unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "# Custom direct domains, one per line\n");

        // Existing files are left untouched
        fs::write(&path, "# mine\n.example.com\nfoo.net\n").unwrap();
        LocalRuleFile::ensure_exists(&path, "ignored").unwrap();

        let file = LocalRuleFile::read(&path);
        assert_eq!(file.rules.len(), 2);
        assert!(file.rules.contains(RuleKind::Suffix, "example.com"));

        file.write(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n.example.com\nfoo.net\n");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_render_moves_comments_to_top() {
        let file = parse_local("a.com\n# note\n.b.com\n");
        assert_eq!(file.render(), "# note\na.com\n.b.com\n");
    }

    #[test]
    fn test_render_keeps_whitespace_blank_lines() {
        let file = parse_local("# h\n   \n.a.com\n");
        assert_eq!(file.render(), "# h\n   \n.a.com\n");
    }
}
