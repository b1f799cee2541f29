//! Run configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{PacError, Result};

/// ACL4SSR list of domains that should connect directly from mainland China
pub const DEFAULT_CHINA_LIST_URL: &str =
    "https://raw.githubusercontent.com/ACL4SSR/ACL4SSR/master/Clash/ChinaDomain.list";

/// ACL4SSR list of local-network domains
pub const DEFAULT_LOCAL_AREA_URL: &str =
    "https://raw.githubusercontent.com/ACL4SSR/ACL4SSR/master/Clash/LocalAreaNetwork.list";

/// Default proxy rule string written into the PAC file
pub const DEFAULT_PROXY: &str = "SOCKS5 127.0.0.1:%mixed-port%; DIRECT;";

/// Default direct rule string written into the PAC file
pub const DEFAULT_DIRECT: &str = "DIRECT";

/// Default timeout for remote list downloads
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for a PAC generation or cleanup run
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub china_list_url: String,
    pub local_area_url: String,

    pub config_dir: PathBuf,
    pub output_dir: PathBuf,
    pub template_path: PathBuf,
    pub output_file_name: String,
    pub direct_file_name: String,
    pub proxy_file_name: String,

    pub proxy: String,
    pub direct: String,
    /// Rule for hosts matching nothing; defaults to `proxy`
    pub default: String,

    pub timeout: Duration,
    pub skip_download: bool,
    pub check_duplicates: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            china_list_url: DEFAULT_CHINA_LIST_URL.to_string(),
            local_area_url: DEFAULT_LOCAL_AREA_URL.to_string(),
            config_dir: PathBuf::from("config"),
            output_dir: PathBuf::from("output"),
            template_path: PathBuf::from("pac-template"),
            output_file_name: "proxy.pac".to_string(),
            direct_file_name: "direct.txt".to_string(),
            proxy_file_name: "proxy.txt".to_string(),
            proxy: DEFAULT_PROXY.to_string(),
            direct: DEFAULT_DIRECT.to_string(),
            default: DEFAULT_PROXY.to_string(),
            timeout: DEFAULT_TIMEOUT,
            skip_download: false,
            check_duplicates: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the proxy rule. The default rule follows it.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = proxy.into();
        self.default = self.proxy.clone();
        self
    }

    pub fn with_direct(mut self, direct: impl Into<String>) -> Self {
        self.direct = direct.into();
        self
    }

    /// Set the fallback rule. Call after `with_proxy`.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_china_list_url(mut self, url: impl Into<String>) -> Self {
        self.china_list_url = url.into();
        self
    }

    pub fn with_local_area_url(mut self, url: impl Into<String>) -> Self {
        self.local_area_url = url.into();
        self
    }

    pub fn with_config_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_template(mut self, path: impl AsRef<Path>) -> Self {
        self.template_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_skip_download(mut self, skip: bool) -> Self {
        self.skip_download = skip;
        self
    }

    pub fn with_check_duplicates(mut self, check: bool) -> Self {
        self.check_duplicates = check;
        self
    }

    /// Reject settings a run cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(PacError::Config("download timeout must be greater than zero".into()));
        }
        Ok(())
    }

    pub fn direct_path(&self) -> PathBuf {
        self.config_dir.join(&self.direct_file_name)
    }

    pub fn proxy_path(&self) -> PathBuf {
        self.config_dir.join(&self.proxy_file_name)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_follows_proxy() {
        let config = GeneratorConfig::new().with_proxy("PROXY 10.0.0.1:8080; DIRECT");
        assert_eq!(config.default, "PROXY 10.0.0.1:8080; DIRECT");

        let config = config.with_default("DIRECT");
        assert_eq!(config.default, "DIRECT");
        assert_eq!(config.proxy, "PROXY 10.0.0.1:8080; DIRECT");
    }

    #[test]
    fn test_builder_pattern() {
        let config = GeneratorConfig::new()
            .with_config_dir("/tmp/pac/config")
            .with_output_dir("/tmp/pac/output")
            .with_template("/tmp/pac/pac-template")
            .with_timeout(Duration::from_secs(5))
            .with_skip_download(true)
            .with_check_duplicates(true);

        assert_eq!(config.direct_path(), PathBuf::from("/tmp/pac/config/direct.txt"));
        assert_eq!(config.proxy_path(), PathBuf::from("/tmp/pac/config/proxy.txt"));
        assert_eq!(config.output_path(), PathBuf::from("/tmp/pac/output/proxy.pac"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.skip_download);
        assert!(config.check_duplicates);
    }

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.direct, "DIRECT");
        assert_eq!(config.default, DEFAULT_PROXY);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.china_list_url.ends_with("ChinaDomain.list"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = GeneratorConfig::new()
            .with_timeout(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
        assert!(err.kind().is_fatal());
    }
}
