use std::{
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// Settings for search, reporting and order intake.
///
/// Stored as TOML. The on-disk form is versioned so the domain type can change
/// without breaking existing files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Default number of results returned by a search, and the size of the
    /// catalog snapshot taken when a request names a query.
    search_limit: usize,

    /// Number of items listed in a recommendation report.
    report_limit: usize,

    /// Delivery policy quoted on every new request.
    delivery_estimate: String,

    /// Prefix for submitted order identifiers, e.g. `PO`.
    order_id_prefix: String,

    /// Optional YAML catalog replacing the built-in reference catalog.
    ///
    /// Relative paths are resolved against the directory holding the
    /// configuration file.
    pub catalog: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_limit: default_search_limit(),
            report_limit: default_report_limit(),
            delivery_estimate: default_delivery_estimate(),
            order_id_prefix: default_order_id_prefix(),
            catalog: None,
        }
    }
}

/// Errors raised while reading or writing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// The file that was read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The file is not valid configuration TOML.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be rendered as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The file could not be written.
    #[error("failed to write config file {path}: {source}")]
    Write {
        /// The file that was written.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// A relative `catalog` path is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content)?;

        if let (Some(catalog), Some(parent)) = (&config.catalog, path.parent()) {
            if catalog.is_relative() {
                config.catalog = Some(parent.join(catalog));
            }
        }

        Ok(config)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Default number of search results.
    #[must_use]
    pub const fn search_limit(&self) -> usize {
        self.search_limit
    }

    /// Number of items listed in a recommendation report.
    #[must_use]
    pub const fn report_limit(&self) -> usize {
        self.report_limit
    }

    /// Delivery policy quoted on every new request.
    #[must_use]
    pub fn delivery_estimate(&self) -> &str {
        &self.delivery_estimate
    }

    /// Prefix for submitted order identifiers.
    #[must_use]
    pub fn order_id_prefix(&self) -> &str {
        &self.order_id_prefix
    }

    /// Sets the default number of search results.
    ///
    /// A limit of zero is raised to one.
    pub fn set_search_limit(&mut self, limit: usize) {
        self.search_limit = limit.max(1);
    }

    /// Sets the delivery policy quoted on new requests.
    pub fn set_delivery_estimate(&mut self, estimate: impl Into<String>) {
        self.delivery_estimate = estimate.into();
    }
}

const fn default_search_limit() -> usize {
    5
}

const fn default_report_limit() -> usize {
    3
}

fn default_delivery_estimate() -> String {
    "Within 5-7 business days after approval".to_string()
}

fn default_order_id_prefix() -> String {
    "PO".to_string()
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_search_limit")]
        search_limit: usize,

        #[serde(default = "default_report_limit")]
        report_limit: usize,

        #[serde(default = "default_delivery_estimate")]
        delivery_estimate: String,

        #[serde(default = "default_order_id_prefix")]
        order_id_prefix: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        catalog: Option<PathBuf>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                search_limit,
                report_limit,
                delivery_estimate,
                order_id_prefix,
                catalog,
            } => Self {
                search_limit: search_limit.max(1),
                report_limit: report_limit.max(1),
                delivery_estimate,
                order_id_prefix,
                catalog,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            search_limit: config.search_limit,
            report_limit: config.report_limit,
            delivery_estimate: config.delivery_estimate,
            order_id_prefix: config.order_id_prefix,
            catalog: config.catalog,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nsearch_limit = 8\nreport_limit = 2\ndelivery_estimate = \"Next week\"\norder_id_prefix = \"REQ\"\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.search_limit(), 8);
        assert_eq!(config.report_limit(), 2);
        assert_eq!(config.delivery_estimate(), "Next week");
        assert_eq!(config.order_id_prefix(), "REQ");
        assert_eq!(config.catalog, None);
    }

    #[test]
    fn relative_catalog_path_is_resolved_against_config_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("intake.toml");
        std::fs::write(&path, "_version = \"1\"\ncatalog = \"laptops.yaml\"\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.catalog, Some(tmp.path().join("laptops.yaml")));
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(matches!(error, ConfigError::Read { .. }));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nsearch_limit = \"five\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn zero_limits_are_raised_to_one() {
        let config: Config =
            toml::from_str("_version = \"1\"\nsearch_limit = 0\nreport_limit = 0\n").unwrap();
        assert_eq!(config.search_limit(), 1);
        assert_eq!(config.report_limit(), 1);
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("intake.toml");
        let mut config = Config::default();
        config.set_search_limit(7);
        config.set_delivery_estimate("Two weeks");

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
