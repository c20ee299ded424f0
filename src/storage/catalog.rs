//! Read-only catalog storage.
//!
//! The core never mutates catalog records. A [`CatalogStore`] hands out the
//! whole catalog as a shared, immutable slice; replacing the catalog swaps the
//! slice rather than editing it, so anything holding an earlier slice keeps
//! seeing exactly what it was given.

use std::{
    collections::HashSet,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use crate::domain::ItemRecord;

/// Source of catalog records.
pub trait CatalogStore: Send + Sync {
    /// Every catalog record, in catalog order.
    fn get_all(&self) -> Arc<[ItemRecord]>;
}

/// A catalog fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    items: Arc<[ItemRecord]>,
}

impl StaticCatalog {
    /// Wraps the given records.
    #[must_use]
    pub fn new(items: Vec<ItemRecord>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// The built-in reference catalog.
    #[must_use]
    pub fn reference() -> Self {
        Self::new(super::reference_catalog())
    }

    /// Loads a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a YAML sequence of
    /// item records, contains duplicate identifiers, or has a performance
    /// score above 10.
    pub fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        load_items(path).map(Self::new)
    }
}

impl CatalogStore for StaticCatalog {
    fn get_all(&self) -> Arc<[ItemRecord]> {
        Arc::clone(&self.items)
    }
}

/// A catalog that can be replaced while the process runs.
#[derive(Debug)]
pub struct RefreshableCatalog {
    items: RwLock<Arc<[ItemRecord]>>,
}

impl RefreshableCatalog {
    /// Starts from the given records.
    #[must_use]
    pub fn new(items: Vec<ItemRecord>) -> Self {
        Self {
            items: RwLock::new(items.into()),
        }
    }

    /// Replaces the whole catalog.
    ///
    /// Slices handed out earlier are unaffected.
    pub fn refresh(&self, items: Vec<ItemRecord>) {
        let items: Arc<[ItemRecord]> = items.into();
        tracing::debug!("Refreshing catalog with {} items", items.len());
        // A poisoned lock still guards a complete slice; keep serving it.
        let mut guard = self
            .items
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = items;
    }

    /// Replaces the catalog with the contents of a YAML file.
    ///
    /// # Errors
    ///
    /// See [`StaticCatalog::load`]. The current catalog is kept on error.
    pub fn reload(&self, path: &Path) -> Result<(), CatalogLoadError> {
        let items = load_items(path)?;
        self.refresh(items);
        Ok(())
    }
}

impl CatalogStore for RefreshableCatalog {
    fn get_all(&self) -> Arc<[ItemRecord]> {
        let guard = self
            .items
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(&guard)
    }
}

/// Errors that can occur when loading a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    /// The file could not be opened.
    #[error("failed to open catalog {path}: {source}")]
    Io {
        /// The catalog file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The file is not a valid YAML catalog.
    #[error("failed to parse catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Two records share an identifier.
    #[error("duplicate catalog item id '{0}'")]
    DuplicateId(String),
    /// A record's performance score is outside 0 to 10.
    #[error("catalog item '{id}' has performance score {score}, expected 0-10")]
    PerformanceOutOfRange {
        /// The offending record.
        id: String,
        /// The score it declared.
        score: u8,
    },
}

fn load_items(path: &Path) -> Result<Vec<ItemRecord>, CatalogLoadError> {
    let file = File::open(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let items: Vec<ItemRecord> = serde_yaml::from_reader(BufReader::new(file))?;
    validate(&items)?;
    tracing::debug!("Loaded {} catalog items from {}", items.len(), path.display());
    Ok(items)
}

fn validate(items: &[ItemRecord]) -> Result<(), CatalogLoadError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(CatalogLoadError::DuplicateId(item.id.clone()));
        }
        if item.performance_score > 10 {
            return Err(CatalogLoadError::PerformanceOutOfRange {
                id: item.id.clone(),
                score: item.performance_score,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::Category;

    const TWO_ITEMS: &str = r#"
- id: acme-one
  manufacturer: Acme
  model: One
  processor: A1
  memory: 8GB
  storage: 256GB SSD
  price: 500
  category: Basic
  description: Entry machine.
  specifications: 13-inch
  use_cases: [email]
  performance_score: 4
- id: acme-pro
  manufacturer: Acme
  model: Pro
  processor: A9
  memory: 32GB
  storage: 1TB SSD
  price: 3000
  category: Developer
  description: Workstation.
  specifications: 16-inch
  available: false
  performance_score: 10
"#;

    fn write_catalog(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_yaml_catalog_with_defaults() {
        let file = write_catalog(TWO_ITEMS);

        let catalog = StaticCatalog::load(file.path()).unwrap();
        let items = catalog.get_all();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "acme-one");
        assert!(items[0].available);
        assert!(items[0].selling_points.is_empty());
        assert_eq!(items[1].category, Category::Developer);
        assert!(!items[1].available);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let file = write_catalog(&TWO_ITEMS.replace("acme-pro", "acme-one"));

        let error = StaticCatalog::load(file.path()).unwrap_err();
        assert!(matches!(error, CatalogLoadError::DuplicateId(id) if id == "acme-one"));
    }

    #[test]
    fn out_of_range_performance_is_rejected() {
        let file = write_catalog(&TWO_ITEMS.replace("performance_score: 4", "performance_score: 11"));

        let error = StaticCatalog::load(file.path()).unwrap_err();
        assert!(matches!(
            error,
            CatalogLoadError::PerformanceOutOfRange { score: 11, .. }
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let error = StaticCatalog::load(&tmp.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(error, CatalogLoadError::Io { .. }));
    }

    #[test]
    fn refresh_leaves_earlier_slices_untouched() {
        let catalog = RefreshableCatalog::new(crate::storage::reference_catalog());
        let before = catalog.get_all();

        catalog.refresh(Vec::new());

        assert_eq!(before.len(), 5);
        assert!(catalog.get_all().is_empty());
    }

    #[test]
    fn failed_reload_keeps_current_catalog() {
        let catalog = RefreshableCatalog::new(crate::storage::reference_catalog());
        let file = write_catalog("not: [a, catalog");

        assert!(catalog.reload(file.path()).is_err());
        assert_eq!(catalog.get_all().len(), 5);
    }
}
