pub mod catalog;
mod reference;
pub mod session;

pub use catalog::{CatalogLoadError, CatalogStore, RefreshableCatalog, StaticCatalog};
pub use reference::reference_catalog;
pub use session::{InMemorySessionStore, SessionStore, StoreError};
