pub mod metadata;
pub mod store;

pub use metadata::{PersistenceMetadata, FORMAT_VERSION};
pub use store::*;
