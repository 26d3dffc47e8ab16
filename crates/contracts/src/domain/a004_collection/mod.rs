pub mod aggregate;

pub use aggregate::{Collection, CollectionId, TestTileRef};
