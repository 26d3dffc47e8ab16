pub mod aggregate;

pub use aggregate::{DecorationLayer, TestTile, TestTileId};
