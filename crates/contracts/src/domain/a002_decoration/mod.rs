pub mod aggregate;

pub use aggregate::{Decoration, DecorationId};
