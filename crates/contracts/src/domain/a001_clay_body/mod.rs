pub mod aggregate;

pub use aggregate::{ClayBody, ClayBodyId};
