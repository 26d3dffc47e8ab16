pub mod a005_reference;
pub mod catalogue;
pub mod colour;
