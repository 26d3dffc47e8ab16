//! Справочники: конусы, атмосферы обжига, типы масс и декоров

pub mod aggregate;

pub use aggregate::{Atmosphere, ClayBodyType, Cone, DecorationType, ReferenceData};
