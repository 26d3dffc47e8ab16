pub mod a001_clay_body;
pub mod a002_decoration;
pub mod a003_test_tile;
pub mod a004_collection;
pub mod a005_reference;
pub mod common;
