pub mod catalogue_store;
