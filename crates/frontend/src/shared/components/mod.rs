pub mod colour_swatch;
pub mod facet_select;
pub mod filter_panel;
pub mod pagination_controls;
