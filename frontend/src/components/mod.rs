pub mod barcode_entry;
pub mod product_display;
pub mod search_bar;
