pub mod barcode_lookup;
pub mod debounce;
pub mod load_gate;
pub mod product_cache;
pub mod search_index;
