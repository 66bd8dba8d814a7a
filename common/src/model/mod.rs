pub mod barcode;
pub mod product;
