pub mod catalog_part;
pub mod contact_message;
pub mod product;
