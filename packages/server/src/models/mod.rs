pub mod catalog;
pub mod contact;
pub mod product;
pub mod shared;
