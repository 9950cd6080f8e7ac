pub mod error;
pub mod index;
