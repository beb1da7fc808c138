pub mod admin;
pub mod lead;
