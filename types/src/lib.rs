pub mod api;
pub mod crown;
