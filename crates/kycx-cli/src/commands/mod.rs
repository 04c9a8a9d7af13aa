pub mod batch;
pub mod config;
pub mod fields;
pub mod process;
