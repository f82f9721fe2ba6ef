pub mod batch;
pub mod limit;
pub mod parse;
pub mod views;
