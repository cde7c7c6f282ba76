pub mod cell;
pub mod document;
pub mod scan;
