pub mod config;
pub mod cycles;
pub mod error;
pub mod extractor;
pub mod normalizer;
pub mod opcode_table;
pub mod table;
pub mod util;
