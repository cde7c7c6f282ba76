use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to parse markup. {0}")]
    Markup(#[from] roxmltree::Error),

    #[error("No table matches selector {selector} (the document has {table_count}).")]
    MissingTable { selector: usize, table_count: usize },

    #[error("Table {table}, opcode 0x{opcode:02X}: {reason}")]
    MalformedCell { table: usize, opcode: u8, reason: String },

    #[error("Table {table}, opcode 0x{opcode:02X}: cycle value {value} is not evenly divisible by {divisor}.")]
    Divisor { table: usize, opcode: u8, value: u16, divisor: u16 },

    #[error("Table {selector} is selected as both the base and the extended table.")]
    DuplicateTable { selector: usize },

    #[error("The cycle divisor must be non-zero.")]
    ZeroDivisor,

    #[error("Table {table} has {count} data cells, but an opcode map can't have more than 256.")]
    TooManyCells { table: usize, count: usize },

    #[error("Table {table}, opcode 0x{opcode:02X}: the width/cycles segment isn't plain text, so it can't be rewritten.")]
    UnwritableSegment { table: usize, opcode: u8 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(table: usize, opcode: u8, reason: impl Into<String>) -> Error {
        Error::MalformedCell { table, opcode, reason: reason.into() }
    }
}
