use log::info;

use crate::cycles::CycleFormat;
use crate::error::Error;
use crate::opcode_table::{OpcodeRecord, OpcodeTable, OpcodeTables, TableSelectors};
use crate::table::document::{Document, Table};
use crate::table::scan::scan;

/// Converts one table into its opcode records. The first malformed cell aborts the whole
/// table; no partial table is ever returned.
pub fn extract_table(table: &Table, format: CycleFormat) -> Result<OpcodeTable, Error> {
    let mut opcode_table = OpcodeTable::new();
    for scanned in scan(table, format)? {
        opcode_table.insert(OpcodeRecord {
            opcode: scanned.opcode,
            label: scanned.label.to_string(),
            width: scanned.width,
            cycles: scanned.cycles,
        });
    }

    info!(
        target: "tables",
        "Extracted {} opcode(s) from table {}, {} undefined.",
        opcode_table.records().count(),
        table.selector(),
        opcode_table.undefined_opcodes().len(),
    );
    Ok(opcode_table)
}

pub fn extract_document(
    document: &Document,
    selectors: TableSelectors,
    format: CycleFormat,
) -> Result<OpcodeTables, Error> {
    Ok(OpcodeTables {
        base: extract_table(document.table(selectors.base)?, format)?,
        extended: extract_table(document.table(selectors.extended)?, format)?,
    })
}
