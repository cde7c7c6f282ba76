use log::debug;

use crate::cycles::{CycleFormat, CycleSpec};
use crate::error::Error;
use crate::table::cell::Cell;
use crate::table::document::Table;

pub const MAX_OPCODES: usize = 0x100;

/// A populated cell that has been tokenized and parsed.
#[derive(Debug)]
pub struct ScannedCell<'a> {
    pub opcode: u8,
    pub cell: &'a Cell,
    pub label: &'a str,
    // Kept verbatim so the cell can be rewritten without reformatting its width.
    pub width_token: &'a str,
    pub width: u8,
    pub cycles: CycleSpec,
}

/// Walks every data cell of a table in row-major order, numbering each by its position, and
/// parses every populated one. Empty cells still consume an opcode.
///
/// Both extraction and normalization go through here; they only differ by CycleFormat.
pub fn scan(table: &Table, format: CycleFormat) -> Result<Vec<ScannedCell<'_>>, Error> {
    let selector = table.selector();
    let count = table.data_cell_count();
    if count > MAX_OPCODES {
        return Err(Error::TooManyCells { table: selector, count });
    }

    let mut scanned = Vec::new();
    for (position, cell) in table.data_cells().enumerate() {
        let opcode = position as u8;
        if !cell.is_populated() {
            debug!(target: "cells", "Table {selector}, 0x{opcode:02X}: undefined.");
            continue;
        }

        let label = cell.label()
            .ok_or_else(|| Error::malformed(selector, opcode, "no label."))?;
        let Some(info) = cell.info() else {
            return Err(Error::malformed(selector, opcode, "no width/cycles text."));
        };
        let (width_token, cycles_token) = cell.info_tokens()
            .ok_or_else(|| Error::malformed(
                selector,
                opcode,
                format!("expected '<width> <cycles>' but found '{}'.", info.text().trim()),
            ))?;
        let width = width_token.parse()
            .map_err(|_| Error::malformed(selector, opcode, format!("width '{width_token}' is not a number.")))?;
        let cycles = format.parse(cycles_token)
            .map_err(|err| err.at(selector, opcode))?;

        debug!(target: "cells", "Table {selector}, 0x{opcode:02X}: {label}, {width} byte(s), {cycles} cycle(s).");
        scanned.push(ScannedCell { opcode, cell, label, width_token, width, cycles });
    }

    Ok(scanned)
}
