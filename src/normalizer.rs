use log::info;
use strum::IntoEnumIterator;

use crate::cycles::CycleFormat;
use crate::error::Error;
use crate::opcode_table::{TableKind, TableSelectors};
use crate::table::cell::Segment;
use crate::table::document::Document;
use crate::table::scan::scan;

/// Rewrites the width/cycles text of every populated cell of a table into the canonical
/// "{width}  {min}/{max}" or "{width}  {value}" form, divided down by the format's divisor.
///
/// Every cell is parsed before any is rewritten, so a table with a malformed cell is left
/// untouched.
pub fn normalize_table(document: &mut Document, selector: usize, format: CycleFormat) -> Result<(), Error> {
    let rewrites = {
        let table = document.table(selector)?;
        let mut rewrites = Vec::new();
        for scanned in scan(table, format)? {
            if scanned.cell.info().and_then(Segment::text_span).is_none() {
                return Err(Error::UnwritableSegment { table: selector, opcode: scanned.opcode });
            }

            let text = format!("{}  {}", scanned.width_token, scanned.cycles);
            rewrites.push((scanned.opcode, scanned.cell.id(), text));
        }

        rewrites
    };

    let count = rewrites.len();
    for (opcode, id, text) in rewrites {
        if !document.set_info_text(selector, id, text) {
            return Err(Error::UnwritableSegment { table: selector, opcode });
        }
    }

    info!(target: "tables", "Normalized {count} cell(s) in table {selector}.");
    Ok(())
}

/// Normalizes the base table, then the extended table. A table selected twice would be
/// divided down twice, so that is rejected before anything is rewritten.
pub fn normalize_document(
    document: &mut Document,
    selectors: TableSelectors,
    format: CycleFormat,
) -> Result<(), Error> {
    if selectors.base == selectors.extended {
        return Err(Error::DuplicateTable { selector: selectors.base });
    }

    for kind in TableKind::iter() {
        normalize_table(document, selectors.get(kind), format)?;
    }

    Ok(())
}
