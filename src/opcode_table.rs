use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::cycles::CycleSpec;

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct OpcodeRecord {
    pub opcode: u8,
    pub label: String,
    pub width: u8,
    pub cycles: CycleSpec,
}

/// The records of one opcode map, indexed by opcode. Undefined opcodes have no record, and
/// the table ends at the highest defined opcode.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct OpcodeTable(Vec<Option<OpcodeRecord>>);

impl OpcodeTable {
    pub fn new() -> OpcodeTable {
        OpcodeTable(Vec::new())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn insert(&mut self, record: OpcodeRecord) {
        let index = usize::from(record.opcode);
        if self.0.len() <= index {
            self.0.resize(index + 1, None);
        }

        self.0[index] = Some(record);
    }

    pub fn get(&self, opcode: u8) -> Option<&OpcodeRecord> {
        self.0.get(usize::from(opcode))?.as_ref()
    }

    pub fn records(&self) -> impl Iterator<Item = &OpcodeRecord> {
        self.0.iter().flatten()
    }

    pub fn undefined_opcodes(&self) -> Vec<u8> {
        self.0.iter()
            .enumerate()
            .filter(|(_, record)| record.is_none())
            .map(|(opcode, _)| opcode as u8)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum TableKind {
    Base,
    // 0xCB-prefixed.
    Extended,
}

/// Which table of the document (1-based, in document order) holds each opcode map.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TableSelectors {
    pub base: usize,
    pub extended: usize,
}

impl TableSelectors {
    pub fn get(self, kind: TableKind) -> usize {
        match kind {
            TableKind::Base => self.base,
            TableKind::Extended => self.extended,
        }
    }
}

impl Default for TableSelectors {
    fn default() -> TableSelectors {
        TableSelectors { base: 1, extended: 2 }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct OpcodeTables {
    pub base: OpcodeTable,
    pub extended: OpcodeTable,
}

impl OpcodeTables {
    pub fn get(&self, kind: TableKind) -> &OpcodeTable {
        match kind {
            TableKind::Base => &self.base,
            TableKind::Extended => &self.extended,
        }
    }
}
