use std::fs;

use opcode_tables::cycles::{CycleFormat, CycleSpec};
use opcode_tables::error::Error;
use opcode_tables::extractor::{extract_document, extract_table};
use opcode_tables::opcode_table::{OpcodeRecord, OpcodeTables, TableSelectors};
use opcode_tables::table::document::Document;

const UNDEFINED_BASE_OPCODES: [u8; 11] = [
    0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
];

fn load() -> Document {
    let markup = fs::read_to_string("tests/data/opcode_map.xhtml").expect("Test data not found!");
    Document::parse(&markup).unwrap()
}

fn extract_raw() -> OpcodeTables {
    extract_document(&load(), TableSelectors::default(), CycleFormat::RAW).unwrap()
}

fn record(opcode: u8, label: &str, width: u8, cycles: CycleSpec) -> OpcodeRecord {
    OpcodeRecord { opcode, label: label.to_string(), width, cycles }
}

#[test]
fn base_table_layout() {
    let tables = extract_raw();
    assert_eq!(tables.base.len(), 0x100);
    assert_eq!(tables.base.records().count(), 0x100 - UNDEFINED_BASE_OPCODES.len());
    assert_eq!(tables.base.undefined_opcodes(), UNDEFINED_BASE_OPCODES);
}

#[test]
fn extended_table_is_complete() {
    let tables = extract_raw();
    assert_eq!(tables.extended.len(), 0x100);
    assert!(tables.extended.undefined_opcodes().is_empty());
    assert!(tables.extended.records().all(|record| record.width == 2));
}

#[test]
fn opcodes_match_positions() {
    let tables = extract_raw();
    for table in [&tables.base, &tables.extended] {
        for opcode in 0..=0xFF {
            if let Some(record) = table.get(opcode) {
                assert_eq!(record.opcode, opcode);
            }
        }
    }
}

#[test]
fn known_records() {
    let tables = extract_raw();
    assert_eq!(tables.base.get(0x00), Some(&record(0x00, "NOP", 1, CycleSpec::Fixed { value: 1 })));
    assert_eq!(tables.base.get(0x08), Some(&record(0x08, "LD (a16),SP", 3, CycleSpec::Fixed { value: 5 })));
    assert_eq!(tables.base.get(0x20), Some(&record(0x20, "JR NZ,r8", 2, CycleSpec::Variable { min: 2, max: 3 })));
    assert_eq!(tables.base.get(0x76), Some(&record(0x76, "HALT", 1, CycleSpec::Fixed { value: 1 })));
    assert_eq!(tables.base.get(0xC0), Some(&record(0xC0, "RET NZ", 1, CycleSpec::Variable { min: 2, max: 5 })));
    assert_eq!(tables.base.get(0xC4), Some(&record(0xC4, "CALL NZ,a16", 3, CycleSpec::Variable { min: 3, max: 6 })));
    assert_eq!(tables.base.get(0xD3), None);
    assert_eq!(tables.extended.get(0x46), Some(&record(0x46, "BIT 0,(HL)", 2, CycleSpec::Fixed { value: 3 })));
    assert_eq!(tables.extended.get(0xFF), Some(&record(0xFF, "SET 7,A", 2, CycleSpec::Fixed { value: 2 })));
}

#[test]
fn variable_cycles_are_ordered() {
    let tables = extract_raw();
    let variable: Vec<_> = tables.base.records()
        .filter_map(|record| <(u16, u16)>::try_from(record.cycles).ok())
        .collect();
    assert_eq!(variable.len(), 16);
    assert!(variable.iter().all(|(min, max)| min <= max));
}

#[test]
fn fixed_cycles_are_clocks_over_four() {
    let doc = load();
    let tables = extract_document(&doc, TableSelectors::default(), CycleFormat::RAW).unwrap();
    let clocks = extract_document(&doc, TableSelectors::default(), CycleFormat::new(1, false, false).unwrap())
        .unwrap();
    for (record, raw) in tables.base.records().zip(clocks.base.records()) {
        if let (Ok(value), Ok(raw)) = (u16::try_from(record.cycles), u16::try_from(raw.cycles)) {
            assert_eq!(value, raw / 4, "opcode 0x{:02X}", record.opcode);
        }
    }
}

#[test]
fn raw_clocks_are_all_multiples_of_four() {
    let doc = load();
    let strict = CycleFormat::RAW.strict();
    assert!(extract_document(&doc, TableSelectors::default(), strict).is_ok());
}

#[test]
fn tables_can_be_selected_in_any_order() {
    let doc = load();
    let swapped = TableSelectors { base: 2, extended: 1 };
    let tables = extract_document(&doc, swapped, CycleFormat::RAW).unwrap();
    assert_eq!(tables.base.get(0x00).unwrap().label, "RLC B");
    assert_eq!(tables.extended.get(0x00).unwrap().label, "NOP");
}

#[test]
fn missing_table() {
    let doc = load();
    let result = extract_table_at(&doc, 3);
    assert!(matches!(result, Err(Error::MissingTable { selector: 3, table_count: 2 })));
}

#[test]
fn json_lines() {
    let tables = extract_raw();
    let json = tables.base.to_json().unwrap();
    assert!(json.starts_with(r#"[{"opcode":0,"label":"NOP","width":1,"cycles":{"kind":"fixed","value":1}},"#));
    assert!(json.contains(r#"{"opcode":32,"label":"JR NZ,r8","width":2,"cycles":{"kind":"variable","min":2,"max":3}}"#));
    assert!(json.contains(r#""cycles":{"kind":"fixed","value":2}},null,null,{"opcode":229,"#));
}

fn extract_table_at(doc: &Document, selector: usize) -> Result<(), Error> {
    extract_table(doc.table(selector)?, CycleFormat::RAW).map(|_| ())
}
