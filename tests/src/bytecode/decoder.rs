use bosc_core::decoder::{read_bytecode_lines, tokenize};
use bosc_core::ByteToken;
use bosc_utils::errors::FormatError;
use std::fs;

#[test]
fn odd_length_input_round_trips() {
    let seq = tokenize("6080604").unwrap();
    assert_eq!(seq.len(), 4);
    assert_eq!(seq[3], ByteToken::Nibble(0x4));
    assert_eq!(seq.to_hex(), "6080604");
}

#[test]
fn non_hex_is_rejected() {
    assert!(matches!(
        tokenize("6080g0"),
        Err(FormatError::InvalidHexCharacter { c: 'g', index: 4 })
    ));
}

#[test]
fn bytecode_file_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.hex");
    fs::write(&path, "0x6080\n\n  6000f3  \r\n").unwrap();

    let lines = read_bytecode_lines(&path).unwrap();
    assert_eq!(lines, vec!["6080".to_string(), "6000f3".to_string()]);
    for line in &lines {
        assert!(tokenize(line).is_ok());
    }
}

#[test]
fn storage_contract_tokenizes() {
    let seq = tokenize(crate::STORAGE_CONTRACT).unwrap();
    assert_eq!(seq.len(), crate::STORAGE_CONTRACT.len() / 2);
    assert_eq!(seq.to_hex(), crate::STORAGE_CONTRACT);
}
