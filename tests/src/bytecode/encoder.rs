use bosc_core::decoder::tokenize;
use bosc_core::encoder::{encode, keccak256, timestamped_file_name, write_new_file, OutputMode};
use bosc_utils::errors::ObfuscateError;
use chrono::{TimeZone, Utc};
use std::fs;

#[test]
fn encode_is_inverse_of_tokenize() {
    for hex in ["", "00", "6080604052", "608", crate::STORAGE_CONTRACT] {
        assert_eq!(encode(&tokenize(hex).unwrap()), hex);
    }
}

#[test]
fn keccak_distinguishes_inputs() {
    let digest = keccak256(&tokenize("6080").unwrap());
    assert_eq!(digest.len(), 32);
    assert_ne!(digest, keccak256(&tokenize("6081").unwrap()));
}

#[test]
fn timestamped_output_lands_in_new_directory() {
    let dir = tempfile::tempdir().unwrap();
    let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let name = timestamped_file_name(&now, OutputMode::Runtime, "token.hex");
    let path = dir.path().join("a").join("b").join(&name);

    write_new_file(&path, "5b00").unwrap();
    assert_eq!(name, "2025-01-02 03-04-05runtimeobfuscatedtoken.hex");
    assert_eq!(fs::read_to_string(&path).unwrap(), "5b00");
    assert!(matches!(
        write_new_file(&path, "5b01"),
        Err(ObfuscateError::OutputExists(_))
    ));
}

#[test]
fn unwritable_parent_is_a_file_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let err = write_new_file(blocker.join("out.hex"), "00").unwrap_err();
    assert!(matches!(err, ObfuscateError::File(_)));
}
