use bosc_core::decoder::tokenize;
use bosc_core::strip::{join, Envelope};
use bosc_core::BytecodeSequence;

#[test]
fn split_then_join_reproduces_input() {
    let blobs = [
        crate::STORAGE_CONTRACT,
        "",
        "f3",
        "a1",
        "6000f3",
        "6000f3a1",
        "60015b00",
        "6000f3fe6001a165627a",
        "60f3f360a100",
        "7fa1a2a3a4f3000000000000000000000000000000000000000000000000000000f35b",
        "6000f35b00a",
    ];
    for hex in blobs {
        let seq = tokenize(hex).unwrap();
        let envelope = Envelope::split(&seq);
        assert_eq!(
            join(
                &envelope.deploy_prefix,
                &envelope.runtime_body,
                &envelope.auxdata_suffix
            ),
            seq,
            "{hex}"
        );
    }
}

#[test]
fn no_auxdata_marker_gives_empty_suffix() {
    let seq = tokenize("608060405260003556fe5b").unwrap();
    let envelope = Envelope::split(&seq);
    assert!(envelope.auxdata_suffix.is_empty());
    assert!(envelope.deploy_prefix.is_empty());
    assert_eq!(envelope.runtime_body, seq);
}

#[test]
fn storage_contract_regions() {
    let seq = tokenize(crate::STORAGE_CONTRACT).unwrap();
    let envelope = Envelope::split(&seq);

    assert_eq!(envelope.deploy_prefix.len(), 31);
    assert_eq!(envelope.runtime_body.len(), 284);
    assert_eq!(envelope.auxdata_suffix.len(), 53);
    assert!(envelope.auxdata_suffix.to_hex().starts_with("a264"));
}

#[test]
fn join_accepts_a_grown_body() {
    let seq = tokenize("6000f35b00a1ff").unwrap();
    let envelope = Envelope::split(&seq);
    let grown = envelope
        .runtime_body
        .concat(&BytecodeSequence::from_bytes(&[0x60, 0x06]));
    let joined = envelope.join(&grown);
    assert_eq!(joined.len(), seq.len() + 2);
    assert_eq!(joined.to_hex(), "6000f35b006006a1ff");
}
