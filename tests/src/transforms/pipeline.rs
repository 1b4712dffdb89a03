use bosc_core::decoder::tokenize;
use bosc_core::encoder::OutputMode;
use bosc_core::strip::Envelope;
use bosc_transform::obfuscator::{
    obfuscate_bytecode, presets, InputKind, ObfuscationConfig, PassKind,
};
use bosc_utils::errors::ObfuscateError;

#[test]
fn storage_contract_keeps_its_envelope() {
    crate::init_tracing();
    let original = Envelope::split(&tokenize(crate::STORAGE_CONTRACT).unwrap());
    let result = obfuscate_bytecode(crate::STORAGE_CONTRACT, &presets::reproducible_obfuscation(1))
        .unwrap();

    let names: Vec<&str> = result.passes.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["IncompleteInstruction", "FalseBranch", "Flower", "Reorder"]);
    let inserted: Vec<usize> = result.passes.iter().map(|p| p.tokens_inserted).collect();
    assert_eq!(inserted, [7, 8, 2, 0]);

    assert_eq!(result.obfuscated_size, result.original_size + 17);
    assert!(result
        .obfuscated_bytecode
        .starts_with(&original.deploy_prefix.to_hex()));
    assert!(result
        .obfuscated_bytecode
        .ends_with(&original.auxdata_suffix.to_hex()));
    assert_eq!(
        result.output(OutputMode::Runtime).len(),
        (original.runtime_body.len() + 17) * 2
    );
    assert!(result.size_increase_percentage > 4.0);
}

#[test]
fn same_seed_same_bytes() {
    let a = obfuscate_bytecode(crate::STORAGE_CONTRACT, &presets::default_obfuscation(Some(77)))
        .unwrap();
    let b = obfuscate_bytecode(crate::STORAGE_CONTRACT, &presets::default_obfuscation(Some(77)))
        .unwrap();
    assert_eq!(a.obfuscated_bytecode, b.obfuscated_bytecode);
    assert_eq!(a.obfuscated_runtime_keccak, b.obfuscated_runtime_keccak);
    assert_eq!(a.seed_used, 77);
}

#[test]
fn light_preset_only_grows_by_flower() {
    let result =
        obfuscate_bytecode(crate::STORAGE_CONTRACT, &presets::light_obfuscation(Some(3))).unwrap();
    assert_eq!(result.obfuscated_size, result.original_size + 2);
}

#[test]
fn runtime_input_without_candidates_fails_whole_run() {
    let config = ObfuscationConfig {
        seed: Some(0),
        passes: vec![PassKind::Reorder, PassKind::Flower],
        input_kind: InputKind::Runtime,
        ..Default::default()
    };
    let err = obfuscate_bytecode("6001600201", &config).unwrap_err();
    assert!(matches!(err, ObfuscateError::Pass { pass: "Flower", .. }));
}

#[test]
fn bad_hex_is_a_format_error() {
    let err = obfuscate_bytecode("60zz", &ObfuscationConfig::default()).unwrap_err();
    assert!(matches!(err, ObfuscateError::Format(_)));
}

#[tokio::test]
async fn concurrent_runs_are_independent() {
    let inputs = [crate::STORAGE_CONTRACT, "6000f35b303800", "5b303a4243fd"];
    let config = presets::default_obfuscation(Some(5));

    let sequential: Vec<String> = inputs
        .iter()
        .map(|hex| obfuscate_bytecode(hex, &config).unwrap().obfuscated_bytecode)
        .collect();

    let mut handles = Vec::new();
    for hex in inputs {
        let config = config.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            obfuscate_bytecode(hex, &config).map(|r| r.obfuscated_bytecode)
        }));
    }
    for (handle, expected) in handles.into_iter().zip(sequential) {
        assert_eq!(handle.await.unwrap().unwrap(), expected);
    }
}
