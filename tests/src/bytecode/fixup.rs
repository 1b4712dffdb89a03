use bosc_core::decoder::tokenize;
use bosc_core::fixup::{fixup, OperandOverflow};
use bosc_core::scanner::find_jump_sites;
use bosc_core::{BytecodeSequence, Opcode};
use bosc_utils::errors::FixupError;

/// `k` JUMPDESTs, `PUSH1 d JUMP`, `m` STOPs, then the JUMPDEST at `d`.
fn jump_program(k: usize, m: usize) -> (BytecodeSequence, usize) {
    let dest = k + 3 + m;
    let hex = format!(
        "{}60{:02x}56{}5b",
        "5b".repeat(k),
        dest,
        "00".repeat(m)
    );
    (tokenize(&hex).unwrap(), dest)
}

#[test]
fn patched_operand_follows_its_jumpdest() {
    for (k, m) in [(0, 0), (1, 4), (6, 2), (20, 30)] {
        let (original, dest) = jump_program(k, m);
        for len in [1, 2, 6, 7, 8] {
            for point in 0..=k {
                let mut seq = original.clone();
                seq.insert_bytes(point, &vec![0x5b; len]).unwrap();
                fixup(&mut seq, len, point + len, OperandOverflow::Reject).unwrap();

                let site = find_jump_sites(&seq, 0)[0];
                let operand = seq[site.operand.unwrap()].value() as usize;
                assert_eq!(operand, dest + len, "k={k} m={m} len={len} point={point}");
                assert!(seq[operand].is(Opcode::JUMPDEST));
            }
        }
    }
}

#[test]
fn length_invariant_holds_at_every_point() {
    let original = tokenize(crate::STORAGE_CONTRACT).unwrap();
    let payload = [0x60, 0x00, 0x56, 0x60, 0x02, 0x01, 0x5b];
    for point in (0..=original.len()).step_by(37) {
        let mut seq = original.clone();
        seq.insert_bytes(point, &payload).unwrap();

        assert_eq!(seq.len(), original.len() + payload.len());
        assert_eq!(seq.tokens()[..point], original.tokens()[..point]);
        assert_eq!(
            seq.tokens()[point + payload.len()..],
            original.tokens()[point..]
        );
    }
}

#[test]
fn overflow_at_the_byte_limit() {
    let (mut seq, dest) = jump_program(250, 0);
    assert_eq!(dest, 253);
    let before = seq.clone();

    seq.insert_bytes(0, &[0x60, 0x06, 0x60, 0x06]).unwrap();
    let err = fixup(&mut seq, 4, 4, OperandOverflow::Reject).unwrap_err();
    assert!(matches!(
        err,
        FixupError::OperandOverflow { value: 253, delta: 4, .. }
    ));

    let mut saturated = before.clone();
    saturated.insert_bytes(0, &[0x60, 0x06, 0x60, 0x06]).unwrap();
    fixup(&mut saturated, 4, 4, OperandOverflow::Saturate).unwrap();
    assert_eq!(saturated[255].value(), 0xff);

    let mut wrapped = before;
    wrapped.insert_bytes(0, &[0x60, 0x06, 0x60, 0x06]).unwrap();
    fixup(&mut wrapped, 4, 4, OperandOverflow::Wrap).unwrap();
    assert_eq!(wrapped[255].value(), 0x01);
}
