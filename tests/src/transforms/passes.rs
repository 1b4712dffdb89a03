use bosc_core::decoder::tokenize;
use bosc_core::scanner::{find_jump_sites, PointSelection};
use bosc_core::{BytecodeSequence, Opcode};
use bosc_transform::false_branch::FalseBranch;
use bosc_transform::flower::Flower;
use bosc_transform::incomplete_instruction::IncompleteInstruction;
use bosc_transform::reorder::Reorder;
use bosc_transform::{PassConfig, PassContext, Transform};
use bosc_utils::errors::{ScanError, TransformError};

fn ctx(selection: PointSelection) -> PassContext {
    PassContext::new(
        42,
        PassConfig {
            selection,
            ..Default::default()
        },
    )
}

#[test]
fn flower_at_pinned_point() {
    crate::init_tracing();
    let body = tokenize("608060405260003556fe5b").unwrap();
    let out = Flower.apply(&body, &mut ctx(PointSelection::Fixed(5))).unwrap();

    let tokens: Vec<String> = out.tokens().iter().map(ToString::to_string).collect();
    assert_eq!(
        tokens,
        ["60", "80", "60", "40", "52", "60", "06", "60", "00", "35", "56", "fe", "5b"]
    );
}

#[test]
fn inserting_passes_reject_point_inside_immediate() {
    // PUSH2 5b00, JUMPDEST, STOP
    let body = tokenize("615b005b00").unwrap();
    let passes: [&dyn Transform; 3] = [&IncompleteInstruction, &Flower, &FalseBranch];
    for pass in passes {
        let err = pass
            .apply(&body, &mut ctx(PointSelection::Fixed(2)))
            .unwrap_err();
        assert!(
            matches!(err, TransformError::Scan(ScanError::NotInstructionBoundary(2))),
            "{}",
            pass.name()
        );
    }
}

#[test]
fn inserting_passes_abort_without_candidates() {
    let body = tokenize("6001600201808055").unwrap();
    let passes: [&dyn Transform; 3] = [&IncompleteInstruction, &Flower, &FalseBranch];
    for pass in passes {
        let err = pass
            .apply(&body, &mut ctx(PointSelection::Random))
            .unwrap_err();
        assert!(
            matches!(err, TransformError::Scan(ScanError::NoCandidate)),
            "{}",
            pass.name()
        );
    }
    assert_eq!(body.to_hex(), "6001600201808055");
}

#[test]
fn inserting_passes_grow_by_their_payload() {
    let body = tokenize("5b6003565b303842fd").unwrap();
    let cases: [(&dyn Transform, usize); 3] = [
        (&IncompleteInstruction, 7),
        (&FalseBranch, 8),
        (&Flower, 2),
    ];
    for seed in 0..16 {
        for (pass, grown) in cases {
            let mut ctx = PassContext::new(seed, PassConfig::default());
            let out = pass.apply(&body, &mut ctx).unwrap();
            assert_eq!(out.len(), body.len() + grown, "{}", pass.name());
        }
    }
}

#[test]
fn reorder_only_permutes_independent_opcodes() {
    let body = tokenize("303a42434445463860003561ffff5b303a42434445463856").unwrap();
    let independent = |seq: &BytecodeSequence| {
        seq.instructions()
            .filter(|(_, op)| op.is_independent())
            .map(|(i, _)| i)
            .collect::<Vec<_>>()
    };

    for seed in 0..32 {
        let mut ctx = PassContext::new(seed, PassConfig::default());
        let out = Reorder.apply(&body, &mut ctx).unwrap();

        assert_eq!(out.len(), body.len());
        assert_eq!(independent(&out), independent(&body));
        for i in 0..body.len() {
            if !independent(&body).contains(&i) {
                assert_eq!(out[i], body[i], "seed {seed} index {i}");
            }
        }
        let mut before = body.to_bytes();
        let mut after = out.to_bytes();
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }
}

#[test]
fn false_branch_keeps_second_jump_on_target() {
    // PUSH1 04, JUMP, JUMPDEST, PUSH1 0a, JUMPI, STOP, STOP, STOP, JUMPDEST
    let body = tokenize("6004565b600a570000005b").unwrap();
    let out = FalseBranch
        .apply(&body, &mut ctx(PointSelection::Random))
        .unwrap();

    assert!(out.to_hex().starts_with("600160045760006000575b"));
    let sites = find_jump_sites(&out, 0);
    let last = sites[sites.len() - 1];
    let target = out[last.operand.unwrap()].value() as usize;
    assert!(out[target].is(Opcode::JUMPDEST));
}
