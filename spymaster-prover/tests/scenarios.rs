use proptest::prelude::*;
use spymaster_circuit::Message;
use spymaster_prover::{
    AttestationKey, ChainBuilder, KeyedTranscriptSystem, ProgramInfo, ProofError, ProvingSystem,
    StepProgram,
};
use spymaster_test_fixtures::{large_valid_batch, random_batch, signed, Scenario, SCENARIOS};

// === Test Fixtures ===

fn sample_program() -> StepProgram<KeyedTranscriptSystem> {
    StepProgram::new(KeyedTranscriptSystem::new(
        AttestationKey::random(),
        ProgramInfo::compile("process-messages").unwrap(),
    ))
}

fn run(program: &StepProgram<KeyedTranscriptSystem>, scenario: &Scenario) {
    let chain = ChainBuilder::new(program).extend(scenario.batch()).unwrap();
    let accepted: Vec<bool> = chain.history().iter().map(|r| r.accepted).collect();
    let expected: Vec<bool> = scenario.messages.iter().map(|(v, _)| *v).collect();
    assert_eq!(accepted, expected, "{}", scenario.name);

    let tip = chain.finish();
    assert_eq!(tip.output(), scenario.expected_highest, "{}", scenario.name);
    assert_eq!(tip.depth(), scenario.messages.len() as u64);
    if !scenario.messages.is_empty() {
        assert!(program.system().verify(&tip), "{}", scenario.name);
    }
}

// === Scenarios ===

#[test]
fn test_fixed_scenarios() {
    let program = sample_program();
    for scenario in SCENARIOS.iter() {
        run(&program, scenario);
    }
}

#[test]
fn test_large_batch() {
    let program = sample_program();
    run(&program, &large_valid_batch(200));
}

#[test]
fn test_random_batches() {
    let program = sample_program();
    for seed in 0..4 {
        run(&program, &random_batch(seed, 40));
    }
}

#[test]
fn test_bootstrapped_chain_matches_plain_chain() {
    let program = sample_program();
    let scenario = spymaster_test_fixtures::mixed_valid_and_invalid();

    let plain = program.fold(scenario.batch()).unwrap();
    let boot = ChainBuilder::bootstrapped(&program)
        .unwrap()
        .extend(scenario.batch())
        .unwrap()
        .finish();

    assert_eq!(plain.output(), boot.output());
    assert_eq!(boot.depth(), plain.depth() + 1);
    assert!(program.system().verify(&boot));
}

#[test]
fn test_attestation_survives_json() {
    let program = sample_program();
    let tip = program
        .fold([signed(1, 100, 1000, 10_000), signed(2, 101, 2000, 11_000)])
        .unwrap();

    let json = serde_json::to_string_pretty(&tip).unwrap();
    let decoded: spymaster_prover::Attestation = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, tip);
    assert!(program.system().verify(&decoded));
}

#[test]
fn test_forged_link_breaks_the_chain() {
    let program = sample_program();
    let first = program.genesis(&signed(1, 100, 1000, 10_000)).unwrap();

    let mut forged = first.clone();
    forged.statement.output = 99;
    let err = program
        .extend(&signed(2, 101, 2000, 11_000), &forged)
        .unwrap_err();
    assert!(matches!(err, ProofError::VerificationFailure(_)));
}

#[test]
fn test_attestation_from_other_program_is_rejected() {
    let program = sample_program();
    let other = StepProgram::new(KeyedTranscriptSystem::new(
        AttestationKey::random(),
        ProgramInfo::compile("another-program").unwrap(),
    ));
    let foreign = other.genesis(&signed(5, 100, 1000, 10_000)).unwrap();
    assert!(program.extend(&signed(6, 100, 1000, 10_000), &foreign).is_err());
}

// === Properties ===

fn message_strategy() -> impl Strategy<Value = Message> {
    (0u64..30, 0u64..3200, 0u64..16_000, 4000u64..21_000, any::<bool>()).prop_map(
        |(n, id, x, y, honest)| {
            if honest {
                signed(n, id, x, y)
            } else {
                Message::new(n, id, x, y, id + x + y + 1)
            }
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_outputs_are_monotonic(messages in prop::collection::vec(message_strategy(), 0..12)) {
        let program = sample_program();
        let chain = ChainBuilder::new(&program).extend(messages.clone()).unwrap();

        let mut prev = 0;
        for (record, message) in chain.history().iter().zip(&messages) {
            prop_assert!(record.output >= prev);
            prop_assert!(record.output == prev || record.output == message.message_number);
            prev = record.output;
        }

        let max_raised = chain
            .history()
            .iter()
            .filter(|r| r.raised)
            .map(|r| r.message_number)
            .max()
            .unwrap_or(0);
        prop_assert_eq!(chain.tip().output(), max_raised);
    }

    #[test]
    fn prop_replaying_a_message_is_inert(messages in prop::collection::vec(message_strategy(), 1..8)) {
        let program = sample_program();
        let tip = program.fold(messages.clone()).unwrap();
        let Some(last) = messages.last() else { return Ok(()); };
        let replayed = program.extend(last, &tip);
        if tip.is_base() {
            prop_assert!(replayed.is_err());
        } else {
            prop_assert_eq!(replayed.unwrap().output(), tip.output());
        }
    }
}
