use spymaster_contract::{
    ContractError, JsonFileStore, MemoryStore, SettlementContract, SettlementState, StateStore,
};
use spymaster_prover::{AttestationKey, KeyedTranscriptSystem, ProgramInfo, StepProgram};
use spymaster_test_fixtures::{signed, SCENARIOS};

// === Test Fixtures ===

fn sample_system() -> KeyedTranscriptSystem {
    KeyedTranscriptSystem::new(
        AttestationKey::random(),
        ProgramInfo::compile("process-messages").unwrap(),
    )
}

/// Store whose commits always fail.
#[derive(Default)]
struct FailingStore {
    state: Option<SettlementState>,
    armed: bool,
}

impl StateStore for FailingStore {
    fn load(&self) -> Result<Option<SettlementState>, ContractError> {
        Ok(self.state.clone())
    }

    fn commit(&mut self, state: &SettlementState) -> Result<(), ContractError> {
        if self.armed {
            return Err(ContractError::Store("disk full".into()));
        }
        self.state = Some(state.clone());
        Ok(())
    }
}

// === Tests ===

#[test]
fn test_deploy_starts_at_zero() {
    let contract = SettlementContract::deploy(sample_system(), MemoryStore::new()).unwrap();
    assert_eq!(contract.highest_message_number(), 0);
    assert_eq!(
        contract.store().load().unwrap(),
        Some(SettlementState::genesis())
    );
}

#[test]
fn test_settle_scenarios() {
    let system = sample_system();
    let program = StepProgram::new(&system);
    let mut contract = SettlementContract::deploy(&system, MemoryStore::new()).unwrap();

    for scenario in SCENARIOS.iter().filter(|s| !s.messages.is_empty()) {
        let tip = program.fold(scenario.batch()).unwrap();
        let receipt = contract.update_highest_message_number(&tip).unwrap();
        assert_eq!(receipt.current, scenario.expected_highest, "{}", scenario.name);
        assert_eq!(
            contract.highest_message_number(),
            scenario.expected_highest,
            "{}",
            scenario.name
        );
    }
}

#[test]
fn test_base_attestation_is_rejected() {
    let system = sample_system();
    let mut contract = SettlementContract::deploy(&system, MemoryStore::new()).unwrap();

    let empty_tip = StepProgram::new(&system).fold(Vec::new()).unwrap();
    assert!(matches!(
        contract.update_highest_message_number(&empty_tip),
        Err(ContractError::VerificationFailure(_))
    ));
    assert_eq!(contract.highest_message_number(), 0);
    assert_eq!(contract.state().updates, 0);
}

#[test]
fn test_forged_attestation_leaves_state_unchanged() {
    let system = sample_system();
    let program = StepProgram::new(&system);
    let mut contract = SettlementContract::deploy(&system, MemoryStore::new()).unwrap();

    let tip = program.fold([signed(4, 100, 1000, 10_000)]).unwrap();
    contract.update_highest_message_number(&tip).unwrap();

    let mut forged = tip.clone();
    forged.statement.output = 1_000_000;
    assert!(contract.update_highest_message_number(&forged).is_err());
    assert_eq!(contract.highest_message_number(), 4);

    let foreign = StepProgram::new(sample_system())
        .fold([signed(9, 100, 1000, 10_000)])
        .unwrap();
    assert!(contract.update_highest_message_number(&foreign).is_err());
    assert_eq!(contract.highest_message_number(), 4);
}

#[test]
fn test_overwrite_is_unconditional() {
    let system = sample_system();
    let program = StepProgram::new(&system);
    let mut contract = SettlementContract::deploy(&system, MemoryStore::new()).unwrap();

    let high = program.fold([signed(10, 100, 1000, 10_000)]).unwrap();
    let low = program.fold([signed(2, 100, 1000, 10_000)]).unwrap();

    contract.update_highest_message_number(&high).unwrap();
    let receipt = contract.update_highest_message_number(&low).unwrap();
    assert_eq!((receipt.previous, receipt.current), (10, 2));
    assert_eq!(contract.highest_message_number(), 2);
    assert_eq!(receipt.updates, 2);
}

#[test]
fn test_failed_commit_leaves_state_unchanged() {
    let system = sample_system();
    let program = StepProgram::new(&system);
    let store = FailingStore {
        state: Some(SettlementState {
            highest_message_number: 1,
            ..SettlementState::genesis()
        }),
        armed: true,
    };
    let mut contract = SettlementContract::deploy(&system, store).unwrap();

    let tip = program.fold([signed(5, 100, 1000, 10_000)]).unwrap();
    assert!(matches!(
        contract.update_highest_message_number(&tip),
        Err(ContractError::Store(_))
    ));
    assert_eq!(contract.highest_message_number(), 1);
    assert_eq!(
        contract.store().load().unwrap().unwrap().highest_message_number,
        1
    );
}

#[test]
fn test_update_counter_overflow_leaves_state_unchanged() {
    let system = sample_system();
    let program = StepProgram::new(&system);
    let mut store = MemoryStore::new();
    store
        .commit(&SettlementState {
            highest_message_number: 3,
            updates: u64::MAX,
            last_attestation: None,
        })
        .unwrap();
    let mut contract = SettlementContract::deploy(&system, store).unwrap();

    let tip = program.fold([signed(5, 100, 1000, 10_000)]).unwrap();
    assert!(matches!(
        contract.update_highest_message_number(&tip),
        Err(ContractError::InvalidState(_))
    ));
    assert_eq!(contract.highest_message_number(), 3);
    assert_eq!(contract.store().load().unwrap().unwrap().updates, u64::MAX);
}

#[test]
fn test_json_store_survives_redeploy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settlement.json");
    let system = sample_system();
    let program = StepProgram::new(&system);

    {
        let mut contract = SettlementContract::deploy(&system, JsonFileStore::new(&path)).unwrap();
        let tip = program
            .fold(spymaster_test_fixtures::three_valid_messages().batch())
            .unwrap();
        contract.update_highest_message_number(&tip).unwrap();
    }

    let contract = SettlementContract::deploy(&system, JsonFileStore::new(&path)).unwrap();
    assert_eq!(contract.highest_message_number(), 3);
    assert_eq!(contract.state().updates, 1);
    assert!(contract.state().last_attestation.is_some());
}
