use std::{
    collections::HashMap,
    sync::Arc,
    thread,
};

use alloy_consensus::Header;
use alloy_primitives::Address;
use inclusion_list::{
    BlockReconciler,
    ChainSpec,
    ExclusionList,
    InclusionList,
    InclusionListEntry,
    InclusionListValidator,
    MissingInclusion,
    ValidationError,
    VerifierConfig,
    VerifierError,
    test_utils::{
        TxParams,
        eip1559_tx,
        entry_for,
        sequential_list,
        signer,
    },
};

fn parent() -> Header {
    Header {
        number: 100,
        gas_limit: 30_000_000,
        gas_used: 15_000_000,
        base_fee_per_gas: Some(1_000_000_000),
        ..Default::default()
    }
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn verifiers_are_thread_safe() {
    assert_send_sync::<InclusionListValidator>();
    assert_send_sync::<BlockReconciler>();
}

#[test]
fn list_accepted_then_honoured_across_two_blocks() {
    let chain = ChainSpec::default();
    let validator = InclusionListValidator::from_chain_spec(VerifierConfig::default(), &chain).unwrap();
    let reconciler = BlockReconciler::from_chain_spec(&chain);

    let alice = signer(1);
    let bob = signer(2);
    let a0 = eip1559_tx(&alice, TxParams::default());
    let a1 = eip1559_tx(&alice, TxParams { nonce: 1, ..Default::default() });
    let b0 = eip1559_tx(&bob, TxParams { gas_limit: 60_000, ..Default::default() });

    let list = InclusionList::new(
        vec![entry_for(&alice, &a0), entry_for(&bob, &b0), entry_for(&alice, &a1)],
        vec![a0.clone(), b0.clone(), a1.clone()],
    );
    let nonces = HashMap::from([(alice.address(), 0u64), (bob.address(), 0u64)]);
    validator.validate(&list, &parent(), &nonces).expect("list is valid");

    // The parent block already carried bob's transaction.
    let filler = eip1559_tx(&signer(9), TxParams::default());
    let parent_txs = vec![filler.clone(), b0];
    let block = vec![a0, a1, filler];

    assert_eq!(
        reconciler.reconcile(&list, &ExclusionList::new(vec![1]), &parent_txs, &block),
        Ok(())
    );

    // Without the exclusion, bob's obligation is still outstanding and the
    // filler transaction breaks the prefix.
    assert!(matches!(
        reconciler.reconcile(&list, &ExclusionList::default(), &parent_txs, &block),
        Err(ValidationError::MissingInclusionInBlock(MissingInclusion::NoObligation { index: 2, .. }))
    ));
}

#[test]
fn seventeen_entries_are_rejected_before_any_recovery() {
    let validator = InclusionListValidator::from_chain_spec(VerifierConfig::default(), &ChainSpec::default()).unwrap();
    let mut list = sequential_list(&signer(3), 17, 0, |_| TxParams::default());
    for entry in &mut list.summary {
        *entry = InclusionListEntry::new(Address::ZERO, 0);
    }

    let err = validator
        .validate(&list, &parent(), &HashMap::<Address, u64>::new())
        .unwrap_err();
    assert!(matches!(
        err,
        VerifierError::Invalid(ValidationError::SizeExceeded { len: 17, max: 16 })
    ));
}

#[test]
fn concurrent_validation_of_independent_lists() {
    let validator = Arc::new(
        InclusionListValidator::from_chain_spec(VerifierConfig::default(), &ChainSpec::default()).unwrap(),
    );

    let handles: Vec<_> = (1..=4u8)
        .map(|seed| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let list = sequential_list(&signer(seed), 4, 0, |_| TxParams::default());
                validator.validate(&list, &parent(), &HashMap::<Address, u64>::new())
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("thread panicked").is_ok());
    }
}
