use anyhow::Context;
use clap::Parser;
use inclusion_list::{
    BlockReconciler,
    InclusionListValidator,
};
use tracing::info;
use tracing_subscriber::{
    EnvFilter,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::{
    cli::{
        Cli,
        Command,
    },
    fixture::{
        Fixture,
        decode_transactions,
    },
};

mod cli;
mod fixture;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Validate(args) => validate(&Fixture::load(&args.fixture)?),
        Command::Reconcile(args) => reconcile(&Fixture::load(&args.fixture)?),
    }
}

/// Runs the standalone validator over the fixture's list.
fn validate(fixture: &Fixture) -> anyhow::Result<()> {
    let validator = InclusionListValidator::from_chain_spec(fixture.config.clone(), &fixture.chain)?;
    let list = fixture.inclusion_list()?;
    let parent = fixture.parent.to_header();

    validator
        .validate(&list, &parent, &fixture.nonces)
        .context("inclusion list rejected")?;

    info!(
        "Inclusion list accepted: entries={}, gas={}, parent={}",
        list.len(),
        list.total_gas(),
        parent.number
    );
    Ok(())
}

/// Validates the list, then reconciles the fixture's block against it. A
/// block is only ever checked against a list that passed validation.
fn reconcile(fixture: &Fixture) -> anyhow::Result<()> {
    let block = fixture
        .block
        .as_ref()
        .context("fixture has no `block` to reconcile")?;

    validate(fixture)?;

    let list = fixture.inclusion_list()?;
    let parent_txs = decode_transactions(&block.parent_transactions).context("block.parentTransactions")?;
    let current_txs = decode_transactions(&block.transactions).context("block.transactions")?;

    BlockReconciler::from_chain_spec(&fixture.chain)
        .reconcile(&list, &block.exclusions, &parent_txs, &current_txs)
        .context("block does not satisfy the inclusion list")?;

    info!(
        "Block satisfies inclusion list: entries={}, excluded={}, block_txs={}",
        list.len(),
        block.exclusions.len(),
        current_txs.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{
        BlockFixture,
        ListFixture,
        ParentHeader,
    };
    use alloy_eips::eip2718::Encodable2718;
    use alloy_primitives::Bytes;
    use inclusion_list::{
        ConfigError,
        ExclusionList,
        ValidationError,
        VerifierError,
        fee::FeeMultiplier,
        test_utils::{
            TxParams,
            eip1559_tx,
            entry_for,
            signer,
        },
    };
    use std::{
        collections::HashMap,
        convert::Infallible,
        io::Write,
    };

    fn fixture_with_nonce(nonce: u64) -> Fixture {
        let alice = signer(1);
        let tx = eip1559_tx(&alice, TxParams::default());
        let raw = Bytes::from(tx.encoded_2718());

        Fixture {
            chain: Default::default(),
            config: Default::default(),
            parent: ParentHeader {
                number: 1,
                gas_limit: 30_000_000,
                gas_used: 15_000_000,
                base_fee_per_gas: Some(1_000_000_000),
            },
            list: ListFixture {
                summary: vec![entry_for(&alice, &tx)],
                transactions: vec![raw.clone()],
            },
            nonces: HashMap::from([(alice.address(), nonce)]),
            block: Some(BlockFixture {
                exclusions: ExclusionList::default(),
                parent_transactions: vec![],
                transactions: vec![raw],
            }),
        }
    }

    #[test]
    fn test_validate_and_reconcile_fixture() {
        let fixture = fixture_with_nonce(0);
        validate(&fixture).unwrap();
        reconcile(&fixture).unwrap();
    }

    #[test]
    fn test_rejection_keeps_typed_cause() {
        let err = validate(&fixture_with_nonce(1)).unwrap_err();
        let cause = err
            .downcast_ref::<VerifierError<Infallible>>()
            .and_then(VerifierError::as_validation)
            .expect("typed validation error");
        assert_eq!(cause.reason(), "incorrect_nonce");
    }

    #[test]
    fn test_invalid_config_is_reported_before_validation() {
        let mut fixture = fixture_with_nonce(0);
        fixture.config.fee_multiplier = FeeMultiplier::new(9, 0);
        let err = validate(&fixture).unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_reconcile_requires_block() {
        let mut fixture = fixture_with_nonce(0);
        fixture.block = None;
        assert!(reconcile(&fixture).is_err());
    }

    #[test]
    fn test_reconcile_reports_unsatisfied_block() {
        let mut fixture = fixture_with_nonce(0);
        if let Some(block) = fixture.block.as_mut() {
            block.transactions.clear();
        }
        let err = reconcile(&fixture).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::MissingInclusionInBlock(_))
        ));
    }

    #[test]
    fn test_load_fixture_from_disk() {
        let fixture = fixture_with_nonce(0);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&fixture).unwrap().as_bytes())
            .unwrap();

        let loaded = Fixture::load(file.path()).unwrap();
        validate(&loaded).unwrap();
        reconcile(&loaded).unwrap();
    }
}
