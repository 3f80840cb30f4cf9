//! Expected failures registered with `throws`.

use anyhow::{Result, ensure};
use gwt_scenario::{Scenario, ScenarioError, literal, step};
use rstest::rstest;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("insufficient funds: {short} short")]
struct InsufficientFunds {
    short: u32,
}

#[derive(Debug, Error)]
#[error("gateway timed out")]
struct GatewayTimeout;

fn withdraw(balance: u32, amount: u32) -> Result<u32, InsufficientFunds> {
    balance.checked_sub(amount).ok_or(InsufficientFunds {
        short: amount.saturating_sub(balance),
    })
}

fn overdrawn() -> Scenario {
    Scenario::new()
        .given_as("balance", literal(10_u32))
        .given_as("amount", literal(25_u32))
}

#[rstest]
fn a_matching_failure_satisfies_the_expectation() -> Result<()> {
    overdrawn()
        .throws::<InsufficientFunds>()
        .when(step!(|balance: u32, amount: u32| withdraw(balance, amount)))
        .then(|| ())?;
    Ok(())
}

#[rstest]
fn the_message_must_contain_the_expected_text() -> Result<()> {
    overdrawn()
        .throws_with_message::<InsufficientFunds>("15 short")
        .when(step!(|balance: u32, amount: u32| withdraw(balance, amount)))
        .then(|| ())?;

    let outcome = overdrawn()
        .throws_with_message::<InsufficientFunds>("limit reached")
        .when(step!(|balance: u32, amount: u32| withdraw(balance, amount)))
        .then(|| ());
    let err = outcome.err();
    ensure!(
        err.as_ref().map(ToString::to_string).as_deref() == Some("insufficient funds: 15 short"),
        "unexpected outcome: {err:?}"
    );
    Ok(())
}

#[rstest]
fn other_errors_propagate_unchanged() -> Result<()> {
    let outcome = overdrawn()
        .throws::<InsufficientFunds>()
        .when(|| Err::<(), _>(GatewayTimeout))
        .then(|| ());
    let err = outcome.err();
    ensure!(
        err.as_ref().and_then(ScenarioError::downcast_ref::<GatewayTimeout>).is_some(),
        "unexpected outcome: {err:?}"
    );
    Ok(())
}

#[rstest]
fn completing_without_a_failure_is_an_unmet_expectation() {
    let outcome = Scenario::new()
        .throws_with_message::<InsufficientFunds>("short")
        .when(|| 1_u8)
        .then(|| ());
    let err = outcome.err();
    assert!(
        matches!(
            err,
            Some(ScenarioError::ExpectationUnmet { ref expected })
                if expected == "InsufficientFunds containing \"short\""
        ),
        "unexpected outcome: {err:?}"
    );
}

#[rstest]
fn injection_failures_can_be_expected() -> Result<()> {
    Scenario::new()
        .throws::<ScenarioError>()
        .then(step!(|total: u64| total))?;
    Ok(())
}

#[rstest]
fn failures_are_reported_verbatim_without_an_expectation() {
    let outcome = overdrawn()
        .when(step!(|balance: u32, amount: u32| withdraw(balance, amount)))
        .then(|| ());
    let err = outcome.err();
    assert!(
        err.as_ref()
            .and_then(ScenarioError::downcast_ref::<InsufficientFunds>)
            .is_some_and(|funds| funds.short == 15),
        "unexpected outcome: {err:?}"
    );
}
