//! Fakes, acting-as providers, and the test-case entry points.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, ensure};
use gwt_scenario::{
    ActingAs, AuthProvider, AuthProviders, BoxError, Fake, GivenWhenThen, Scenario,
    ScenarioConfig, ScenarioError, SuiteConfig, Value, literal, step,
};
use rstest::{fixture, rstest};
use test_helpers::CallLog;

static MAILER_FAKES: AtomicUsize = AtomicUsize::new(0);

struct Mailer;

impl Fake for Mailer {
    fn fake() {
        MAILER_FAKES.fetch_add(1, Ordering::SeqCst);
    }
}

/// Records every call as `principal@guard:abilities`.
struct Session {
    log: CallLog,
}

impl AuthProvider for Session {
    fn acting_as(
        &self,
        principal: Value,
        abilities: &[String],
        guard: Option<&str>,
    ) -> Result<Value, BoxError> {
        let name = principal
            .downcast_ref::<String>()
            .ok_or("principal must be a String")?;
        self.log.push(format!(
            "{name}@{}:{}",
            guard.unwrap_or("-"),
            abilities.join(",")
        ));
        Ok(principal)
    }
}

#[fixture]
fn log() -> CallLog {
    CallLog::new()
}

fn session_config(log: &CallLog) -> Result<ScenarioConfig> {
    let providers = AuthProviders::new().register("session", Arc::new(Session { log: log.clone() }));
    let suite = SuiteConfig {
        auth_provider: Some(String::from("session")),
        auth_guard: Some(String::from("web")),
        guards: vec![String::from("web"), String::from("api")],
        ..SuiteConfig::default()
    };
    Ok(suite.into_scenario_config(&providers)?)
}

#[rstest]
fn fakes_are_activated_immediately() {
    let before = MAILER_FAKES.load(Ordering::SeqCst);
    let scenario = Scenario::new().fake::<Mailer>();
    assert_eq!(MAILER_FAKES.load(Ordering::SeqCst), before + 1);
    assert_eq!(scenario.pending_conditions(), 0);
}

#[rstest]
fn acting_as_stores_the_principal_as_the_user(log: CallLog) -> Result<()> {
    let scenario = Scenario::with_config(session_config(&log)?).acting_as(String::from("ada"))?;
    ensure!(log.is_empty(), "provider ran before then");

    scenario.then(step!(|user: String| assert_eq!(user, "ada")))?;
    ensure!(log.entries() == ["ada@web:"], "unexpected calls: {:?}", log.entries());
    Ok(())
}

#[rstest]
fn acting_as_with_overrides_key_guard_and_abilities(log: CallLog) -> Result<()> {
    let options = ActingAs::new().key("admin").ability("publish").ability("delete").guard("api");
    Scenario::with_config(session_config(&log)?)
        .acting_as_with(String::from("grace"), options)?
        .then(step!(|admin: String| assert_eq!(admin, "grace")))?;
    ensure!(
        log.entries() == ["grace@api:publish,delete"],
        "unexpected calls: {:?}",
        log.entries()
    );
    Ok(())
}

#[rstest]
fn empty_acting_as_keys_store_the_principal_by_type(log: CallLog) -> Result<()> {
    let scenario = Scenario::with_config(session_config(&log)?)
        .acting_as_with(String::from("ada"), ActingAs::new().key(""))?
        .then(|| ())?;
    let by_type = scenario.store().get_as::<String>("String").map(String::as_str);
    ensure!(by_type == Some("ada"), "principal not stored by type: {by_type:?}");
    ensure!(!scenario.store().contains_key("user"), "user key should stay empty");
    Ok(())
}

#[rstest]
fn acting_as_rejects_undefined_guards(log: CallLog) -> Result<()> {
    let outcome = Scenario::with_config(session_config(&log)?)
        .acting_as_with(String::from("ada"), ActingAs::new().guard("admin"));
    ensure!(
        matches!(outcome, Err(ScenarioError::UnknownGuard { ref guard, .. }) if guard == "admin"),
        "unexpected outcome: {outcome:?}"
    );
    Ok(())
}

#[rstest]
fn provider_failures_fail_the_scenario(log: CallLog) -> Result<()> {
    let outcome = Scenario::with_config(session_config(&log)?)
        .acting_as(42_u32)?
        .then(|| ());
    let message = outcome.err().map(|err| err.to_string());
    ensure!(
        message.as_deref() == Some("principal must be a String"),
        "unexpected outcome: {message:?}"
    );
    Ok(())
}

#[rstest]
fn closures_can_act_as_providers() -> Result<()> {
    let provider = |principal: Value, _abilities: &[String], _guard: Option<&str>| -> Result<Value, BoxError> {
        Ok(principal)
    };
    let providers = AuthProviders::new().register("closure", Arc::new(provider));
    let config = SuiteConfig {
        auth_provider: Some(String::from("closure")),
        ..SuiteConfig::default()
    }
    .into_scenario_config(&providers)?;
    Scenario::with_config(config)
        .acting_as(7_u64)?
        .then(step!(|user: u64| assert_eq!(user, 7)))?;
    Ok(())
}

struct CheckoutTest {
    config: ScenarioConfig,
}

impl GivenWhenThen for CheckoutTest {
    fn scenario_config(&self) -> ScenarioConfig {
        self.config.clone()
    }
}

struct PlainTest;

impl GivenWhenThen for PlainTest {}

#[rstest]
fn test_cases_start_fresh_scenarios(log: CallLog) -> Result<()> {
    let case = CheckoutTest {
        config: session_config(&log)?,
    };
    case.given_as("price", literal(12_u32))
        .when(step!(|price: u32| price * 2))
        .then(step!(|response: u32| assert_eq!(response, 24)))?;

    case.acting_as(String::from("ada"))?
        .then(step!(|user: String| assert_eq!(user, "ada")))?;
    ensure!(case.scenario().store().is_empty(), "scenarios must not share state");
    Ok(())
}

#[rstest]
fn test_cases_use_the_default_configuration_unless_overridden() {
    let outcome = PlainTest.acting_as(String::from("ada"));
    assert!(matches!(outcome, Err(ScenarioError::AuthProviderMissing)));
    assert_eq!(PlainTest.scenario().config().response_key(), "response");
}

#[rstest]
fn test_cases_forward_expectations() -> Result<()> {
    PlainTest
        .throws_with_message::<ScenarioError>("missing argument")
        .then(step!(|total: u64| total))?;
    Ok(())
}
