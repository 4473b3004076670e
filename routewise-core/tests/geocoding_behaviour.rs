//! Behavioural tests for [`AddressResolver`] retry and pacing rules.

use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use routewise_core::test_support::{GeocodeReply, ScriptedGeocoder};
use routewise_core::{Address, AddressResolver, GeocodingPolicy, OptimizeError};
use std::cell::RefCell;
use std::time::Duration;
use tokio::runtime::Builder;
use tokio::time::Instant;

const ADDRESS: &str = "12 Harbour Road";
const FOUND: Coord<f64> = Coord { x: -3.19, y: 55.95 };

type GeocoderCell = RefCell<Option<ScriptedGeocoder>>;
type OutcomeCell = RefCell<Option<(Result<Vec<Coord<f64>>, OptimizeError>, Duration)>>;

fn block_on<F>(future: F) -> F::Output
where
    F: std::future::Future,
{
    Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .expect("failed to build Tokio runtime")
        .block_on(future)
}

#[fixture]
fn geocoder() -> GeocoderCell {
    RefCell::new(None)
}

#[fixture]
fn outcome() -> OutcomeCell {
    RefCell::new(None)
}

fn address(text: &str) -> Address {
    Address::new(text).expect("valid address")
}

/// Resolve `texts` with the default policy, recording the virtual time taken.
fn resolve(geocoder: &GeocoderCell, outcome: &OutcomeCell, texts: &[&str]) {
    let guard = geocoder.borrow();
    let scripted = guard.as_ref().expect("geocoder must be initialised");
    let resolver = AddressResolver::new(scripted, GeocodingPolicy::default());
    let addresses: Vec<Address> = texts.iter().map(|text| address(text)).collect();
    *outcome.borrow_mut() = Some(block_on(async {
        let started = Instant::now();
        let result = resolver.resolve_all(&addresses).await;
        (result, started.elapsed())
    }));
}

fn failure(outcome: &OutcomeCell) -> OptimizeError {
    let borrowed = outcome.borrow();
    let (result, _) = borrowed.as_ref().expect("resolution must have run");
    result.clone().expect_err("expected resolution to fail")
}

fn calls(geocoder: &GeocoderCell) -> Vec<String> {
    geocoder
        .borrow()
        .as_ref()
        .expect("geocoder must be initialised")
        .calls()
}

// --- Given steps ---

#[given("a geocoder that times out twice before answering")]
fn flaky(#[from(geocoder)] geocoder: &GeocoderCell) {
    *geocoder.borrow_mut() = Some(ScriptedGeocoder::new().with_script(
        ADDRESS,
        [
            GeocodeReply::Timeout,
            GeocodeReply::Timeout,
            GeocodeReply::Found(FOUND),
        ],
    ));
}

#[given("a geocoder that always times out")]
fn always_slow(#[from(geocoder)] geocoder: &GeocoderCell) {
    *geocoder.borrow_mut() =
        Some(ScriptedGeocoder::new().with_script(ADDRESS, [GeocodeReply::Timeout]));
}

#[given("a geocoder with no match for the address")]
fn no_match(#[from(geocoder)] geocoder: &GeocoderCell) {
    *geocoder.borrow_mut() =
        Some(ScriptedGeocoder::new().with_script(ADDRESS, [GeocodeReply::NotFound]));
}

#[given("a geocoder that knows three addresses")]
fn three_known(#[from(geocoder)] geocoder: &GeocoderCell) {
    *geocoder.borrow_mut() = Some(
        ScriptedGeocoder::new()
            .with_found("North", Coord { x: 0.0, y: 1.0 })
            .with_found("East", Coord { x: 1.0, y: 0.0 })
            .with_found("South", Coord { x: 0.0, y: -1.0 }),
    );
}

// --- When steps ---

#[when("I resolve the address")]
fn resolve_one(#[from(geocoder)] geocoder: &GeocoderCell, #[from(outcome)] outcome: &OutcomeCell) {
    resolve(geocoder, outcome, &[ADDRESS]);
}

#[when("I resolve all three addresses")]
fn resolve_three(
    #[from(geocoder)] geocoder: &GeocoderCell,
    #[from(outcome)] outcome: &OutcomeCell,
) {
    resolve(geocoder, outcome, &["North", "East", "South"]);
}

// --- Then steps ---

#[then("the coordinate is returned")]
fn coordinate_returned(#[from(outcome)] outcome: &OutcomeCell) {
    let borrowed = outcome.borrow();
    let (result, _) = borrowed.as_ref().expect("resolution must have run");
    assert_eq!(result.as_deref(), Ok(&[FOUND][..]));
}

#[then("the geocoder was called 3 times")]
fn called_three_times(#[from(geocoder)] geocoder: &GeocoderCell) {
    assert_eq!(calls(geocoder).len(), 3);
}

#[then("the geocoder was called once")]
fn called_once(#[from(geocoder)] geocoder: &GeocoderCell) {
    assert_eq!(calls(geocoder), [ADDRESS]);
}

#[then("2 seconds passed")]
fn two_seconds(#[from(outcome)] outcome: &OutcomeCell) {
    let borrowed = outcome.borrow();
    let (_, elapsed) = borrowed.as_ref().expect("resolution must have run");
    assert!(
        *elapsed >= Duration::from_secs(2) && *elapsed < Duration::from_millis(2_050),
        "expected about two seconds, got {elapsed:?}"
    );
}

#[then("resolution fails with a geocoding timeout after 3 attempts")]
fn timed_out(#[from(outcome)] outcome: &OutcomeCell) {
    assert_eq!(
        failure(outcome),
        OptimizeError::GeocodingTimeout {
            address: address(ADDRESS),
            attempts: 3,
        }
    );
}

#[then("resolution fails because the address was not found")]
fn not_found(#[from(outcome)] outcome: &OutcomeCell) {
    assert_eq!(
        failure(outcome),
        OptimizeError::AddressNotFound {
            address: address(ADDRESS),
        }
    );
}

#[then("they were looked up in input order")]
fn in_order(#[from(geocoder)] geocoder: &GeocoderCell) {
    assert_eq!(calls(geocoder), ["North", "East", "South"]);
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/geocoding.feature", name = $title)]
        fn $fn_name(geocoder: GeocoderCell, outcome: OutcomeCell) {
            let _ = (geocoder, outcome);
        }
    };
}

register_scenario!(
    recovers_on_third_attempt,
    "a slow geocoder recovers on the third attempt"
);
register_scenario!(never_answers, "a geocoder that never answers in time");
register_scenario!(no_match_found, "an address with no match");
register_scenario!(
    resolves_in_order,
    "addresses are resolved in order with a pause between them"
);
