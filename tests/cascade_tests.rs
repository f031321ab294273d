//! Resolution cascade behaviour against scripted providers.

mod fixtures;

use std::time::Duration;

use pretty_assertions::assert_eq;

use fcl_access::cascade::{CascadeOptions, GeocodingCascade, Resolution, Strategy};
use fcl_access::reverse::AddressComponents;

use fixtures::{Answer, PlaceCall, ScriptedCadastral, ScriptedPlaces};

fn no_delay() -> CascadeOptions {
    CascadeOptions {
        open_provider_delay_ms: 0,
        ..CascadeOptions::default()
    }
}

fn search(query: &str, country: Option<&str>) -> PlaceCall {
    PlaceCall::Search {
        query: query.to_string(),
        country: country.map(str::to_string),
    }
}

#[test]
fn japanese_address_resolves_on_a_simplified_cadastral_candidate() {
    let cadastral = ScriptedCadastral::new().answer("東京都中央区銀座2丁目", Answer::Hit((35.6717, 139.7671)));
    let places = ScriptedPlaces::new();
    let cascade = GeocodingCascade::new(&cadastral, &places, no_delay());

    let resolution = cascade.resolve("東京都中央区銀座2-15-2 銀座ビル5F");

    let result = resolution.resolved().expect("resolved");
    assert_eq!(result.used_candidate, "東京都中央区銀座2丁目");
    assert_eq!(result.strategy, Strategy::Cadastral);
    assert_eq!(result.resolved_address, "東京都中央区銀座2-15-2 銀座ビル5F");
    assert_eq!((result.latitude, result.longitude), (35.6717, 139.7671));

    assert_eq!(
        cadastral.calls(),
        vec!["東京都中央区銀座2丁目15-2", "東京都中央区銀座2丁目15", "東京都中央区銀座2丁目"]
    );
    assert!(places.calls().is_empty(), "open provider must not run after a cadastral hit");
}

#[test]
fn cadastral_errors_fall_through_to_next_candidate() {
    let cadastral = ScriptedCadastral::new()
        .answer("東京都中央区銀座2丁目15-2", Answer::Timeout)
        .answer("東京都中央区銀座2丁目15", Answer::Malformed)
        .answer("東京都中央区銀座2丁目", Answer::Hit((35.6717, 139.7671)));
    let places = ScriptedPlaces::new();
    let cascade = GeocodingCascade::new(&cadastral, &places, no_delay());

    let resolution = cascade.resolve("東京都中央区銀座2-15-2");

    assert_eq!(
        resolution.resolved().map(|r| r.used_candidate.as_str()),
        Some("東京都中央区銀座2丁目")
    );
    assert_eq!(cadastral.calls().len(), 3);
}

#[test]
fn japanese_address_falls_back_to_country_constrained_search() {
    let cadastral = ScriptedCadastral::new();
    let places = ScriptedPlaces::new().answer("神奈川県横浜市鶴見区大黒ふ頭", Some("jp"), Answer::Hit((35.4617, 139.685)));
    let cascade = GeocodingCascade::new(&cadastral, &places, no_delay());

    let resolution = cascade.resolve("神奈川県横浜市鶴見区大黒ふ頭22");

    let result = resolution.resolved().expect("resolved");
    assert_eq!(result.strategy, Strategy::OpenCountry);
    assert_eq!(result.used_candidate, "神奈川県横浜市鶴見区大黒ふ頭");
    assert_eq!(result.resolved_address, "神奈川県横浜市鶴見区大黒ふ頭22");

    // Every cadastral candidate is tried before the first open search.
    assert_eq!(cadastral.calls().len(), 3);
    assert_eq!(
        places.calls(),
        vec![
            search("神奈川県横浜市鶴見区大黒ふ頭22", Some("jp")),
            search("神奈川県横浜市鶴見区大黒ふ頭", Some("jp")),
        ]
    );
}

#[test]
fn romanized_address_tries_candidates_in_order_and_reverse_geocodes() {
    let cadastral = ScriptedCadastral::new();
    let places = ScriptedPlaces::new()
        .answer("Ginza, Chuo-Ku, Tokyo, Japan", Some("jp"), Answer::Hit((35.6717, 139.7671)))
        .reverse_with(AddressComponents {
            region_code: Some("JP-13".to_string()),
            city: Some("中央区".to_string()),
            suburb: Some("銀座".to_string()),
            neighbourhood: Some("二丁目".to_string()),
            ..AddressComponents::default()
        });
    let cascade = GeocodingCascade::new(&cadastral, &places, no_delay());

    let resolution = cascade.resolve("2-15-2, Ginza, Chuo-Ku, Tokyo");

    let result = resolution.resolved().expect("resolved");
    assert_eq!(result.used_candidate, "Ginza, Chuo-Ku, Tokyo, Japan");
    assert_eq!(result.resolved_address, "東京都中央区銀座二丁目2-15-2");

    assert!(cadastral.calls().is_empty(), "romanized input skips the cadastral provider");
    assert_eq!(
        places.calls(),
        vec![
            search("2-15-2, Ginza, Chuo-Ku, Tokyo", Some("jp")),
            search("2-15-2, Ginza, Chuo-Ku, Tokyo, Japan", Some("jp")),
            search("2-15-2, Chuo-Ku, Tokyo, Japan", Some("jp")),
            search("Ginza, Chuo-Ku, Tokyo, Japan", Some("jp")),
            PlaceCall::Reverse((35.6717, 139.7671)),
        ]
    );
}

#[test]
fn romanized_address_keeps_input_when_reverse_lookup_has_nothing() {
    let cadastral = ScriptedCadastral::new();
    let places = ScriptedPlaces::new().answer("Chuo-Ku, Tokyo, Japan", Some("jp"), Answer::Hit((35.67, 139.77)));
    let cascade = GeocodingCascade::new(&cadastral, &places, no_delay());

    let resolution = cascade.resolve("2-15-2, Ginza, Chuo-Ku, Tokyo");

    let result = resolution.resolved().expect("resolved");
    assert_eq!(result.resolved_address, "2-15-2, Ginza, Chuo-Ku, Tokyo");
}

#[test]
fn unconstrained_search_on_raw_input_is_the_last_resort() {
    let cadastral = ScriptedCadastral::new();
    let places = ScriptedPlaces::new().answer("Odaiba Seaside Park", None, Answer::Hit((35.6298, 139.7940)));
    let cascade = GeocodingCascade::new(&cadastral, &places, no_delay());

    let resolution = cascade.resolve("  Odaiba Seaside Park ");

    let result = resolution.resolved().expect("resolved");
    assert_eq!(result.strategy, Strategy::OpenUnconstrained);
    assert_eq!(result.used_candidate, "Odaiba Seaside Park");
    assert_eq!(
        places.calls(),
        vec![
            search("Odaiba Seaside Park", Some("jp")),
            search("Odaiba Seaside Park", None),
        ]
    );
}

#[test]
fn exhausted_plan_is_unresolved_not_zero_coordinates() {
    let cadastral = ScriptedCadastral::new().answer("東京都中央区", Answer::Timeout);
    let places = ScriptedPlaces::new();
    let cascade = GeocodingCascade::new(&cadastral, &places, no_delay());

    assert_eq!(cascade.resolve("東京都中央区銀座2-15-2"), Resolution::Unresolved);
    // 5 cadastral, 5 constrained and 1 unconstrained attempt.
    assert_eq!(cadastral.calls().len(), 5);
    assert_eq!(places.calls().len(), 6);
}

#[test]
fn blank_input_is_unresolved_without_provider_calls() {
    let cadastral = ScriptedCadastral::new();
    let places = ScriptedPlaces::new();
    let cascade = GeocodingCascade::new(&cadastral, &places, no_delay());

    assert_eq!(cascade.resolve(""), Resolution::Unresolved);
    assert_eq!(cascade.resolve("   "), Resolution::Unresolved);
    assert!(cadastral.calls().is_empty());
    assert!(places.calls().is_empty());
}

#[test]
fn invalid_coordinates_are_not_a_resolution() {
    let cadastral = ScriptedCadastral::new().answer("どこか", Answer::Hit((f64::NAN, 139.0)));
    let places = ScriptedPlaces::new().answer("どこか", None, Answer::Hit((35.0, 139.0)));
    let cascade = GeocodingCascade::new(&cadastral, &places, no_delay());

    let result = cascade.resolve("どこか");
    assert_eq!(result.resolved().map(|r| r.strategy), Some(Strategy::OpenUnconstrained));
}

#[test]
fn open_provider_requests_are_spaced() {
    let cadastral = ScriptedCadastral::new();
    let places = ScriptedPlaces::new();
    let options = CascadeOptions {
        open_provider_delay_ms: 50,
        ..CascadeOptions::default()
    };
    let cascade = GeocodingCascade::new(&cadastral, &places, options);

    assert_eq!(cascade.resolve("Somewhere"), Resolution::Unresolved);

    let times = places.call_times();
    assert_eq!(times.len(), 2);
    assert!(times[1].duration_since(times[0]) >= Duration::from_millis(50));
}

#[test]
fn resolved_result_serializes_with_status_tag() {
    let cadastral = ScriptedCadastral::new().answer("東京都中央区", Answer::Hit((35.67, 139.77)));
    let places = ScriptedPlaces::new();
    let cascade = GeocodingCascade::new(&cadastral, &places, no_delay());

    let value = serde_json::to_value(cascade.resolve("東京都中央区")).unwrap();
    assert_eq!(value["status"], "resolved");
    assert_eq!(value["strategy"], "cadastral");
    assert_eq!(value["used_candidate"], "東京都中央区");

    let value = serde_json::to_value(Resolution::Unresolved).unwrap();
    assert_eq!(value, serde_json::json!({"status": "unresolved"}));
}
