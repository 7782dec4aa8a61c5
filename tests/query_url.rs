use chrono::{Local, NaiveDate, TimeDelta, Utc};
use percent_encoding::percent_decode_str;

use query_builder::config::BuilderConfig;
use query_builder::query::{
    FacilitySet, MessageFilter, QueryFormState, Severity, SeveritySet, StaticParam,
    TimeRangeSpec, build_query_url,
};
use query_builder::timefmt::{FixedClock, TimeUnit, format_timestamp, relative_instant};

fn empty_form(base_url: &str) -> QueryFormState {
    QueryFormState {
        base_url: base_url.to_string(),
        ..QueryFormState::default()
    }
}

/// Splits the query string into raw `(key, value)` pairs.
fn params(url: &str) -> Vec<(String, String)> {
    let Some((_, query)) = url.split_once('?') else {
        return Vec::new();
    };
    query
        .split('&')
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key.to_string(), value.to_string())
        })
        .collect()
}

fn decoded(value: &str) -> String {
    percent_decode_str(value)
        .decode_utf8()
        .expect("valid utf-8")
        .into_owned()
}

#[test]
fn full_scenario_matches_expected_url() {
    let state = QueryFormState {
        base_url: "https://api.timeseries.dev/v1".to_string(),
        time_range: TimeRangeSpec {
            start: "25.100.00.00.00.000".to_string(),
            end: "25.100.01.00.00.000".to_string(),
        },
        facilities: ["facility-alpha"].into_iter().collect(),
        severities: [Severity::Error].into_iter().collect(),
        message: MessageFilter {
            text: "timeout".to_string(),
            is_regex: false,
        },
        static_params: [StaticParam::new("limit", "500", true)].into_iter().collect(),
    };

    assert_eq!(
        build_query_url(&state),
        "https://api.timeseries.dev/v1/?start=25.100.00.00.00.000&end=25.100.01.00.00.000&facility=facility-alpha&s=Error&m=%22timeout%22&limit=500"
    );
}

#[test]
fn no_parameters_yields_bare_base_url() {
    let state = empty_form("http://localhost:8080/api");
    assert_eq!(build_query_url(&state), "http://localhost:8080/api/");
}

#[test]
fn building_is_idempotent() {
    let config = BuilderConfig::default();
    let clock = FixedClock::at(Utc::now());
    let mut state = QueryFormState::new(&config, &clock).expect("default range is valid");
    state.facilities.add("sensor-cluster-1");
    state.message.text = "disk full".to_string();

    assert_eq!(build_query_url(&state), build_query_url(&state));
}

#[test]
fn trailing_slash_is_normalized() {
    for base in ["https://a.example/q", "https://a.example/q/", "x", "x/"] {
        let url = build_query_url(&empty_form(base));
        let expected = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        assert_eq!(url, expected);
        assert!(!url.ends_with("//"));
    }
}

#[test]
fn empty_fields_are_omitted() {
    let mut state = empty_form("http://h");
    state.static_params = [
        StaticParam::new("limit", "500", false),
        StaticParam::new("format", "json", false),
    ]
    .into_iter()
    .collect();
    state.severities = SeveritySet::empty();
    state.message.is_regex = true;

    let url = build_query_url(&state);
    assert_eq!(url, "http://h/");
    for key in ["start=", "end=", "facility=", "s=", "m=", "limit="] {
        assert!(!url.contains(key), "{key} should be absent from {url}");
    }
}

#[test]
fn only_present_time_bounds_are_emitted() {
    let mut state = empty_form("http://h");
    state.time_range.end = "25.001.00.00.00.000".to_string();
    assert_eq!(build_query_url(&state), "http://h/?end=25.001.00.00.00.000");
}

#[test]
fn reserved_characters_round_trip_through_decoding() {
    let tricky = "a&b=c d\"e?f/g#h%i+j";
    let mut state = empty_form("http://h");
    state.facilities = FacilitySet::from_iter([tricky, "ünïcode"]);
    state.static_params = [StaticParam::new("tag", tricky, true)].into_iter().collect();
    state.message = MessageFilter {
        text: tricky.to_string(),
        is_regex: false,
    };

    let pairs = params(&build_query_url(&state));
    let values: Vec<(&str, String)> = pairs
        .iter()
        .map(|(k, v)| (k.as_str(), decoded(v)))
        .collect();

    assert_eq!(
        values,
        vec![
            ("facility", tricky.to_string()),
            ("facility", "ünïcode".to_string()),
            ("m", format!("\"{tricky}\"")),
            ("tag", tricky.to_string()),
        ]
    );
}

#[test]
fn regex_marker_prefixes_decoded_literal() {
    let mut state = empty_form("http://h");
    state.message.text = "^err".to_string();

    state.message.is_regex = true;
    let regex = params(&build_query_url(&state));
    assert_eq!(regex.len(), 1);
    assert_eq!(regex[0].0, "m");
    assert_eq!(decoded(&regex[0].1), "~\"^err\"");

    state.message.is_regex = false;
    let plain = params(&build_query_url(&state));
    assert_eq!(decoded(&plain[0].1), "\"^err\"");
}

#[test]
fn severity_selection_order_does_not_change_output() {
    let mut forward = empty_form("http://h");
    for sev in [Severity::Info, Severity::Warning, Severity::Error] {
        forward.severities.toggle(sev);
    }
    let mut backward = empty_form("http://h");
    for sev in [Severity::Error, Severity::Warning, Severity::Info] {
        backward.severities.toggle(sev);
    }

    assert_eq!(build_query_url(&forward), build_query_url(&backward));
    assert_eq!(build_query_url(&forward), "http://h/?s=INFO&s=Warning&s=Error");
}

#[test]
fn static_params_keep_sequence_order() {
    let mut state = empty_form("http://h");
    state.static_params = [
        StaticParam::new("z", "1", true),
        StaticParam::new("a", "2", true),
        StaticParam::new("m", "3", true),
    ]
    .into_iter()
    .collect();
    state.static_params.toggle_active(1);

    assert_eq!(build_query_url(&state), "http://h/?z=1&m=3");
}

#[test]
fn relative_range_is_exact_with_fixed_clock() {
    let now = NaiveDate::from_ymd_opt(2025, 4, 10)
        .and_then(|d| d.and_hms_milli_opt(1, 0, 0, 0))
        .expect("valid date")
        .and_utc();
    let clock = FixedClock::at(now);

    let range = TimeRangeSpec::relative(&clock, 1, TimeUnit::Hours).expect("in range");
    let start = (now - TimeDelta::hours(1)).with_timezone(&Local);
    assert_eq!(range.start, format_timestamp(&start));
    assert_eq!(range.end, format_timestamp(&now.with_timezone(&Local)));

    assert_eq!(
        relative_instant(&clock, 60, TimeUnit::Minutes),
        relative_instant(&clock, 1, TimeUnit::Hours)
    );
}

#[test]
fn formatted_timestamps_pass_through_verbatim() {
    let now = NaiveDate::from_ymd_opt(2025, 4, 10)
        .and_then(|d| d.and_hms_milli_opt(0, 0, 0, 0))
        .expect("valid date")
        .and_utc();
    let mut state = empty_form("https://api.timeseries.dev/v1");
    state.time_range = TimeRangeSpec {
        start: format_timestamp(&now),
        end: format_timestamp(&(now + TimeDelta::hours(1))),
    };

    assert_eq!(
        build_query_url(&state),
        "https://api.timeseries.dev/v1/?start=25.100.00.00.00.000&end=25.100.01.00.00.000"
    );
}
