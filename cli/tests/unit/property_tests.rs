//! Property-based tests for host name validation, template preparation and
//! result encoding.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use runover_cli::domain::format::{OutputFormat, encode_as};
use runover_cli::domain::host::is_valid_hostname;
use runover_cli::domain::template::count_argument_placeholders;
use runover_cli::domain::{HostName, ResultRecord, ResultSet, TemplateError, prepare};

// ============================================================================
// Host name validation
// ============================================================================

fn label() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?"
}

proptest! {
    /// Names built from valid labels are accepted while within 255 bytes.
    #[test]
    fn prop_valid_labels_accepted(labels in prop::collection::vec(label(), 1..5), dot in any::<bool>()) {
        let mut name = labels.join(".");
        if dot {
            name.push('.');
        }
        prop_assert_eq!(is_valid_hostname(&name), name.len() <= 255, "{}", name);
    }

    /// A valid name is stored exactly as given, trailing dot included.
    #[test]
    fn prop_parsed_name_is_verbatim(labels in prop::collection::vec(label(), 1..4), dot in any::<bool>()) {
        let mut name = labels.join(".");
        if dot {
            name.push('.');
        }
        prop_assume!(name.len() <= 255);
        let host = HostName::parse(&name).expect("valid labels");
        prop_assert_eq!(host.as_str(), name.as_str());
    }

    /// Valid labels totalling more than 255 bytes are rejected.
    #[test]
    fn prop_overlong_rejected(extra in 1usize..64) {
        let full = vec!["a".repeat(63); 4].join(".");
        let name = format!("{full}.{}", "b".repeat(extra));
        prop_assert!(!is_valid_hostname(&name));
    }

    /// A character outside `[A-Za-z0-9-.]` anywhere makes the name invalid.
    #[test]
    fn prop_foreign_character_rejected(
        prefix in "[a-z]{1,10}",
        bad in "[^A-Za-z0-9.\\-]",
        suffix in "[a-z]{0,10}",
    ) {
        let name = format!("{prefix}{bad}{suffix}");
        prop_assert!(HostName::parse(&name).is_err(), "accepted {}", name);
    }
}

// ============================================================================
// Template preparation
// ============================================================================

proptest! {
    /// Without `$1` preparation always fails, whatever the arguments.
    #[test]
    fn prop_missing_host_placeholder(
        template in "[a-z $2-9]{0,30}",
        extras in prop::collection::vec("[a-z]{1,5}", 0..7),
    ) {
        prop_assume!(!template.contains("$1"));
        prop_assert_eq!(prepare(&template, &extras), Err(TemplateError::MissingHostPlaceholder));
    }

    /// `k` distinct placeholders `$2..$(k+1)` with `k` arguments (up to eight)
    /// succeed and bind argument `i` to `$(i+2)`.
    #[test]
    fn prop_matching_arguments_substituted(extras in prop::collection::vec("[a-z]{1,8}", 1..=8)) {
        let placeholders: Vec<String> = (0..extras.len()).map(|i| format!("${}", i + 2)).collect();
        let template = format!("cmd $1 {}", placeholders.join(" "));

        let prepared = prepare(&template, &extras).expect("counts match");

        prop_assert_eq!(prepared.as_str(), format!("cmd $1 {}", extras.join(" ")));
    }

    /// Any count mismatch with a non-empty argument list fails.
    #[test]
    fn prop_count_mismatch_rejected(
        placeholder_count in 0usize..8,
        extras in prop::collection::vec("[a-z]{1,5}", 1..=7),
    ) {
        prop_assume!(placeholder_count != extras.len());
        let slots: Vec<&str> = std::iter::repeat_n("$2", placeholder_count).collect();
        let template = format!("run $1 {}", slots.join(" "));
        prop_assert_eq!(count_argument_placeholders(&template), placeholder_count);

        let is_mismatch = matches!(
            prepare(&template, &extras),
            Err(TemplateError::ArgumentPlaceholderMismatch { .. })
        );
        prop_assert!(is_mismatch);
    }
}

// ============================================================================
// Encoding
// ============================================================================

fn result_set(statuses: &[i32]) -> ResultSet {
    statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            (
                HostName::parse(&format!("h{i}")).expect("valid host"),
                ResultRecord::new(*status, format!("out{i}")),
            )
        })
        .collect()
}

proptest! {
    /// `digit` is decided by the last record alone.
    #[test]
    fn prop_digit_follows_last_record(statuses in prop::collection::vec(-2i32..3, 1..20)) {
        let results = result_set(&statuses);
        let expected = if statuses.last() == Some(&0) { "0" } else { "1" };
        prop_assert_eq!(encode_as(&results, OutputFormat::Digit), expected);
    }

    /// `hostlist` holds exactly the failed hosts, in input order.
    #[test]
    fn prop_hostlist_is_failed_hosts(statuses in prop::collection::vec(0i32..3, 0..20)) {
        let results = result_set(&statuses);
        let expected: Vec<String> = statuses
            .iter()
            .enumerate()
            .filter(|(_, s)| **s != 0)
            .map(|(i, _)| format!("h{i}"))
            .collect();
        prop_assert_eq!(encode_as(&results, OutputFormat::HostList), expected.join(","));
    }

    /// `digitlist` has one entry per host.
    #[test]
    fn prop_digitlist_one_entry_per_host(statuses in prop::collection::vec(0i32..256, 1..20)) {
        let results = result_set(&statuses);
        let line = encode_as(&results, OutputFormat::DigitList);
        prop_assert_eq!(line.split(',').count(), statuses.len());
    }
}
