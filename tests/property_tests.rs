//! Property-based tests for profile_logger using proptest

use proptest::prelude::*;
use profile_logger::prelude::*;
use profile_logger::sinks::MemorySink;
use profile_logger::LogEntry;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

fn any_encode() -> impl Strategy<Value = LogEncode> {
    prop_oneof![
        Just(LogEncode::Json),
        Just(LogEncode::Console),
        Just(LogEncode::ColorText),
    ]
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel ordering follows the numeric ordinals
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        prop_assert_eq!(level1 < level2, level1.ordinal() < level2.ordinal());
        prop_assert_eq!(level1 == level2, level1.ordinal() == level2.ordinal());
    }

    /// Test that every ordinal in range maps back to its level
    #[test]
    fn test_ordinal_roundtrip(level in any_level()) {
        prop_assert_eq!(LogLevel::from_ordinal(i64::from(level.ordinal())).unwrap(), level);
    }

    /// Test that ordinals outside -1..=3 are rejected
    #[test]
    fn test_ordinal_out_of_range(value in any::<i64>()) {
        let parsed = LogLevel::from_ordinal(value);
        if (-1..=3).contains(&value) {
            prop_assert!(parsed.is_ok());
        } else {
            let is_invalid_level = matches!(parsed, Err(LoggerError::InvalidLevel { .. }));
            prop_assert!(is_invalid_level);
        }
    }

    /// Test that level names parse regardless of case
    #[test]
    fn test_level_name_case_insensitive(level in any_level(), upper in any::<bool>()) {
        let name = if upper {
            level.to_str().to_uppercase()
        } else {
            level.to_str().to_lowercase()
        };
        prop_assert_eq!(name.parse::<LogLevel>().unwrap(), level);
    }
}

// ============================================================================
// Environment Profile Tests
// ============================================================================

proptest! {
    /// Test that any name outside the known set resolves to the fallback
    #[test]
    fn test_unknown_environment_falls_back(name in "[a-zA-Z0-9_-]{0,16}") {
        let known = ["dev", "development", "stg", "staging", "prod", "production"];
        prop_assume!(!known.contains(&name.to_lowercase().as_str()));

        prop_assert_eq!(EnvironmentProfile::resolve(&name), EnvironmentProfile::fallback());
    }

    /// Test that resolution ignores case
    #[test]
    fn test_environment_case_insensitive(
        index in 0usize..6,
        mask in proptest::collection::vec(any::<bool>(), 11),
    ) {
        let known = ["dev", "development", "stg", "staging", "prod", "production"];
        let name = known[index];
        let mixed: String = name
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();

        prop_assert_eq!(EnvironmentProfile::resolve(&mixed), EnvironmentProfile::resolve(name));
    }
}

// ============================================================================
// Option Composition Tests
// ============================================================================

proptest! {
    /// Test that the last level option wins regardless of what came before
    #[test]
    fn test_last_level_wins(levels in proptest::collection::vec(any_level(), 1..8)) {
        let last = *levels.last().unwrap();
        let options: Vec<LoggerOption> = levels.into_iter().map(with_level).collect();

        let logger = Logger::builder()
            .options(options)
            .option(with_output(MemorySink::new()))
            .build()
            .unwrap();
        prop_assert_eq!(logger.level(), last);
    }

    /// Test that the last encode option wins
    #[test]
    fn test_last_encode_wins(encodes in proptest::collection::vec(any_encode(), 1..8)) {
        let last = *encodes.last().unwrap();
        let options: Vec<LoggerOption> = encodes.into_iter().map(with_encode).collect();

        let logger = Logger::builder()
            .options(options)
            .option(with_output(MemorySink::new()))
            .build()
            .unwrap();
        prop_assert_eq!(logger.encode(), last);
        prop_assert_eq!(logger.color_enabled(), last == LogEncode::ColorText);
    }

    /// Test that an entry is written exactly when it meets the threshold
    #[test]
    fn test_threshold_filtering(threshold in any_level(), level in any_level()) {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .option(with_level(threshold))
            .option(with_output(sink.clone()))
            .build()
            .unwrap();

        logger.log(level, "sample");
        prop_assert_eq!(sink.lines().len(), usize::from(level >= threshold));
    }

    /// Test that JSON output never carries ANSI escapes
    #[test]
    fn test_json_never_colored(color in any::<bool>(), level in any_level()) {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .option(with_encode(LogEncode::Json))
            .option(with_color(color))
            .option(with_output(sink.clone()))
            .build()
            .unwrap();

        logger.log(level, "sample");
        prop_assert!(!sink.contents().contains('\x1b'));
    }
}

// ============================================================================
// LogEntry Tests
// ============================================================================

proptest! {
    /// Test that control characters are escaped so every entry stays on one line
    #[test]
    fn test_message_sanitization(message in "[a-z \n\r\t]{0,40}") {
        let entry = LogEntry::new(LogLevel::Info, message.clone());

        prop_assert!(!entry.message.contains('\n'));
        prop_assert!(!entry.message.contains('\r'));
        prop_assert!(!entry.message.contains('\t'));

        if message.contains('\n') {
            prop_assert!(entry.message.contains("\\n"));
        }
        if message.contains('\t') {
            prop_assert!(entry.message.contains("\\t"));
        }
    }

    /// Test that a single emitted JSON entry is exactly one parseable line
    #[test]
    fn test_json_entry_single_line(message in "[a-z \n\r\t\"\\\\]{0,40}") {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .option(with_encode(LogEncode::Json))
            .option(with_output(sink.clone()))
            .build()
            .unwrap();

        logger.info(&message);
        let lines = sink.lines();
        prop_assert_eq!(lines.len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        prop_assert!(parsed["msg"].is_string());
    }
}
