//! Property-based tests using proptest

use proptest::prelude::*;
use rust_log_facade::prelude::*;
use rust_log_facade::{IgnoredFields, Normalizer, DEFAULT_IGNORED_FIELDS};
use serde_json::{json, Map, Value};

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

fn quiet_facade() -> LogFacade {
    LogFacade::new(LoggerConfig::default().with_console(false).with_file(false))
}

// ============================================================================
// LogLevel Properties
// ============================================================================

proptest! {
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(parsed, level);
    }

    #[test]
    fn test_log_level_case_insensitive(level in any_level(), upper in any::<bool>()) {
        let text = if upper {
            level.to_str().to_uppercase()
        } else {
            level.to_str().to_string()
        };
        prop_assert_eq!(text.parse::<LogLevel>().unwrap(), level);
    }

    #[test]
    fn test_permits_matches_rank(threshold in any_level(), level in any_level()) {
        prop_assert_eq!(threshold.permits(level), level.rank() <= threshold.rank());
    }

    #[test]
    fn test_log_level_invalid_parse(invalid in "[0-9_#]{1,12}") {
        prop_assert!(invalid.parse::<LogLevel>().is_err());
    }
}

// ============================================================================
// Normalization Properties
// ============================================================================

fn field_map() -> impl Strategy<Value = Map<String, Value>> {
    let key = prop_oneof![
        Just("password".to_string()),
        Just("secret".to_string()),
        Just("token".to_string()),
        Just("client_secret".to_string()),
        "[a-z]{1,8}",
    ];
    prop::collection::btree_map(key, any::<i64>(), 0..8).prop_map(|fields| {
        fields
            .into_iter()
            .map(|(k, v)| (k, json!(v)))
            .collect()
    })
}

proptest! {
    #[test]
    fn test_ignored_fields_never_survive(maps in prop::collection::vec(field_map(), 0..4)) {
        let record = Normalizer::default().normalize(maps.into_iter().map(LogInput::from));
        for name in DEFAULT_IGNORED_FIELDS {
            prop_assert!(!record.fields.contains_key(name));
        }
    }

    #[test]
    fn test_custom_ignored_list(maps in prop::collection::vec(field_map(), 1..4), list in "[a-z]{1,8}(,[a-z]{1,8}){0,3}") {
        let ignored = IgnoredFields::parse_list(&list);
        let record = Normalizer::new(ignored.clone()).normalize(maps.into_iter().map(LogInput::from));
        for name in ignored.iter() {
            prop_assert!(!record.fields.contains_key(name));
        }
    }

    #[test]
    fn test_emitter_level_always_wins(
        level in any_level(),
        message in ".*",
        with_error in any::<bool>(),
        declared in any_level(),
    ) {
        let log = quiet_facade();
        let mut inputs = vec![
            LogInput::from(message.as_str()),
            LogInput::from(json!({"level": declared.to_str()})),
        ];
        if with_error {
            inputs.push(LogInput::from(ErrorInfo::new("Error", "failed")));
        }

        let record = log.log(level, inputs);
        prop_assert_eq!(record.level, level);
    }

    #[test]
    fn test_last_message_wins(messages in prop::collection::vec(".*", 1..5)) {
        let record = Normalizer::default().normalize(messages.iter().map(String::as_str));
        prop_assert_eq!(record.message(), messages.last().map(String::as_str));
    }

    #[test]
    fn test_json_output_has_fixed_top_level(fields in field_map(), level in any_level()) {
        let mut record = Normalizer::default().normalize([LogInput::from(fields)]);
        record.level = level;

        let value: Value = serde_json::from_str(
            &OutputFormat::Json.format(&record, &TimestampFormat::default()),
        ).unwrap();
        let object = value.as_object().unwrap();

        prop_assert_eq!(&object["level"], &json!(level.to_str()));
        for key in object.keys() {
            prop_assert!(
                ["level", "message", "timestamp", "correlation", "event", "label", "tags", "metadata"]
                    .contains(&key.as_str())
            );
        }
        if let Some(metadata) = object.get("metadata") {
            prop_assert!(!metadata.as_object().unwrap().is_empty());
        }
    }
}

// ============================================================================
// Appender Properties
// ============================================================================

proptest! {
    #[test]
    fn test_console_render_no_panic(message in ".*", level in any_level(), colors in any::<bool>()) {
        let appender = ConsoleAppender::with_colors(colors).with_output_format(OutputFormat::Text);
        let record = LogRecord::new(level).with_message(message);
        let line = appender.render(&record);
        prop_assert!(!line.contains('\n'));
    }
}
