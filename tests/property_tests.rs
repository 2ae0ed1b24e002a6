//! Property-based tests for rust_sink_logger using proptest

use proptest::prelude::*;
use rust_sink_logger::prelude::*;
use rust_sink_logger::SCOPE_SEPARATOR;
use std::time::Duration;
use tempfile::TempDir;

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Info),
        Just(Severity::Warn),
        Just(Severity::Error),
    ]
}

fn sanitized(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

// ============================================================================
// Severity Tests
// ============================================================================

proptest! {
    /// Display names and file prefixes both parse back to the same severity
    #[test]
    fn test_severity_str_roundtrip(severity in severity_strategy()) {
        prop_assert_eq!(severity.to_str().parse::<Severity>(), Ok(severity));
        prop_assert_eq!(severity.prefix().parse::<Severity>(), Ok(severity));
        prop_assert_eq!(severity.to_str().to_lowercase().parse::<Severity>(), Ok(severity));
    }

    /// Test that Severity ordering matches the numeric value
    #[test]
    fn test_severity_ordering(a in severity_strategy(), b in severity_strategy()) {
        prop_assert_eq!(a.cmp(&b), (a as u8).cmp(&(b as u8)));
    }
}

// ============================================================================
// Event Tests
// ============================================================================

proptest! {
    /// Event text never contains raw line breaks or tabs
    #[test]
    fn test_event_text_single_line(
        text in "[a-z \n\r\t]{0,64}",
        scope in proptest::option::of("[a-z\n]{1,16}"),
    ) {
        let event = Event::new(Severity::Info, &text, scope.as_deref());
        prop_assert!(!event.text().contains(['\n', '\r', '\t']));
        prop_assert_eq!(event.text(), sanitized(&text));
        prop_assert_eq!(event.scope().map(String::from), scope.as_deref().map(sanitized));
    }

    /// JSON output is always valid and carries the event fields
    #[test]
    fn test_json_formatter_valid(
        severity in severity_strategy(),
        text in "\\PC{0,64}",
        scope in proptest::option::of("[a-z]{1,12}"),
    ) {
        let event = Event::new(severity, &text, scope.as_deref());
        let line = JsonFormatter.format(&event);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        prop_assert_eq!(value["severity"].as_str(), Some(severity.to_str()));
        prop_assert_eq!(value["text"].as_str(), Some(event.text()));
        prop_assert_eq!(value.get("scope").and_then(|s| s.as_str()), scope.as_deref());
    }
}

// ============================================================================
// Counter Tests
// ============================================================================

proptest! {
    /// Per-severity counts equal the number of accepted events of that severity
    #[test]
    fn test_counts_match_sequence(severities in prop::collection::vec(severity_strategy(), 0..200)) {
        let sink = ConsoleSink::with_colors(false).with_writer(std::io::sink());
        for severity in &severities {
            sink.log(*severity, "x", None).unwrap();
        }

        for severity in Severity::ALL {
            let expected = severities.iter().filter(|s| **s == severity).count() as u64;
            prop_assert_eq!(sink.count_of(severity), expected);
        }
    }
}

// ============================================================================
// Scope Tests
// ============================================================================

/// Scope `sink` with each label in turn and return the innermost label
fn nested_label(sink: &dyn Sink, labels: &[String]) -> Option<String> {
    match labels.split_first() {
        None => sink.scope_label().map(String::from),
        Some((first, rest)) => {
            let scoped = sink.scope(first).ok()?;
            nested_label(&scoped, rest)
        }
    }
}

proptest! {
    /// Nested scopes join their labels outermost first
    #[test]
    fn test_scope_composition(labels in prop::collection::vec("[a-zA-Z0-9_-]{1,10}", 1..6)) {
        let sink = CompositeSink::builder().build();
        prop_assert_eq!(nested_label(&sink, &labels), Some(labels.join(SCOPE_SEPARATOR)));
    }

    /// An explicit scope replaces the composed label entirely
    #[test]
    fn test_explicit_scope_overrides(outer in "[a-z]{1,8}", inner in "[a-z]{1,8}", explicit in "[A-Z]{1,8}") {
        let temp_dir = TempDir::new().unwrap();
        let log_file = temp_dir.path().join("override.log");
        let sink = FileSink::builder({
            let log_file = log_file.clone();
            move || Some(log_file.clone())
        })
        .flush_interval(Duration::from_secs(3600))
        .formatter(|e: &Event| e.scope().unwrap_or("-").to_string())
        .build()
        .unwrap();

        let scoped = sink.scope(&outer).unwrap();
        let scoped = scoped.scope(&inner).unwrap();
        scoped.info("composed", None).unwrap();
        scoped.info("explicit", Some(&explicit)).unwrap();
        sink.flush().unwrap();

        let content = std::fs::read_to_string(&log_file).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        let composed = format!("{}{}{}", outer, SCOPE_SEPARATOR, inner);
        prop_assert_eq!(lines, vec![composed.as_str(), explicit.as_str()]);
    }
}

// ============================================================================
// File Sink Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every enqueued entry is written once, in order, as one line
    #[test]
    fn test_file_lines_match_entries(texts in prop::collection::vec("[a-z0-9 \n\t]{0,32}", 1..40)) {
        let temp_dir = TempDir::new().unwrap();
        let log_file = temp_dir.path().join("prop.log");
        let sink = FileSink::builder({
            let log_file = log_file.clone();
            move || Some(log_file.clone())
        })
        .flush_interval(Duration::from_secs(3600))
        .formatter(|e: &Event| format!("> {}", e.text()))
        .build()
        .unwrap();

        for text in &texts {
            sink.info(text, None).unwrap();
        }
        prop_assert_eq!(sink.flush_now().entries(), texts.len());

        let content = std::fs::read_to_string(&log_file).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        prop_assert_eq!(lines.len(), texts.len());
        for (line, text) in lines.iter().zip(&texts) {
            prop_assert_eq!(*line, format!("> {}", sanitized(text)));
        }
    }
}
