use crate::logger::format_line;

use log::{Level, Record};

#[test]
fn given_record_when_formatted_then_level_message_and_location_present() {
    let line = format_line(
        &format_args!("queue created"),
        &Record::builder()
            .args(format_args!("queue created"))
            .level(Level::Warn)
            .file(Some("src/main.rs"))
            .line(Some(42))
            .build(),
    );

    assert!(line.starts_with('['));
    assert!(line.contains(" - WARN] queue created [src/main.rs:42]"));
}

#[test]
fn given_record_without_location_when_formatted_then_unknown_placeholder() {
    let line = format_line(
        &format_args!("hello"),
        &Record::builder()
            .args(format_args!("hello"))
            .level(Level::Info)
            .build(),
    );

    assert!(line.ends_with("hello [unknown:0]"));
}
