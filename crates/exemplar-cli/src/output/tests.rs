// Tests for output formatting
//
// These tests cover the human layouts for example records, response reports
// and model tables, plus the machine formats.

use super::*;
use exemplar_core::{GeneratedContentType, RenderedExample};
use std::cell::RefCell;
use std::rc::Rc;

/// Writer that keeps everything written to it
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, quiet, Box::new(buffer.clone()));
    (writer, buffer)
}

fn json_record() -> ExampleRecord {
    ExampleRecord::Rendered(RenderedExample {
        content_type: "application/json".to_string(),
        example: Some("{\n  \"id\": 1\n}".to_string()),
        generated_content_type: Some(GeneratedContentType::Json),
        status_code: Some("200".to_string()),
    })
}

#[test]
fn test_examples_human() {
    let formatted = format_examples_human(&[json_record(), ExampleRecord::none()]);
    assert!(formatted.contains("▸ application/json (generated as application/json) [200]"));
    assert!(formatted.contains("\"id\": 1"));
    assert!(formatted.contains("No example available"));
}

#[test]
fn test_examples_json_keeps_wire_shape() {
    let formatted = OutputFormat::Json
        .format_examples(&[json_record(), ExampleRecord::none()])
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&formatted).unwrap();
    assert_eq!(value[0]["contentType"], "application/json");
    assert_eq!(value[0]["generatedContentType"], "JSON");
    assert_eq!(value[0]["statusCode"], "200");
    assert_eq!(value[1], serde_json::json!({"output": "none"}));
}

#[test]
fn test_responses_human() {
    let reports = vec![ResponseReport {
        method: "get".to_string(),
        path: "/pets".to_string(),
        status_code: "200".to_string(),
        examples: vec![json_record()],
    }];
    let formatted = format_responses_human(&reports);
    assert!(formatted.starts_with("═══ GET /pets → 200 ═══"));
    assert!(formatted.contains("application/json"));

    assert_eq!(format_responses_human(&[]), "No responses with examples\n");
}

#[test]
fn test_responses_yaml() {
    let reports = vec![ResponseReport {
        method: "post".to_string(),
        path: "/pets".to_string(),
        status_code: "201".to_string(),
        examples: vec![ExampleRecord::none()],
    }];
    let formatted = OutputFormat::Yaml.format_responses(&reports).unwrap();
    assert!(formatted.contains("statusCode: '201'"));
    assert!(formatted.contains("output: none"));
}

#[test]
fn test_models_table() {
    let (mut output, buffer) = writer(OutputFormat::Human, false);
    output
        .models(&[
            ModelSummary {
                name: "Category".to_string(),
                kind: "object".to_string(),
            },
            ModelSummary {
                name: "Pet".to_string(),
                kind: "object".to_string(),
            },
        ])
        .unwrap();

    let lines: Vec<String> = buffer.contents().lines().map(str::to_string).collect();
    assert_eq!(lines[0], "MODEL    │ KIND");
    assert_eq!(lines[2], "Category │ object");
    assert_eq!(lines[3], "Pet      │ object");
}

#[test]
fn test_models_machine_format() {
    let (mut output, buffer) = writer(OutputFormat::Json, false);
    output
        .models(&[ModelSummary {
            name: "Pet".to_string(),
            kind: "object".to_string(),
        }])
        .unwrap();
    assert_eq!(buffer.contents(), "[{\"name\":\"Pet\",\"kind\":\"object\"}]\n");
}

#[test]
fn test_quiet_suppresses_info_but_not_data() {
    let (mut output, buffer) = writer(OutputFormat::Human, true);
    output.info("Loading document").unwrap();
    output.section("Examples").unwrap();
    output.examples(&[ExampleRecord::none()]).unwrap();
    assert_eq!(buffer.contents(), "No example available\n");
}

#[test]
fn test_info_without_color() {
    let (mut output, buffer) = writer(OutputFormat::Human, false);
    output.info("Loading document").unwrap();
    output.warning("No responses matched").unwrap();
    assert_eq!(
        buffer.contents(),
        "INFO: Loading document\nWARNING: No responses matched\n"
    );
}

#[test]
fn test_messages_skipped_for_machine_formats() {
    let (mut output, buffer) = writer(OutputFormat::Yaml, false);
    output.info("Loading document").unwrap();
    output.warning("No responses matched").unwrap();
    assert!(buffer.contents().is_empty());
}
