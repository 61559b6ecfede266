// Tests for output formatting
//
// These tests capture what the writer emits for failure reports and the
// tag vocabulary in each output format.

use super::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, quiet, Box::new(buffer.clone()));
    (writer, buffer)
}

fn reports() -> Vec<FailureReport> {
    vec![FailureReport::new("eco", vec!["tags".into(), "meta".into()])]
}

#[test]
fn test_failure_reports_human() {
    let (mut output, buffer) = writer(OutputFormat::Human, false);
    output.failure_reports(&reports()).unwrap();
    assert_eq!(
        buffer.contents(),
        "✗ eco JSON data with erroneous types\n  - tags\n  - meta\n"
    );
}

#[test]
fn test_failure_reports_human_empty_is_silent() {
    let (mut output, buffer) = writer(OutputFormat::Human, false);
    output.failure_reports(&[]).unwrap();
    assert!(buffer.contents().is_empty());
}

#[test]
fn test_failure_reports_json() {
    let (mut output, buffer) = writer(OutputFormat::Json, false);
    output.failure_reports(&reports()).unwrap();
    assert_eq!(
        buffer.contents(),
        "[{\"label\":\"eco\",\"fields\":[\"tags\",\"meta\"]}]\n"
    );

    let (mut output, buffer) = writer(OutputFormat::Json, false);
    output.failure_reports(&[]).unwrap();
    assert_eq!(buffer.contents(), "[]\n");
}

#[test]
fn test_failure_reports_yaml_round_trips() {
    let (mut output, buffer) = writer(OutputFormat::Yaml, false);
    output.failure_reports(&reports()).unwrap();
    let parsed: Vec<FailureReport> = serde_yaml::from_str(&buffer.contents()).unwrap();
    assert_eq!(parsed, reports());
}

#[test]
fn test_quiet_suppresses_info_but_not_reports() {
    let (mut output, buffer) = writer(OutputFormat::Human, true);
    output.info("checking").unwrap();
    output.success("ok").unwrap();
    assert!(buffer.contents().is_empty());

    output.failure_reports(&reports()).unwrap();
    assert!(buffer.contents().contains("eco JSON data with erroneous types"));
}

#[test]
fn test_tags_human_aligns_columns() {
    let (mut output, buffer) = writer(OutputFormat::Human, false);
    output.tags(&[TypeTag::Str, TypeTag::DictStrDict]).unwrap();
    let contents = buffer.contents();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("str            string"));
    assert!(lines[1].starts_with("dict_str_dict  dict<string, dict>"));
}

#[test]
fn test_tags_json() {
    let (mut output, buffer) = writer(OutputFormat::Json, false);
    output.tags(&[TypeTag::ListOfFloat]).unwrap();
    assert_eq!(
        buffer.contents(),
        "[{\"tag\":\"list_of_float\",\"shape\":\"list<float>\"}]\n"
    );
}
