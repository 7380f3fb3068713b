//! JUnit XML report parsing.
//!
//! Reads the conventional xunit schema: a `<testsuites>` or `<testsuite>`
//! root with a `name` attribute, arbitrarily nested `<testsuite>` elements,
//! and `<testcase>` leaves carrying `classname`, `name`, and `time` (seconds).
//!
//! Only the root container's name is recorded; nested suite names never
//! contribute to test identity downstream.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while parsing a JUnit XML document.
#[derive(Error, Debug)]
pub enum JunitError {
    #[error("invalid XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("no <testsuites> or <testsuite> root element found")]
    MissingSuiteRoot,
}

/// One test leaf from a report.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub classname: String,
    pub name: String,
    /// Elapsed time in seconds. Missing or unparsable `time` attributes
    /// count as zero, matching common producer behavior for skipped tests.
    pub time_secs: f64,
}

/// A parsed report: the root container's name plus every test leaf found
/// anywhere beneath it.
#[derive(Debug, Clone, Default)]
pub struct JunitReport {
    pub suite_name: String,
    pub cases: Vec<TestCase>,
}

/// Parse a JUnit XML document.
pub fn parse_str(xml: &str) -> Result<JunitReport, JunitError> {
    let mut reader = Reader::from_str(xml);
    let mut suite_name: Option<String> = None;
    let mut cases = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                collect_element(&e, &mut suite_name, &mut cases)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    // A document with no suite container is not a test report.
    let Some(suite_name) = suite_name else {
        return Err(JunitError::MissingSuiteRoot);
    };

    let report = JunitReport { suite_name, cases };
    debug!(
        suite = %report.suite_name,
        cases = report.cases.len(),
        "parsed junit report"
    );
    Ok(report)
}

fn collect_element(
    e: &BytesStart<'_>,
    suite_name: &mut Option<String>,
    cases: &mut Vec<TestCase>,
) -> Result<(), JunitError> {
    match e.local_name().as_ref() {
        b"testsuites" | b"testsuite" => {
            // First container seen is the root; its name (possibly empty)
            // becomes the key prefix for every test in the document.
            if suite_name.is_none() {
                *suite_name = Some(attr_value(e, b"name")?.unwrap_or_default());
            }
        }
        b"testcase" => {
            let classname = attr_value(e, b"classname")?.unwrap_or_default();
            let name = attr_value(e, b"name")?.unwrap_or_default();
            let time_secs = attr_value(e, b"time")?
                .and_then(|raw| raw.trim().parse::<f64>().ok())
                .unwrap_or(0.0);
            cases.push(TestCase {
                classname,
                name,
                time_secs,
            });
        }
        _ => {}
    }
    Ok(())
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, JunitError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == key {
            let value = attr.unescape_value().map_err(quick_xml::Error::from)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
