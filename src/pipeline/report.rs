//! Reporting sinks - where the settled record goes after every change.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use tracing::info;

use crate::error::ReportError;
use crate::model::Cat;
use crate::model::optics::CatRef;

/// Receives the full record once per settled change.
pub trait Reporter {
    fn report(&self, cat: &CatRef) -> Result<(), ReportError>;
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&self, cat: &CatRef) -> Result<(), ReportError> {
        (**self).report(cat)
    }
}

/// Logs the record as JSON at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, cat: &CatRef) -> Result<(), ReportError> {
        let json = serde_json::to_string(&**cat)?;
        info!(target: "makeshift_vet::report", record = %json, "cat updated");
        Ok(())
    }
}

/// Writes one JSON document per line.
pub struct JsonLinesReporter<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> JsonLinesReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> Reporter for JsonLinesReporter<W> {
    fn report(&self, cat: &CatRef) -> Result<(), ReportError> {
        let mut out = self.out.borrow_mut();
        serde_json::to_writer(&mut *out, &**cat)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}

/// Keeps every reported record. Clones share the same log.
#[derive(Clone, Default)]
pub struct MemoryReporter {
    records: Rc<RefCell<Vec<CatRef>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<CatRef> {
        self.records.borrow().clone()
    }

    pub fn last(&self) -> Option<Cat> {
        self.records.borrow().last().map(|cat| (**cat).clone())
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, cat: &CatRef) -> Result<(), ReportError> {
        self.records.borrow_mut().push(cat.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_cat;

    #[test]
    fn test_json_lines_one_document_per_line() {
        let reporter = JsonLinesReporter::new(Vec::new());
        let cat = default_cat();
        reporter.report(&cat).unwrap();
        reporter.report(&cat).unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["owner"]["firstName"], "Jane");
        assert_eq!(value["info"]["weight"], "10");
        assert_eq!(value["parts"][0]["type"], "leg");
    }

    #[test]
    fn test_memory_reporter_shares_log() {
        let reporter = MemoryReporter::new();
        let handle = reporter.clone();
        reporter.report(&default_cat()).unwrap();
        assert_eq!(handle.len(), 1);
        assert_eq!(handle.last().unwrap().info.name, "Whiskers");
    }

    #[test]
    fn test_log_reporter_accepts_record() {
        assert!(LogReporter.report(&default_cat()).is_ok());
    }
}
