//! Filesystem ticket emitter.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Local;
use railbook_protocols::{ArtifactEmitter, ArtifactError, TicketRecord};
use tracing::{debug, warn};

use super::ticket::{degraded_fields, render_ticket};

/// File name for a passenger's ticket.
///
/// Lowercase ASCII alphanumerics are kept, every other run of characters
/// becomes a single `_`.
pub fn ticket_file_name(passenger_name: &str) -> String {
    let mut slug = String::with_capacity(passenger_name.len());
    for c in passenger_name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    let slug = if slug.is_empty() { "passenger" } else { slug };
    format!("{}_ticket.pdf", slug)
}

/// Writes one PDF per passenger into an output directory.
pub struct PdfTicketEmitter {
    output_dir: PathBuf,
}

impl PdfTicketEmitter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[async_trait]
impl ArtifactEmitter for PdfTicketEmitter {
    async fn emit(&self, record: &TicketRecord) -> Result<PathBuf, ArtifactError> {
        if record.passenger_name.trim().is_empty() {
            return Err(ArtifactError::InvalidRecord("passenger name is empty".to_string()));
        }
        if record.reservation_id.is_empty() || record.transaction_id.is_empty() {
            return Err(ArtifactError::InvalidRecord(format!(
                "receipt ids missing for {}",
                record.passenger_name
            )));
        }

        for field in degraded_fields(record) {
            warn!(
                "Ticket for {}: {} has characters the PDF font cannot show, printed as '?'",
                record.passenger_name, field
            );
        }

        let bytes = render_ticket(record, Local::now().naive_local());

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(ticket_file_name(&record.passenger_name));
        tokio::fs::write(&path, &bytes).await?;

        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use railbook_protocols::Gender;

    use super::*;

    fn record(name: &str) -> TicketRecord {
        TicketRecord {
            passenger_name: name.to_string(),
            age: "50".to_string(),
            gender: Gender::Male,
            origin: "NEW DELHI - NDLS".to_string(),
            destination: "HOWRAH JN - HWH".to_string(),
            transaction_id: "100004".to_string(),
            reservation_id: "5800000".to_string(),
        }
    }

    #[test]
    fn test_ticket_file_name() {
        assert_eq!(ticket_file_name("Ghansidas Pandey"), "ghansidas_pandey_ticket.pdf");
        assert_eq!(ticket_file_name("  O'Brien,  Jr. "), "o_brien_jr_ticket.pdf");
        assert_eq!(ticket_file_name("../../etc"), "etc_ticket.pdf");
        assert_eq!(ticket_file_name("Zoë"), "zo_ticket.pdf");
        assert_eq!(ticket_file_name("***"), "passenger_ticket.pdf");
    }

    #[tokio::test]
    async fn test_emit_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = PdfTicketEmitter::new(dir.path().join("tickets"));

        let path = emitter.emit(&record("Ghansidas Pandey")).await.unwrap();

        assert_eq!(path, dir.path().join("tickets").join("ghansidas_pandey_ticket.pdf"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    #[tokio::test]
    async fn test_same_name_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = PdfTicketEmitter::new(dir.path());

        let first = emitter.emit(&record("Asha Rani")).await.unwrap();
        let mut second_record = record("Asha Rani");
        second_record.age = "77".to_string();
        let second = emitter.emit(&second_record).await.unwrap();

        assert_eq!(first, second);
        let bytes = std::fs::read(&second).unwrap();
        assert!(bytes.windows(4).any(|w| w == b"(77)"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = PdfTicketEmitter::new(dir.path());

        let err = emitter.emit(&record("   ")).await.unwrap_err();
        assert!(matches!(err, ArtifactError::InvalidRecord(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_unwritable_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let emitter = PdfTicketEmitter::new(blocker.join("tickets"));

        let err = emitter.emit(&record("Asha Rani")).await.unwrap_err();
        assert!(matches!(err, ArtifactError::Io(_)));
    }
}
