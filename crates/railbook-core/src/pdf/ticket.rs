//! Ticket page layout.

use chrono::NaiveDateTime;
use railbook_protocols::{Gender, TicketRecord};

use super::document::{loses_characters, Font, PdfDocument, PAGE_HEIGHT, PAGE_WIDTH};

const MARGIN: f32 = 56.0;
const LABEL_X: f32 = MARGIN + 16.0;
const VALUE_X: f32 = 240.0;
const ROW_HEIGHT: f32 = 26.0;

fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Male",
        Gender::Female => "Female",
    }
}

/// Record fields the ticket font cannot print in full, by label.
pub(crate) fn degraded_fields(record: &TicketRecord) -> Vec<&'static str> {
    [
        ("passenger name", &record.passenger_name),
        ("age", &record.age),
        ("origin", &record.origin),
        ("destination", &record.destination),
        ("transaction id", &record.transaction_id),
        ("reservation id", &record.reservation_id),
    ]
    .into_iter()
    .filter(|(_, value)| loses_characters(value))
    .map(|(label, _)| label)
    .collect()
}

/// Lay out one passenger's ticket and serialise it.
///
/// `issued_at` is printed on the ticket; the output is otherwise a pure
/// function of the record.
pub fn render_ticket(record: &TicketRecord, issued_at: NaiveDateTime) -> Vec<u8> {
    let mut doc = PdfDocument::new(format!("E-ticket {}", record.reservation_id));
    let top = PAGE_HEIGHT - MARGIN;

    doc.text(Font::Bold, 22.0, MARGIN, top - 22.0, "Electronic Reservation Slip")
        .text(
            Font::Regular,
            11.0,
            MARGIN,
            top - 42.0,
            "Present this slip with a valid photo identity document while travelling.",
        )
        .rule(MARGIN, top - 54.0, PAGE_WIDTH - MARGIN, top - 54.0, 1.5);

    let journey = format!("{}  to  {}", record.origin, record.destination);
    doc.text(Font::Bold, 15.0, MARGIN, top - 84.0, &journey);

    let rows = [
        ("Passenger", record.passenger_name.clone()),
        ("Age", record.age.clone()),
        ("Gender", gender_label(record.gender).to_string()),
        ("From", record.origin.clone()),
        ("To", record.destination.clone()),
        ("Reservation ID (PNR)", record.reservation_id.clone()),
        ("Transaction ID", record.transaction_id.clone()),
    ];

    let table_top = top - 110.0;
    let table_height = ROW_HEIGHT * rows.len() as f32 + 12.0;
    doc.frame(
        MARGIN,
        table_top - table_height,
        PAGE_WIDTH - 2.0 * MARGIN,
        table_height,
    );

    let mut y = table_top - ROW_HEIGHT;
    for (label, value) in &rows {
        doc.text(Font::Regular, 11.0, LABEL_X, y, label)
            .text(Font::Bold, 12.0, VALUE_X, y, value);
        y -= ROW_HEIGHT;
    }

    let footer_y = table_top - table_height - 30.0;
    doc.rule(MARGIN, footer_y + 14.0, PAGE_WIDTH - MARGIN, footer_y + 14.0, 0.5)
        .text(
            Font::Regular,
            9.0,
            MARGIN,
            footer_y,
            &format!("Issued {}", issued_at.format("%d-%m-%Y %H:%M")),
        );

    doc.to_bytes()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record() -> TicketRecord {
        TicketRecord {
            passenger_name: "Phoolan Devi".to_string(),
            age: "45".to_string(),
            gender: Gender::Female,
            origin: "NEW DELHI - NDLS".to_string(),
            destination: "HOWRAH JN - HWH".to_string(),
            transaction_id: "100004".to_string(),
            reservation_id: "5800000".to_string(),
        }
    }

    fn issued() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 22)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap()
    }

    fn contains(bytes: &[u8], needle: &str) -> bool {
        bytes
            .windows(needle.len())
            .any(|w| w == needle.as_bytes())
    }

    #[test]
    fn test_ticket_shows_every_field() {
        let bytes = render_ticket(&record(), issued());
        for needle in [
            "(Phoolan Devi)",
            "(45)",
            "(Female)",
            "(NEW DELHI - NDLS)",
            "(HOWRAH JN - HWH)",
            "(100004)",
            "(5800000)",
            "(Issued 22-04-2024 09:30)",
            "/Title (E-ticket 5800000)",
        ] {
            assert!(contains(&bytes, needle), "missing {}", needle);
        }
    }

    #[test]
    fn test_ticket_is_deterministic() {
        assert_eq!(render_ticket(&record(), issued()), render_ticket(&record(), issued()));
    }

    #[test]
    fn test_ticket_escapes_names() {
        let mut record = record();
        record.passenger_name = "A (Jr) B".to_string();
        let bytes = render_ticket(&record, issued());
        assert!(contains(&bytes, "(A \\(Jr\\) B)"));
    }

    #[test]
    fn test_degraded_fields() {
        assert!(degraded_fields(&record()).is_empty());

        let mut record = record();
        record.passenger_name = "फूलन देवी".to_string();
        record.destination = "Howrah Jñ".to_string();
        assert_eq!(degraded_fields(&record), ["passenger name", "destination"]);

        let bytes = render_ticket(&record, issued());
        assert!(contains(&bytes, "(???? ????)"));
    }
}
