//! Minimal single-page PDF writer.

use std::fmt::Write as _;

/// A4 portrait, in points.
pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;

/// Built-in Type1 fonts available to every viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// One page of text and rules, serialised on demand.
#[derive(Debug, Clone, Default)]
pub struct PdfDocument {
    title: String,
    content: String,
}

impl PdfDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
        }
    }

    /// Draw `text` with its baseline starting at (`x`, `y`), origin bottom-left.
    pub fn text(&mut self, font: Font, size: f32, x: f32, y: f32, text: &str) -> &mut Self {
        let _ = writeln!(
            self.content,
            "BT /{} {} Tf {} {} Td ({}) Tj ET",
            font.resource(),
            fmt_num(size),
            fmt_num(x),
            fmt_num(y),
            escape_text(text)
        );
        self
    }

    /// Stroke a straight line.
    pub fn rule(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32) -> &mut Self {
        let _ = writeln!(
            self.content,
            "{} w {} {} m {} {} l S",
            fmt_num(width),
            fmt_num(x1),
            fmt_num(y1),
            fmt_num(x2),
            fmt_num(y2)
        );
        self
    }

    /// Stroke a rectangle outline.
    pub fn frame(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        let _ = writeln!(
            self.content,
            "0.8 w {} {} {} {} re S",
            fmt_num(x),
            fmt_num(y),
            fmt_num(width),
            fmt_num(height)
        );
        self
    }

    /// Serialise to PDF bytes. Output depends only on what was drawn.
    pub fn to_bytes(&self) -> Vec<u8> {
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 4 0 R /F2 5 0 R >> >> /Contents 6 0 R >>",
                fmt_num(PAGE_WIDTH),
                fmt_num(PAGE_HEIGHT)
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{}endstream",
                self.content.len(),
                self.content
            ),
            format!(
                "<< /Title ({}) /Producer (railbook) >>",
                escape_text(&self.title)
            ),
        ];

        let mut out: Vec<u8> = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref_at = out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in &offsets {
            let _ = writeln!(xref, "{:010} 00000 n ", offset);
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            objects.len(),
            xref_at
        );
        out.extend_from_slice(xref.as_bytes());
        out
    }
}

/// Whether [`escape_text`] would replace any character of `text` with `?`.
pub(crate) fn loses_characters(text: &str) -> bool {
    !text.is_ascii()
}

/// Escape a string for a PDF literal. Non-ASCII becomes `?`, control
/// characters become spaces.
pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii_control() => out.push(' '),
            c if c.is_ascii() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

fn fmt_num(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<u8> {
        let mut doc = PdfDocument::new("Ticket");
        doc.text(Font::Bold, 18.0, 50.0, 780.0, "Hello (world)")
            .rule(50.0, 770.0, 545.0, 770.0, 1.0)
            .text(Font::Regular, 11.5, 50.0, 750.0, "plain");
        doc.to_bytes()
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn test_header_and_trailer() {
        let bytes = sample();
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let bytes = sample();
        let text = String::from_utf8_lossy(&bytes);

        let xref_at = find(&bytes, b"xref\n").unwrap();
        let startxref: usize = text
            .rsplit("startxref\n")
            .next()
            .and_then(|rest| rest.lines().next())
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(startxref, xref_at);

        let table = &text[text.find("xref\n0 8\n").unwrap()..];
        let entries: Vec<&str> = table.lines().skip(2).take(8).collect();
        assert_eq!(entries[0], "0000000000 65535 f ");
        for (i, entry) in entries.iter().enumerate().skip(1) {
            assert_eq!(entry.len() + 1, 20);
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{} 0 obj", i);
            assert_eq!(&bytes[offset..offset + expected.len()], expected.as_bytes());
        }
    }

    #[test]
    fn test_stream_length_matches_content() {
        let bytes = sample();
        let text = String::from_utf8_lossy(&bytes);
        let start = text.find("stream\n").unwrap() + "stream\n".len();
        let end = text.find("endstream").unwrap();
        let declared: usize = text
            .split("/Length ")
            .nth(1)
            .and_then(|rest| rest.split_whitespace().next())
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(end - start, declared);
    }

    #[test]
    fn test_loses_characters() {
        assert!(!loses_characters("Phoolan Devi (Jr)"));
        assert!(loses_characters("Zoë"));
        assert!(loses_characters("फूलन देवी"));
    }

    #[test]
    fn test_text_is_escaped() {
        let bytes = sample();
        assert!(find(&bytes, b"(Hello \\(world\\)) Tj").is_some());
        assert!(find(&bytes, b"/F2 18 Tf 50 780 Td").is_some());
        assert!(find(&bytes, b"/F1 11.50 Tf").is_some());
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text(r"a\b"), r"a\\b");
        assert_eq!(escape_text("Zoë"), "Zo?");
        assert_eq!(escape_text("tab\there"), "tab here");
    }
}
