//! Minimal DOCX text reader: text runs of the headers, the body and the footers.

use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

const DOCUMENT_PART: &str = "word/document.xml";
/// Upper bound on each inflated XML part.
const MAX_PART_XML_BYTES: u64 = 64 * 1024 * 1024;

static HEADER_FOOTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^word/(header|footer)[0-9]*\.xml$").expect("part pattern is valid")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#x[0-9A-Fa-f]+|#[0-9]+|lt|gt|amp|quot|apos);").expect("entity pattern is valid")
});

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("not a DOCX archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("archive has no word/document.xml")]
    MissingDocument,

    #[error("DOCX part is unreadable: {0}")]
    Io(#[from] std::io::Error),
}

/// Headers first, then the body, then footers; each part in archive order.
/// Contact details often live in the page header, so it is never skipped.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, DocxError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    if !names.iter().any(|name| name == DOCUMENT_PART) {
        return Err(DocxError::MissingDocument);
    }

    let parts = names
        .iter()
        .filter(|name| part_kind(name) == Some("header"))
        .chain(names.iter().filter(|name| *name == DOCUMENT_PART))
        .chain(names.iter().filter(|name| part_kind(name) == Some("footer")));

    let mut texts = Vec::new();
    for name in parts {
        let mut xml = String::new();
        archive
            .by_name(name)?
            .take(MAX_PART_XML_BYTES)
            .read_to_string(&mut xml)?;
        texts.push(document_xml_to_text(&xml));
    }
    Ok(texts.join("\n"))
}

fn part_kind(name: &str) -> Option<&str> {
    HEADER_FOOTER_RE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|kind| kind.as_str())
}

/// Keeps character data inside `<w:t>` runs; paragraph ends and breaks become
/// newlines, `<w:tab/>` inside a `<w:r>` a tab (tab-stop definitions are skipped).
pub fn document_xml_to_text(xml: &str) -> String {
    let mut text = String::with_capacity(xml.len() / 4);
    let mut in_run = false;
    let mut in_text = false;
    let mut cursor = 0;

    for tag in TAG_RE.find_iter(xml) {
        if in_text {
            text.push_str(&unescape(&xml[cursor..tag.start()]));
        }
        cursor = tag.end();

        let inner = tag.as_str().trim_start_matches('<').trim_end_matches('>');
        let closing = inner.starts_with('/');
        let self_closing = inner.ends_with('/');
        let name = inner
            .trim_start_matches('/')
            .trim_end_matches('/')
            .split_whitespace()
            .next()
            .unwrap_or_default();

        match (name, closing) {
            ("w:r", false) => in_run = !self_closing,
            ("w:r", true) => in_run = false,
            ("w:t", false) => in_text = !self_closing,
            ("w:t", true) => in_text = false,
            ("w:p", true) => text.push('\n'),
            ("w:tab", false) if in_run => text.push('\t'),
            ("w:br" | "w:cr", false) => text.push('\n'),
            _ => {}
        }
    }
    text
}

fn unescape(raw: &str) -> std::borrow::Cow<'_, str> {
    ENTITY_RE.replace_all(raw, |caps: &Captures<'_>| {
        let entity = &caps[1];
        match entity {
            "lt" => "<".to_string(),
            "gt" => ">".to_string(),
            "amp" => "&".to_string(),
            "quot" => "\"".to_string(),
            "apos" => "'".to_string(),
            _ => numeric_entity(entity).unwrap_or_else(|| caps[0].to_string()),
        }
    })
}

fn numeric_entity(entity: &str) -> Option<String> {
    let code = match entity.strip_prefix("#x") {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => entity.strip_prefix('#')?.parse().ok()?,
    };
    char::from_u32(code).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::{SimpleFileOptions, ZipWriter};

    const XML: &str = r#"<?xml version="1.0"?><w:document><w:body><w:p><w:r><w:t>Jane Roe</w:t></w:r></w:p><w:p><w:r><w:t xml:space="preserve">Python </w:t><w:tab/><w:t>R&amp;D &lt;5 years&gt;</w:t></w:r></w:p><w:tbl><w:tr/></w:tbl></w:body></w:document>"#;

    fn paragraph(text: &str) -> String {
        format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
    }

    fn build_archive(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, xml) in parts {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn build_docx(xml: &str) -> Vec<u8> {
        build_archive(&[(DOCUMENT_PART, xml)])
    }

    #[test]
    fn test_xml_runs_and_paragraphs() {
        assert_eq!(
            document_xml_to_text(XML),
            "Jane Roe\nPython \tR&D <5 years>\n"
        );
    }

    #[test]
    fn test_tab_stop_definitions_are_not_text() {
        let xml = r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t></w:r></w:p>"#;
        assert_eq!(document_xml_to_text(xml), "A\tB\n");
    }

    #[test]
    fn test_headers_and_footers_are_read_around_the_body() {
        let bytes = build_archive(&[
            ("word/footer1.xml", paragraph("B.Tech").as_str()),
            (DOCUMENT_PART, paragraph("Python 5 years").as_str()),
            ("word/header1.xml", paragraph("jane@roe.dev 9876543210").as_str()),
            ("word/styles.xml", paragraph("ignored").as_str()),
        ]);
        let text = extract_docx_text(&bytes).unwrap();
        assert_eq!(text, "jane@roe.dev 9876543210\n\nPython 5 years\n\nB.Tech\n");

        let contacts = crate::screening::contact::extract_contacts(&text);
        assert_eq!(contacts.emails, vec!["jane@roe.dev"]);
        assert_eq!(contacts.phones, vec!["9876543210"]);
    }

    #[test]
    fn test_text_outside_runs_is_ignored() {
        let xml = "<w:p><w:pPr>Heading1</w:pPr><w:r><w:t>Body</w:t></w:r></w:p>";
        assert_eq!(document_xml_to_text(xml), "Body\n");
    }

    #[test]
    fn test_numeric_entities() {
        assert_eq!(unescape("caf&#233; &#x263A;"), "café ☺");
        assert_eq!(unescape("&#xZZ;"), "&#xZZ;");
    }

    #[test]
    fn test_extracts_from_archive() {
        let bytes = build_docx(XML);
        let text = extract_docx_text(&bytes).unwrap();
        assert!(text.starts_with("Jane Roe\n"));
    }

    #[test]
    fn test_archive_without_document_part() {
        let bytes = build_archive(&[("word/header1.xml", paragraph("Header only").as_str())]);

        assert!(matches!(
            extract_docx_text(&bytes),
            Err(DocxError::MissingDocument)
        ));
    }
}
