//! Export rows — flat, delimiter-joined view of one screening for CSV download.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::screening::ExtractionResult;
use crate::screening::fit_scoring::ScoreBreakdown;

/// Separator used inside list-valued cells.
pub const LIST_SEPARATOR: &str = ";";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer flush failed: {0}")]
    Flush(String),

    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// One exported screening. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub file: String,
    pub score: u32,
    pub resume_years: u32,
    pub jd_years: u32,
    pub emails: String,
    pub phones: String,
    pub skills_matched: String,
    pub skills_missing: String,
}

impl ExportRow {
    pub fn new(file_name: &str, breakdown: &ScoreBreakdown, resume: &ExtractionResult) -> Self {
        Self {
            file: file_name.to_string(),
            score: breakdown.score,
            resume_years: breakdown.resume_years,
            jd_years: breakdown.jd_years,
            emails: resume.emails.join(LIST_SEPARATOR),
            phones: resume.phones.join(LIST_SEPARATOR),
            skills_matched: breakdown.matched_skills.join(LIST_SEPARATOR),
            skills_missing: breakdown.missing_skills.join(LIST_SEPARATOR),
        }
    }
}

/// Header line followed by one record per row.
pub fn to_csv(rows: &[ExportRow]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Download name offered for a screened file.
pub fn export_file_name(file_name: &str) -> String {
    format!("screener_{file_name}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::fit_scoring::score;
    use crate::screening::{extract, SkillVocabulary};

    const JD: &str = "Python, SQL, Docker, 3+ years";
    const RESUME: &str = "a@x.com b@y.org 9876543210 Python and SQL, 5 years";

    fn sample_row() -> ExportRow {
        let breakdown = score(JD, RESUME);
        let resume = extract(RESUME, SkillVocabulary::builtin());
        ExportRow::new("cv.pdf", &breakdown, &resume)
    }

    #[test]
    fn test_row_joins_lists_with_semicolons() {
        let row = sample_row();
        assert_eq!(row.file, "cv.pdf");
        assert_eq!(row.emails, "a@x.com;b@y.org");
        assert_eq!(row.phones, "9876543210");
        assert_eq!(row.skills_matched, "python;sql");
        assert_eq!(row.skills_missing, "docker");
        assert_eq!(row.resume_years, 5);
        assert_eq!(row.jd_years, 3);
    }

    #[test]
    fn test_csv_has_header_and_one_line_per_row() {
        let csv = to_csv(&[sample_row()]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("file,score,resume_years,jd_years,emails,phones,skills_matched,skills_missing")
        );
        let record = lines.next().unwrap();
        assert!(record.starts_with("cv.pdf,"));
        assert!(record.ends_with(",a@x.com;b@y.org,9876543210,python;sql,docker"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_quotes_commas_in_file_name() {
        let mut row = sample_row();
        row.file = "doe, jane.pdf".to_string();
        let csv = to_csv(&[row]).unwrap();
        assert!(csv.contains("\"doe, jane.pdf\""));
    }

    #[test]
    fn test_empty_lists_are_empty_cells() {
        let breakdown = score("", "");
        let row = ExportRow::new("blank.txt", &breakdown, &ExtractionResult::default());
        let csv = to_csv(&[row]).unwrap();
        assert!(csv.lines().nth(1).unwrap().ends_with("5,0,0,,,,"));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("cv.pdf"), "screener_cv.pdf.csv");
    }
}
