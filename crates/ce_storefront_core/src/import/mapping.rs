//! Row-to-record mapping for the three catalog worksheets.

use super::query::query_params;
use super::ImportError;
use crate::domain::{ExamCertRecord, ExamCourseRecord, ExamQARecord};
use crate::workbook::{CellValue, SheetRow, Worksheet};

/// Stringifies and trims a cell; absent cells become the empty string.
pub fn clean(value: Option<&CellValue>) -> String {
    value
        .map(|v| v.to_string().trim().to_string())
        .unwrap_or_default()
}

fn field(row: &SheetRow, header: &str) -> String {
    clean(row.get(header))
}

//=========================================================================================
// Course List
//=========================================================================================

pub fn course_record(row: &SheetRow) -> ExamCourseRecord {
    ExamCourseRecord {
        row_num: field(row, "RowNum"),
        exam_master_id: field(row, "ExamMasterID"),
        relstone_item: field(row, "RelstoneItem"),
        course_title: field(row, "CourseTitle"),
        master_cert_url: field(row, "MasterCertURL"),
        qa_url: field(row, "QA_URL"),
    }
}

//=========================================================================================
// Q&A
//=========================================================================================

pub fn qa_record(row: &SheetRow) -> ExamQARecord {
    let qa_url = field(row, "QA_URL");
    let params = query_params(&qa_url);
    let param = |name: &str| {
        params
            .get(name)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    ExamQARecord {
        exam_master_id: field(row, "ExamMasterID"),
        exam_sub_test_id: param("ExamSubTestID"),
        course_title: field(row, "CourseTitle"),
        course_desc: param("courseDescription"),
        exam_desc: param("ExamDescription"),
        qa_url,
        question_num: field(row, "QuestionNum"),
        question: field(row, "Question"),
        option_a: field(row, "OptionA"),
        option_b: field(row, "OptionB"),
        option_c: field(row, "OptionC"),
        option_d: field(row, "OptionD"),
        option_e: field(row, "OptionE"),
        correct_answer: field(row, "CorrectAnswer"),
        explanation: field(row, "Explanation"),
    }
}

//=========================================================================================
// State Cert Tracking
//=========================================================================================

/// First-cell values that mark an embedded sub-table header rather than data.
pub const CERT_HEADER_MARKERS: [&str; 2] = ["refNo", "ExamMasterID"];

/// Positions within a cert row's own present-cell list.
///
/// The cert sheet repeats header blocks, so its columns cannot be addressed by
/// header text. The offsets were read off the sheet layout and are not derived
/// from any schema; a layout change in the source sheet silently shifts fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertField {
    ExamMasterId,
    RefNo,
    ExamSubTestId,
    CeHours,
    DreCertNum,
    CourseTitle,
    StateCertNum,
    CertDate,
    CertDateLookup,
    State,
    CreditHrDetails,
}

pub const CERT_COLUMNS: [(usize, CertField); 11] = [
    (0, CertField::ExamMasterId),
    (1, CertField::RefNo),
    (2, CertField::ExamSubTestId),
    (3, CertField::CeHours),
    (4, CertField::DreCertNum),
    (5, CertField::CourseTitle),
    (6, CertField::StateCertNum),
    (7, CertField::CertDate),
    (8, CertField::CertDateLookup),
    (9, CertField::State),
    (10, CertField::CreditHrDetails),
];

/// Checks once that the sheet is at least as wide as the positional table expects.
pub fn validate_cert_shape(sheet: &Worksheet) -> Result<(), ImportError> {
    let required = CERT_COLUMNS
        .iter()
        .map(|(index, _)| index + 1)
        .max()
        .unwrap_or(0);
    if sheet.headers.len() < required {
        return Err(ImportError::SheetShape {
            sheet: sheet.name.clone(),
            expected: required,
            found: sheet.headers.len(),
        });
    }
    Ok(())
}

/// Maps a cert row, or `None` for blank rows and repeated sub-table headers.
///
/// `first_header` is the key of the sheet's first column. It is looked up by key
/// because blank cells are absent from `row`, so position 0 may hold a later column.
pub fn cert_record(first_header: &str, row: &SheetRow) -> Option<ExamCertRecord> {
    let first = clean(row.get(first_header));
    if first.is_empty() || CERT_HEADER_MARKERS.contains(&first.as_str()) {
        return None;
    }

    let mut record = ExamCertRecord::default();
    for (index, cert_field) in CERT_COLUMNS {
        let value = clean(row.nth(index));
        let slot = match cert_field {
            CertField::ExamMasterId => &mut record.exam_master_id,
            CertField::RefNo => &mut record.ref_no,
            CertField::ExamSubTestId => &mut record.exam_sub_test_id,
            CertField::CeHours => &mut record.ce_hours,
            CertField::DreCertNum => &mut record.dre_cert_num,
            CertField::CourseTitle => &mut record.course_title,
            CertField::StateCertNum => &mut record.state_cert_num,
            CertField::CertDate => &mut record.cert_date,
            CertField::CertDateLookup => &mut record.cert_date_lookup,
            CertField::State => &mut record.state,
            CertField::CreditHrDetails => &mut record.credit_hr_details,
        };
        *slot = value;
    }
    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> SheetRow {
        SheetRow {
            cells: cells
                .iter()
                .map(|(h, v)| (h.to_string(), CellValue::from(*v)))
                .collect(),
        }
    }

    #[test]
    fn clean_trims_and_stringifies() {
        assert_eq!(clean(None), "");
        assert_eq!(clean(Some(&CellValue::from("  Life  "))), "Life");
        assert_eq!(clean(Some(&CellValue::Number(12.0))), "12");
        assert_eq!(clean(Some(&CellValue::Bool(false))), "false");
    }

    #[test]
    fn course_row_maps_by_header_and_defaults_missing_columns() {
        let record = course_record(&row(&[
            ("RowNum", "1"),
            ("ExamMasterID", " 7 "),
            ("CourseTitle", "Annuities"),
        ]));
        assert_eq!(record.row_num, "1");
        assert_eq!(record.exam_master_id, "7");
        assert_eq!(record.course_title, "Annuities");
        assert_eq!(record.qa_url, "");
        assert_eq!(record.relstone_item, "");
    }

    #[test]
    fn qa_row_pulls_fields_from_url() {
        let record = qa_record(&row(&[
            ("ExamMasterID", "7"),
            (
                "QA_URL",
                "examqandalist.php?examMasterID=7&ExamSubTestID=3&courseDescription=Life+Insurance&ExamDescription=Final+Exam",
            ),
            ("Question", "What is a premium?"),
            ("CorrectAnswer", "B"),
        ]));
        assert_eq!(record.exam_sub_test_id, "3");
        assert_eq!(record.course_desc, "Life Insurance");
        assert_eq!(record.exam_desc, "Final Exam");
        assert_eq!(record.question, "What is a premium?");
        assert_eq!(record.option_e, "");
    }

    #[test]
    fn qa_row_with_bad_url_leaves_url_fields_empty() {
        let record = qa_record(&row(&[("QA_URL", "list.php?ExamSubTestID=%zz")]));
        assert_eq!(record.exam_sub_test_id, "");
        assert_eq!(record.course_desc, "");
        assert_eq!(record.exam_desc, "");
        assert_eq!(record.qa_url, "list.php?ExamSubTestID=%zz");
    }

    #[test]
    fn cert_rows_map_by_position_not_header() {
        let cells: Vec<(String, String)> = (0..11)
            .map(|i| (format!("Col{}", i), format!("v{}", i)))
            .collect();
        let pairs: Vec<(&str, &str)> = cells
            .iter()
            .map(|(h, v)| (h.as_str(), v.as_str()))
            .collect();
        let record = cert_record("Col0", &row(&pairs)).unwrap();
        assert_eq!(record.exam_master_id, "v0");
        assert_eq!(record.ref_no, "v1");
        assert_eq!(record.state, "v9");
        assert_eq!(record.credit_hr_details, "v10");
    }

    #[test]
    fn cert_header_repeats_and_blank_first_cells_are_skipped() {
        assert!(cert_record("A", &row(&[("A", "refNo"), ("B", "x")])).is_none());
        assert!(cert_record("A", &row(&[("A", "ExamMasterID"), ("B", "x")])).is_none());
        assert!(cert_record("A", &row(&[("A", "   "), ("B", "x")])).is_none());
        assert!(cert_record("A", &SheetRow::default()).is_none());
        assert!(cert_record("A", &row(&[("A", "12")])).is_some());
    }

    #[test]
    fn cert_row_with_blank_first_column_is_skipped() {
        let mut grid: Vec<Vec<Option<CellValue>>> =
            vec![(0..11).map(|i| Some(CellValue::from(format!("H{}", i).as_str()))).collect()];
        let mut data = vec![None];
        data.extend((1..11).map(|i| Some(CellValue::from(format!("v{}", i).as_str()))));
        grid.push(data);
        let sheet = Worksheet::from_grid("State Cert Tracking", grid);

        assert_eq!(sheet.rows.len(), 1);
        assert!(cert_record(&sheet.headers[0], &sheet.rows[0]).is_none());
    }

    #[test]
    fn narrow_cert_sheet_fails_validation() {
        let sheet = Worksheet {
            name: "State Cert Tracking".into(),
            headers: vec!["ExamMasterID".into(), "refNo".into()],
            rows: Vec::new(),
        };
        let err = validate_cert_shape(&sheet).unwrap_err();
        assert!(matches!(
            err,
            ImportError::SheetShape {
                expected: 11,
                found: 2,
                ..
            }
        ));
    }
}
