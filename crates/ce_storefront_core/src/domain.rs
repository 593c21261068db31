//! crates/ce_storefront_core/src/domain.rs
//!
//! Defines the pure, core data structures for the storefront.
//! The cart types are serialized as the persisted cart mirror; the catalog
//! records are serialized as the documents written by the importer.

use serde::{Deserialize, Serialize};

//=========================================================================================
// Cart
//=========================================================================================

/// What kind of product a line item refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Course,
    Package,
}

/// One distinct product entry in the cart, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub state_slug: String,
    #[serde(default)]
    pub state_name: String,
    pub price: f64,
    #[serde(default)]
    pub credit_hours: f64,
    #[serde(default)]
    pub with_textbook: bool,
    #[serde(default)]
    pub textbook_price: f64,
}

impl CartLineItem {
    /// Price of this line including the textbook when it is selected.
    /// True when every amount is finite and not negative.
    pub fn has_valid_amounts(&self) -> bool {
        [self.price, self.credit_hours, self.textbook_price]
            .iter()
            .all(|amount| amount.is_finite() && *amount >= 0.0)
    }

    pub fn line_total(&self) -> f64 {
        if self.with_textbook {
            self.price + self.textbook_price
        } else {
            self.price
        }
    }
}

/// Derived aggregates over the whole cart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub count: usize,
    pub total: f64,
    pub credit_hours: f64,
}

//=========================================================================================
// Catalog import records
//=========================================================================================

/// A row of the "Course List" worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExamCourseRecord {
    #[serde(rename = "rowNum")]
    pub row_num: String,
    #[serde(rename = "examMasterID")]
    pub exam_master_id: String,
    #[serde(rename = "relstoneItem")]
    pub relstone_item: String,
    #[serde(rename = "courseTitle")]
    pub course_title: String,
    #[serde(rename = "masterCertUrl")]
    pub master_cert_url: String,
    #[serde(rename = "qaUrl")]
    pub qa_url: String,
}

/// A single exam question from the "Q&A" worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExamQARecord {
    #[serde(rename = "examMasterID")]
    pub exam_master_id: String,
    #[serde(rename = "examSubTestID")]
    pub exam_sub_test_id: String,
    #[serde(rename = "courseTitle")]
    pub course_title: String,
    #[serde(rename = "courseDesc")]
    pub course_desc: String,
    #[serde(rename = "examDesc")]
    pub exam_desc: String,
    #[serde(rename = "qaUrl")]
    pub qa_url: String,
    #[serde(rename = "questionNum")]
    pub question_num: String,
    pub question: String,
    #[serde(rename = "optionA")]
    pub option_a: String,
    #[serde(rename = "optionB")]
    pub option_b: String,
    #[serde(rename = "optionC")]
    pub option_c: String,
    #[serde(rename = "optionD")]
    pub option_d: String,
    #[serde(rename = "optionE")]
    pub option_e: String,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
    pub explanation: String,
}

/// A state certification row from the "State Cert Tracking" worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExamCertRecord {
    #[serde(rename = "examMasterID")]
    pub exam_master_id: String,
    #[serde(rename = "refNo")]
    pub ref_no: String,
    #[serde(rename = "examSubTestID")]
    pub exam_sub_test_id: String,
    #[serde(rename = "ceHours")]
    pub ce_hours: String,
    #[serde(rename = "dreCertNum")]
    pub dre_cert_num: String,
    #[serde(rename = "courseTitle")]
    pub course_title: String,
    #[serde(rename = "stateCertNum")]
    pub state_cert_num: String,
    #[serde(rename = "certDate")]
    pub cert_date: String,
    #[serde(rename = "certDateLookup")]
    pub cert_date_lookup: String,
    pub state: String,
    #[serde(rename = "creditHrDetails")]
    pub credit_hr_details: String,
}

/// The three destination collections of the catalog import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogCollection {
    Courses,
    QAndA,
    CertTracking,
}

impl CatalogCollection {
    pub const ALL: [CatalogCollection; 3] = [
        CatalogCollection::Courses,
        CatalogCollection::QAndA,
        CatalogCollection::CertTracking,
    ];

    /// The collection name in the document database.
    pub fn name(self) -> &'static str {
        match self {
            CatalogCollection::Courses => "examcourses",
            CatalogCollection::QAndA => "examqanda",
            CatalogCollection::CertTracking => "examcerttracking",
        }
    }
}

impl std::fmt::Display for CatalogCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

//=========================================================================================
// Batch insert results
//=========================================================================================

/// A single document that the store rejected within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertFailure {
    /// Position of the document within its batch.
    pub index: usize,
    pub message: String,
}

/// The outcome of one unordered bulk insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub inserted_count: usize,
    pub failures: Vec<InsertFailure>,
}

/// Per-collection result of an import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionReport {
    pub collection: CatalogCollection,
    pub attempted: usize,
    pub inserted: usize,
    pub failures: Vec<InsertFailure>,
    pub final_count: u64,
}

/// Result of a complete import run, one report per collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub reports: Vec<CollectionReport>,
}

impl ImportSummary {
    pub fn report(&self, collection: CatalogCollection) -> Option<&CollectionReport> {
        self.reports.iter().find(|r| r.collection == collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_includes_textbook_only_when_selected() {
        let mut item = CartLineItem {
            id: "c1".into(),
            name: "Ethics".into(),
            item_type: ItemType::Course,
            state_slug: "ca".into(),
            state_name: "California".into(),
            price: 20.0,
            credit_hours: 4.0,
            with_textbook: false,
            textbook_price: 5.0,
        };
        assert_eq!(item.line_total(), 20.0);
        item.with_textbook = true;
        assert_eq!(item.line_total(), 25.0);
    }

    #[test]
    fn cart_item_defaults_missing_optional_fields() {
        let item: CartLineItem =
            serde_json::from_str(r#"{"id":"p1","name":"Bundle","type":"package","price":99}"#)
                .unwrap();
        assert_eq!(item.item_type, ItemType::Package);
        assert_eq!(item.credit_hours, 0.0);
        assert_eq!(item.textbook_price, 0.0);
        assert!(!item.with_textbook);
        assert!(item.state_slug.is_empty());
    }

    #[test]
    fn records_serialize_with_document_field_names() {
        let record = ExamCertRecord {
            exam_master_id: "7".into(),
            ref_no: "R1".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["examMasterID"], "7");
        assert_eq!(value["refNo"], "R1");
        assert_eq!(value["creditHrDetails"], "");
    }
}
