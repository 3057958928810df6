//! Fee-schedule records as read from the data store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One current item of the Medicare Benefits Schedule.
///
/// Field names on the wire match the data-store columns, so the same type is used to
/// decode store responses and to encode search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeeScheduleRecord {
    pub item_code: String,
    pub description: String,
    pub schedule_fee: f64,
    #[serde(rename = "benefit_75_percent")]
    pub benefit_75: f64,
    #[serde(rename = "benefit_85_percent")]
    pub benefit_85: f64,
    pub is_assist_eligible: bool,
    pub is_anaes_eligible: bool,
}

/// A full `mbs_items` row including its effective-dating.
///
/// Only the in-memory store sees rows; remote stores filter on `effective_to` server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MbsItemRow {
    #[serde(flatten)]
    pub record: FeeScheduleRecord,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub item_type: Option<String>,
    pub effective_from: NaiveDate,
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    #[serde(default)]
    pub version_tag: Option<String>,
}

impl MbsItemRow {
    /// A row is current while its effective period is open-ended.
    pub fn is_current(&self) -> bool {
        self.effective_to.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_store_column_names() {
        let json = r#"{
            "item_code": "30175",
            "description": "Fasciotomy",
            "schedule_fee": 380.9,
            "benefit_75_percent": 285.7,
            "benefit_85_percent": 323.8,
            "is_assist_eligible": true,
            "is_anaes_eligible": true
        }"#;
        let record: FeeScheduleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.item_code, "30175");
        assert_eq!(record.benefit_75, 285.7);
        assert!(record.is_assist_eligible);

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["benefit_85_percent"], 323.8);
    }

    #[test]
    fn row_without_end_date_is_current() {
        let json = r#"{
            "item_code": "23",
            "description": "Level B consultation",
            "schedule_fee": 41.4,
            "benefit_75_percent": 31.05,
            "benefit_85_percent": 35.2,
            "is_assist_eligible": false,
            "is_anaes_eligible": false,
            "effective_from": "2024-07-01"
        }"#;
        let mut row: MbsItemRow = serde_json::from_str(json).unwrap();
        assert!(row.is_current());

        row.effective_to = NaiveDate::from_ymd_opt(2025, 6, 30);
        assert!(!row.is_current());
    }
}
