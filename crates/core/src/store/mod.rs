//! Data-store implementations of [`crate::lookup::FeeScheduleStore`].
//!
//! - `postgrest`: the hosted schedule, queried over HTTP.
//! - `memory`: rows held in process, with the same matching rules.

pub mod memory;
pub mod postgrest;

pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;

#[cfg(test)]
pub(crate) fn test_row(item_code: &str, description: &str, schedule_fee: f64) -> crate::MbsItemRow {
    crate::MbsItemRow {
        record: crate::FeeScheduleRecord {
            item_code: item_code.into(),
            description: description.into(),
            schedule_fee,
            benefit_75: schedule_fee * 0.75,
            benefit_85: schedule_fee * 0.85,
            is_assist_eligible: false,
            is_anaes_eligible: false,
        },
        category: None,
        sub_category: None,
        item_type: None,
        effective_from: chrono::NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid date"),
        effective_to: None,
        version_tag: None,
    }
}

/// A small slice of the schedule used across the core tests.
#[cfg(test)]
pub(crate) fn test_rows() -> Vec<crate::MbsItemRow> {
    let mut fasciotomy = test_row("30175", "Fasciotomy, decompression of a compartment", 380.90);
    fasciotomy.record.benefit_75 = 285.70;
    fasciotomy.record.benefit_85 = 323.80;
    fasciotomy.record.is_assist_eligible = true;

    let mut old_fasciotomy = fasciotomy.clone();
    old_fasciotomy.record.schedule_fee = 370.00;
    old_fasciotomy.effective_from =
        chrono::NaiveDate::from_ymd_opt(2023, 7, 1).expect("valid date");
    old_fasciotomy.effective_to = chrono::NaiveDate::from_ymd_opt(2024, 6, 30);

    let mut minor_assist =
        test_row("51300", "Assistance at any operation, fee under $636.05", 82.90);
    minor_assist.record.benefit_75 = 62.20;

    let major_assist = test_row("51303", "Assistance at any operation, fee $636.05 or more", 0.0);

    let mut knee_major = test_row("49558", "Knee, arthroscopic surgery of, major", 1000.0);
    knee_major.record.is_assist_eligible = true;
    let knee_mid = test_row("49561", "Knee, arthroscopy with meniscectomy", 800.0);
    let knee_minor = test_row("49562", "Knee, arthroscopy and lavage", 600.0);

    let consult = test_row("23", "Professional attendance, level B consultation", 41.40);
    let specialist = test_row("105A", "Specialist, subsequent attendance", 45.40);

    let mut superseded = test_row("99999", "Superseded arthroscopy item", 10.0);
    superseded.effective_to = chrono::NaiveDate::from_ymd_opt(2020, 1, 1);

    vec![
        fasciotomy,
        old_fasciotomy,
        minor_assist,
        major_assist,
        knee_major,
        knee_mid,
        knee_minor,
        consult,
        specialist,
        superseded,
    ]
}
