//! Form input validation.
//!
//! Forms arrive as raw strings. These functions turn them into typed inputs, or into the
//! message the form shows next to the submit button. Nothing here touches the data store.

use mbs_types::ItemCode;

use crate::{MbsError, MbsResult};

/// Validated input for a single-item estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleEstimateInput {
    pub item_code: ItemCode,
    pub charged_fee: f64,
    pub assistant_gap: Option<f64>,
}

/// Validated input for a multi-item estimate.
///
/// Item numbers are kept as entered (trimmed). A malformed number excludes only that item, so
/// it is reported with the lookup failures rather than rejecting the whole form.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiEstimateInput {
    pub item_numbers: Vec<String>,
    pub total_charged_fee: f64,
    pub assistant_gap: Option<f64>,
}

/// Parse a non-negative, finite amount. Returns `None` for anything else.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .trim_start_matches('$')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Parse the optional assistant gap field. Blank or invalid values mean no gap.
pub fn parse_gap(raw: Option<&str>) -> Option<f64> {
    raw.and_then(parse_amount)
}

/// Validate the single-item estimate form.
///
/// # Errors
/// Returns `MbsError::InvalidInput` if either field is blank, the fee is not a non-negative
/// number, or the item number is not shaped like an item code.
pub fn validate_single_form(
    item_number: &str,
    charged_fee: &str,
    assistant_gap_fee: Option<&str>,
) -> MbsResult<SingleEstimateInput> {
    if item_number.trim().is_empty() || charged_fee.trim().is_empty() {
        return Err(MbsError::InvalidInput(
            "Please enter both MBS Item Number and Your Charged Fee.".into(),
        ));
    }
    let charged_fee = parse_amount(charged_fee).ok_or_else(|| {
        MbsError::InvalidInput("Please enter a valid positive number for Your Charged Fee.".into())
    })?;
    let item_code = ItemCode::parse(item_number)?;

    Ok(SingleEstimateInput {
        item_code,
        charged_fee,
        assistant_gap: parse_gap(assistant_gap_fee),
    })
}

/// Validate the multi-item estimate form.
///
/// Each entry may hold several item numbers separated by commas or whitespace.
///
/// # Errors
/// Returns `MbsError::InvalidInput` if no item numbers are given, or the total fee is blank or
/// not a non-negative number.
pub fn validate_multi_form(
    item_numbers: &[String],
    total_charged_fee: &str,
    assistant_gap_fee: Option<&str>,
) -> MbsResult<MultiEstimateInput> {
    let item_numbers: Vec<String> = item_numbers
        .iter()
        .flat_map(|entry| entry.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|n| !n.is_empty())
        .map(str::to_owned)
        .collect();
    if item_numbers.is_empty() {
        return Err(MbsError::InvalidInput(
            "Please enter at least one MBS Item Number.".into(),
        ));
    }
    if total_charged_fee.trim().is_empty() {
        return Err(MbsError::InvalidInput(
            "Please enter the Total Charged Fee.".into(),
        ));
    }
    let total_charged_fee = parse_amount(total_charged_fee).ok_or_else(|| {
        MbsError::InvalidInput("Please enter a valid positive number for Total Charged Fee.".into())
    })?;

    Ok(MultiEstimateInput {
        item_numbers,
        total_charged_fee,
        assistant_gap: parse_gap(assistant_gap_fee),
    })
}
