//! Estimate for one MBS item billed on its own.

use serde::Serialize;
use utoipa::ToSchema;

use super::{ensure_amount, AssistantItem, RebateSplit};
use crate::record::FeeScheduleRecord;
use crate::MbsResult;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SingleEstimate {
    pub item_code: String,
    pub description: String,
    pub schedule_fee: f64,
    pub charged_fee: f64,
    pub medicare_rebate: f64,
    pub health_fund_rebate: f64,
    pub out_of_pocket: f64,
    /// Set when the item allows a surgical assistant.
    pub assistant_item: Option<AssistantItem>,
}

/// Split `charged_fee` for `record` into rebates and the patient's share.
///
/// The out-of-pocket amount is not clamped; charging under the schedule fee gives a negative
/// value.
///
/// # Errors
/// Returns `MbsError::InvalidInput` if `charged_fee` is negative or not finite.
pub fn estimate_single(record: &FeeScheduleRecord, charged_fee: f64) -> MbsResult<SingleEstimate> {
    let charged_fee = ensure_amount("Your Charged Fee", charged_fee)?;
    let split = RebateSplit::from_record(record);

    Ok(SingleEstimate {
        item_code: record.item_code.clone(),
        description: record.description.clone(),
        schedule_fee: record.schedule_fee,
        charged_fee,
        medicare_rebate: split.medicare_rebate,
        health_fund_rebate: split.health_fund_rebate,
        out_of_pocket: split.out_of_pocket(charged_fee),
        assistant_item: record
            .is_assist_eligible
            .then(|| AssistantItem::for_fee(record.schedule_fee)),
    })
}
