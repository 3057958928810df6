//! Estimate for several MBS items performed in one operation.
//!
//! The multiple-procedure rule pays the most expensive item in full, the next at half and the
//! rest at a quarter. Whether a surgical assistant applies is decided by the most expensive
//! item; which assistant item applies is decided by the discounted total.

use serde::Serialize;
use utoipa::ToSchema;

use super::{ensure_amount, gap_or_zero, AssistantItem, RebateSplit};
use crate::constants::{MAJOR_ASSISTANT_FEE_RATE, MULTIPLE_PROCEDURE_SCALES};
use crate::record::FeeScheduleRecord;
use crate::{MbsError, MbsResult};

/// Multiple-procedure scale for an item's position in descending fee order.
pub fn scale_for_rank(rank: usize) -> f64 {
    let last = MULTIPLE_PROCEDURE_SCALES.len() - 1;
    MULTIPLE_PROCEDURE_SCALES[rank.min(last)]
}

/// A record placed in fee order with its discounted fee.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledItem {
    pub record: FeeScheduleRecord,
    pub scale: f64,
    pub effective_fee: f64,
}

/// Records of one operation, ranked and discounted.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedurePlan {
    items: Vec<ScaledItem>,
    total_effective_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ItemEstimate {
    pub item_code: String,
    pub description: String,
    pub schedule_fee: f64,
    pub scale: f64,
    pub effective_fee: f64,
    pub medicare_rebate: f64,
    pub health_fund_rebate: f64,
    /// Only present when the operation has a single item; a shared charge is not apportioned.
    pub out_of_pocket: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AssistantEstimate {
    pub item: AssistantItem,
    pub item_code: String,
    pub description: Option<String>,
    /// Fee set by the assistant rule, before any gap.
    pub rule_fee: f64,
    pub medicare_rebate: f64,
    pub health_fund_rebate: f64,
    pub gap_fee: f64,
    pub charged_fee: f64,
    pub out_of_pocket: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EstimateTotals {
    pub charged_fee: f64,
    pub medicare_rebate: f64,
    pub health_fund_rebate: f64,
    pub out_of_pocket: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MultiEstimate {
    /// Items in descending schedule-fee order.
    pub items: Vec<ItemEstimate>,
    pub total_effective_fee: f64,
    pub assistant: Option<AssistantEstimate>,
    pub totals: EstimateTotals,
}

impl ProcedurePlan {
    /// Rank `records` by schedule fee and apply the multiple-procedure scale.
    ///
    /// Records with equal fees keep their original order.
    ///
    /// # Errors
    /// Returns `MbsError::InvalidInput` if `records` is empty.
    pub fn new(mut records: Vec<FeeScheduleRecord>) -> MbsResult<Self> {
        if records.is_empty() {
            return Err(MbsError::InvalidInput(
                "Please enter at least one MBS Item Number.".into(),
            ));
        }

        // sort_by is stable, which keeps ties in input order.
        records.sort_by(|a, b| b.schedule_fee.total_cmp(&a.schedule_fee));

        let items: Vec<ScaledItem> = records
            .into_iter()
            .enumerate()
            .map(|(rank, record)| {
                let scale = scale_for_rank(rank);
                ScaledItem {
                    effective_fee: record.schedule_fee * scale,
                    record,
                    scale,
                }
            })
            .collect();
        let total_effective_fee = items.iter().map(|i| i.effective_fee).sum();

        Ok(Self {
            items,
            total_effective_fee,
        })
    }

    pub fn items(&self) -> &[ScaledItem] {
        &self.items
    }

    pub fn total_effective_fee(&self) -> f64 {
        self.total_effective_fee
    }

    /// The highest-fee record.
    pub fn principal(&self) -> &FeeScheduleRecord {
        // `new` refuses an empty plan.
        &self.items[0].record
    }

    /// The assistant item for this operation, if the principal item allows one.
    pub fn assistant_item(&self) -> Option<AssistantItem> {
        self.principal()
            .is_assist_eligible
            .then(|| AssistantItem::for_fee(self.total_effective_fee))
    }

    /// Compute rebates and totals for the plan.
    ///
    /// `minor_assistant` is the looked-up record for item 51300. It is only read when that
    /// item applies; if it applies and is `None`, the estimate has no assistant line.
    ///
    /// # Errors
    /// Returns `MbsError::InvalidInput` if `total_charged_fee` is negative or not finite.
    pub fn estimate(
        &self,
        total_charged_fee: f64,
        assistant_gap: Option<f64>,
        minor_assistant: Option<&FeeScheduleRecord>,
    ) -> MbsResult<MultiEstimate> {
        let total_charged_fee = ensure_amount("Total Charged Fee", total_charged_fee)?;
        let single_item = self.items.len() == 1;

        let items: Vec<ItemEstimate> = self
            .items
            .iter()
            .map(|item| {
                let split = RebateSplit::from_fee(item.effective_fee);
                ItemEstimate {
                    item_code: item.record.item_code.clone(),
                    description: item.record.description.clone(),
                    schedule_fee: item.record.schedule_fee,
                    scale: item.scale,
                    effective_fee: item.effective_fee,
                    medicare_rebate: split.medicare_rebate,
                    health_fund_rebate: split.health_fund_rebate,
                    out_of_pocket: single_item.then(|| split.out_of_pocket(total_charged_fee)),
                }
            })
            .collect();

        let gap_fee = gap_or_zero(assistant_gap);
        let assistant = self
            .assistant_item()
            .and_then(|item| self.assistant_estimate(item, gap_fee, minor_assistant));

        let (assistant_medicare, assistant_fund, assistant_charged) = assistant
            .as_ref()
            .map(|a| (a.medicare_rebate, a.health_fund_rebate, a.charged_fee))
            .unwrap_or((0.0, 0.0, 0.0));

        let medicare_rebate =
            items.iter().map(|i| i.medicare_rebate).sum::<f64>() + assistant_medicare;
        let health_fund_rebate =
            items.iter().map(|i| i.health_fund_rebate).sum::<f64>() + assistant_fund;
        let charged_fee = total_charged_fee + assistant_charged;

        Ok(MultiEstimate {
            items,
            total_effective_fee: self.total_effective_fee,
            assistant,
            totals: EstimateTotals {
                charged_fee,
                medicare_rebate,
                health_fund_rebate,
                out_of_pocket: charged_fee - medicare_rebate - health_fund_rebate,
            },
        })
    }

    fn assistant_estimate(
        &self,
        item: AssistantItem,
        gap_fee: f64,
        minor_assistant: Option<&FeeScheduleRecord>,
    ) -> Option<AssistantEstimate> {
        let (rule_fee, split, description) = match item {
            AssistantItem::Minor => {
                let record = minor_assistant?;
                (
                    record.schedule_fee,
                    RebateSplit::from_record(record),
                    Some(record.description.clone()),
                )
            }
            AssistantItem::Major => {
                let rule_fee = MAJOR_ASSISTANT_FEE_RATE * self.principal().schedule_fee;
                (rule_fee, RebateSplit::from_fee(rule_fee), None)
            }
        };
        let charged_fee = rule_fee + gap_fee;

        Some(AssistantEstimate {
            item,
            item_code: item.code().to_owned(),
            description,
            rule_fee,
            medicare_rebate: split.medicare_rebate,
            health_fund_rebate: split.health_fund_rebate,
            gap_fee,
            charged_fee,
            out_of_pocket: split.out_of_pocket(charged_fee),
        })
    }
}

/// Rank, discount and total `records` in one step.
///
/// See [`ProcedurePlan::estimate`] for how `minor_assistant` is used.
pub fn estimate_multiple(
    records: Vec<FeeScheduleRecord>,
    total_charged_fee: f64,
    assistant_gap: Option<f64>,
    minor_assistant: Option<&FeeScheduleRecord>,
) -> MbsResult<MultiEstimate> {
    ProcedurePlan::new(records)?.estimate(total_charged_fee, assistant_gap, minor_assistant)
}
