//! Out-of-pocket estimation.
//!
//! The calculations here are pure: they take records that have already been looked up and
//! return derived amounts. Fetching records is the job of [`crate::service::EstimateService`].

pub mod multiple;
pub mod single;

use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::{
    ASSISTANT_FEE_THRESHOLD, HEALTH_FUND_BENEFIT_RATE, MAJOR_ASSISTANT_ITEM,
    MEDICARE_BENEFIT_RATE, MINOR_ASSISTANT_ITEM,
};
use crate::record::FeeScheduleRecord;
use crate::{MbsError, MbsResult};

/// The surgical assistant item that applies to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssistantItem {
    /// Item 51300: operation fee under the threshold; paid at the item's own schedule fee.
    Minor,
    /// Item 51303: operation fee at or over the threshold; paid as a share of the principal fee.
    Major,
}

impl AssistantItem {
    /// Pick the assistant item for an operation fee.
    pub fn for_fee(fee: f64) -> Self {
        if fee < ASSISTANT_FEE_THRESHOLD {
            Self::Minor
        } else {
            Self::Major
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Minor => MINOR_ASSISTANT_ITEM,
            Self::Major => MAJOR_ASSISTANT_ITEM,
        }
    }
}

/// How a fee splits between Medicare and the health fund.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct RebateSplit {
    pub medicare_rebate: f64,
    pub health_fund_rebate: f64,
}

impl RebateSplit {
    /// Medicare pays the record's 75% benefit; the fund covers the rest of the schedule fee.
    pub fn from_record(record: &FeeScheduleRecord) -> Self {
        Self {
            medicare_rebate: record.benefit_75,
            health_fund_rebate: record.schedule_fee - record.benefit_75,
        }
    }

    /// Fixed 75/25 split of a derived fee.
    pub fn from_fee(fee: f64) -> Self {
        Self {
            medicare_rebate: fee * MEDICARE_BENEFIT_RATE,
            health_fund_rebate: fee * HEALTH_FUND_BENEFIT_RATE,
        }
    }

    /// What the patient pays on `charged` after both rebates. Negative means a surplus.
    pub fn out_of_pocket(&self, charged: f64) -> f64 {
        charged - self.medicare_rebate - self.health_fund_rebate
    }
}

/// Reject negative, NaN or infinite amounts.
pub(crate) fn ensure_amount(label: &str, amount: f64) -> MbsResult<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(MbsError::InvalidInput(format!(
            "Please enter a valid positive number for {label}."
        )));
    }
    Ok(amount)
}

/// Gap amounts that are absent or unusable count as zero.
pub(crate) fn gap_or_zero(gap: Option<f64>) -> f64 {
    gap.filter(|g| g.is_finite() && *g >= 0.0).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_item_follows_threshold() {
        assert_eq!(AssistantItem::for_fee(600.0), AssistantItem::Minor);
        assert_eq!(AssistantItem::for_fee(636.04), AssistantItem::Minor);
        assert_eq!(AssistantItem::for_fee(636.05), AssistantItem::Major);
        assert_eq!(AssistantItem::for_fee(700.0), AssistantItem::Major);
        assert_eq!(AssistantItem::Minor.code(), "51300");
        assert_eq!(AssistantItem::Major.code(), "51303");
    }

    #[test]
    fn ensure_amount_rejects_unusable_values() {
        assert_eq!(ensure_amount("fee", 0.0).unwrap(), 0.0);
        for bad in [-0.01, f64::NAN, f64::INFINITY] {
            assert!(ensure_amount("fee", bad).unwrap_err().is_validation());
        }
    }

    #[test]
    fn gap_defaults_to_zero() {
        assert_eq!(gap_or_zero(None), 0.0);
        assert_eq!(gap_or_zero(Some(f64::NAN)), 0.0);
        assert_eq!(gap_or_zero(Some(-5.0)), 0.0);
        assert_eq!(gap_or_zero(Some(100.0)), 100.0);
    }
}
