//! Estimate orchestration.
//!
//! Each call runs one explicit pipeline: validated input, data-store lookups, calculation,
//! report. Nothing is cached between calls.

use futures::future::join_all;
use mbs_types::ItemCode;

use crate::estimate::multiple::ProcedurePlan;
use crate::estimate::single::estimate_single;
use crate::estimate::{ensure_amount, gap_or_zero, AssistantItem};
use crate::forms::{MultiEstimateInput, SingleEstimateInput};
use crate::lookup::LookupService;
use crate::record::FeeScheduleRecord;
use crate::report::{AssistantNote, MultiEstimateReport, SingleEstimateReport};
use crate::{MbsError, MbsResult};

#[derive(Clone)]
pub struct EstimateService {
    lookup: LookupService,
}

impl EstimateService {
    pub fn new(lookup: LookupService) -> Self {
        Self { lookup }
    }

    /// Estimate the patient's cost for one item.
    ///
    /// If the item allows a surgical assistant, the assistant item is looked up for its
    /// description. That lookup never fails the estimate.
    ///
    /// # Errors
    /// - `MbsError::InvalidInput` for a negative charged fee.
    /// - `MbsError::NotFound` if the item has no current record.
    /// - `MbsError::DataSource` if the primary lookup fails.
    pub async fn estimate_single(
        &self,
        input: &SingleEstimateInput,
    ) -> MbsResult<SingleEstimateReport> {
        ensure_amount("Your Charged Fee", input.charged_fee)?;

        let record = self
            .lookup
            .find_item(&input.item_code)
            .await?
            .ok_or_else(|| MbsError::NotFound(input.item_code.clone()))?;
        let estimate = estimate_single(&record, input.charged_fee)?;

        let assistant = match estimate.assistant_item {
            Some(item) => Some(
                self.assistant_note(item, gap_or_zero(input.assistant_gap))
                    .await,
            ),
            None => None,
        };

        tracing::info!(
            "single estimate for item {}: out-of-pocket {:.2}",
            estimate.item_code,
            estimate.out_of_pocket
        );
        Ok(SingleEstimateReport::new(estimate, assistant))
    }

    /// Estimate the patient's cost for several items performed together.
    ///
    /// All item lookups are issued at once and joined before calculating. Items whose lookup
    /// fails are left out and reported as warnings.
    ///
    /// # Errors
    /// - `MbsError::InvalidInput` for no items or a negative total charged fee.
    /// - `MbsError::LookupsFailed` if no item could be looked up; holds every failure message.
    pub async fn estimate_multiple(
        &self,
        input: &MultiEstimateInput,
    ) -> MbsResult<MultiEstimateReport> {
        if input.item_numbers.is_empty() {
            return Err(MbsError::InvalidInput(
                "Please enter at least one MBS Item Number.".into(),
            ));
        }
        ensure_amount("Total Charged Fee", input.total_charged_fee)?;

        let results = join_all(
            input
                .item_numbers
                .iter()
                .map(|number| self.lookup_item_number(number)),
        )
        .await;

        let mut records = Vec::with_capacity(results.len());
        let mut warnings = Vec::new();
        for result in results {
            match result {
                Ok(record) => records.push(record),
                Err(message) => {
                    tracing::warn!("excluding item from estimate: {}", message);
                    warnings.push(message);
                }
            }
        }
        if records.is_empty() {
            return Err(MbsError::LookupsFailed(warnings.join("; ")));
        }

        let plan = ProcedurePlan::new(records)?;
        let minor_assistant = match plan.assistant_item() {
            Some(AssistantItem::Minor) => {
                match self.lookup_item_number(AssistantItem::Minor.code()).await {
                    Ok(record) => Some(record),
                    Err(message) => {
                        tracing::warn!("assistant item unavailable: {}", message);
                        warnings.push(message);
                        None
                    }
                }
            }
            _ => None,
        };

        let estimate = plan.estimate(
            input.total_charged_fee,
            input.assistant_gap,
            minor_assistant.as_ref(),
        )?;

        tracing::info!(
            "multi estimate for {} item(s): out-of-pocket {:.2}, {} warning(s)",
            estimate.items.len(),
            estimate.totals.out_of_pocket,
            warnings.len()
        );
        Ok(MultiEstimateReport::new(estimate, warnings))
    }

    /// Look up one entered item number, turning every failure into a user-facing message.
    async fn lookup_item_number(&self, number: &str) -> Result<FeeScheduleRecord, String> {
        let code = ItemCode::parse(number).map_err(|e| e.to_string())?;
        match self.lookup.find_item(&code).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(MbsError::NotFound(code).to_string()),
            Err(e) => Err(format!("Failed to look up MBS Item {code}: {e}")),
        }
    }

    /// Look up the assistant item for display.
    ///
    /// Zero rows gives the not-found note; a store failure keeps the store's own message.
    async fn assistant_note(&self, item: AssistantItem, gap_fee: f64) -> AssistantNote {
        let lookup = match ItemCode::parse(item.code()) {
            Ok(code) => self.lookup.find_item(&code).await,
            Err(e) => Err(e.into()),
        };
        let (description, error) = match lookup {
            Ok(Some(record)) => (Some(record.description), None),
            Ok(None) => (
                None,
                Some(format!("Details for assistant item {} not found.", item.code())),
            ),
            Err(e) => {
                tracing::warn!("assistant item {} unavailable: {}", item.code(), e);
                (None, Some(e.to_string()))
            }
        };

        AssistantNote {
            item,
            item_code: item.code().to_owned(),
            description,
            error,
            gap_fee,
        }
    }
}
