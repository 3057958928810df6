//! Estimate reports: the calculated amounts plus the labelled lines a results panel shows.

use serde::Serialize;
use utoipa::ToSchema;

use crate::currency::{format_aud, format_aud_opt};
use crate::estimate::multiple::MultiEstimate;
use crate::estimate::single::SingleEstimate;
use crate::estimate::AssistantItem;

/// One rendered row of a results panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReportLine {
    pub label: String,
    pub value: String,
}

impl ReportLine {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Assistant details attached to a single-item estimate.
///
/// The lookup is for display only, so a failed lookup leaves `description` empty and records
/// why in `error` instead of failing the estimate.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AssistantNote {
    pub item: AssistantItem,
    pub item_code: String,
    pub description: Option<String>,
    pub error: Option<String>,
    pub gap_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SingleEstimateReport {
    pub estimate: SingleEstimate,
    pub assistant: Option<AssistantNote>,
    /// Primary out-of-pocket plus any assistant gap.
    pub total_out_of_pocket: f64,
    pub lines: Vec<ReportLine>,
}

impl SingleEstimateReport {
    pub fn new(estimate: SingleEstimate, assistant: Option<AssistantNote>) -> Self {
        let gap = assistant.as_ref().map(|a| a.gap_fee).unwrap_or(0.0);
        let total_out_of_pocket = estimate.out_of_pocket + gap;
        let lines = single_lines(&estimate, assistant.as_ref(), total_out_of_pocket);
        Self {
            estimate,
            assistant,
            total_out_of_pocket,
            lines,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MultiEstimateReport {
    pub estimate: MultiEstimate,
    /// Items left out of the calculation and other lookup problems.
    pub warnings: Vec<String>,
    pub lines: Vec<ReportLine>,
}

impl MultiEstimateReport {
    pub fn new(estimate: MultiEstimate, warnings: Vec<String>) -> Self {
        let lines = multi_lines(&estimate);
        Self {
            estimate,
            warnings,
            lines,
        }
    }
}

fn single_lines(
    estimate: &SingleEstimate,
    assistant: Option<&AssistantNote>,
    total_out_of_pocket: f64,
) -> Vec<ReportLine> {
    let mut lines = vec![
        ReportLine::new("Item Number", estimate.item_code.as_str()),
        ReportLine::new("Description", estimate.description.as_str()),
        ReportLine::new("Your Charged Fee (Primary)", format_aud(estimate.charged_fee)),
        ReportLine::new("MBS Schedule Fee (Primary)", format_aud(estimate.schedule_fee)),
        ReportLine::new("Medicare Rebate (Primary)", format_aud(estimate.medicare_rebate)),
        ReportLine::new("Health Fund Rebate (Primary)", format_aud(estimate.health_fund_rebate)),
        ReportLine::new("Primary Service Out-of-Pocket", format_aud(estimate.out_of_pocket)),
    ];

    if let Some(a) = assistant {
        let item = match (&a.description, &a.error) {
            (Some(description), _) => format!("{} - {}", a.item_code, description),
            (None, Some(error)) => format!("{} ({})", a.item_code, error),
            (None, None) => format!("{} (description not available)", a.item_code),
        };
        lines.push(ReportLine::new("Assistant Item", item));
        lines.push(ReportLine::new("Surgical Assistant Fee (Gap)", format_aud(a.gap_fee)));
    }

    lines.push(ReportLine::new(
        "Total Patient Out-of-Pocket",
        format_aud(total_out_of_pocket),
    ));
    lines
}

fn multi_lines(estimate: &MultiEstimate) -> Vec<ReportLine> {
    let mut lines = Vec::with_capacity(estimate.items.len() + 8);

    for item in &estimate.items {
        lines.push(ReportLine::new(
            format!("Item {} ({:.0}%)", item.item_code, item.scale * 100.0),
            format!(
                "{} (Medicare {}, Health Fund {})",
                format_aud(item.effective_fee),
                format_aud(item.medicare_rebate),
                format_aud(item.health_fund_rebate)
            ),
        ));
        if item.out_of_pocket.is_some() {
            lines.push(ReportLine::new(
                format!("Item {} Out-of-Pocket", item.item_code),
                format_aud_opt(item.out_of_pocket),
            ));
        }
    }
    lines.push(ReportLine::new(
        "Total Effective Schedule Fee",
        format_aud(estimate.total_effective_fee),
    ));

    if let Some(a) = &estimate.assistant {
        let item = match &a.description {
            Some(description) => format!("{} - {}", a.item_code, description),
            None => a.item_code.clone(),
        };
        lines.push(ReportLine::new("Assistant Item", item));
        lines.push(ReportLine::new("Surgical Assistant Fee", format_aud(a.rule_fee)));
        lines.push(ReportLine::new("Surgical Assistant Gap", format_aud(a.gap_fee)));
    }

    let t = &estimate.totals;
    lines.push(ReportLine::new("Total Charged Fee", format_aud(t.charged_fee)));
    lines.push(ReportLine::new("Total Medicare Rebate", format_aud(t.medicare_rebate)));
    lines.push(ReportLine::new("Total Health Fund Rebate", format_aud(t.health_fund_rebate)));
    lines.push(ReportLine::new("Total Patient Out-of-Pocket", format_aud(t.out_of_pocket)));
    lines
}
