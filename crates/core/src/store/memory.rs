use async_trait::async_trait;
use mbs_types::ItemCode;

use crate::lookup::FeeScheduleStore;
use crate::record::{FeeScheduleRecord, MbsItemRow};
use crate::{MbsError, MbsResult};

/// Fee schedule held in memory.
///
/// Matching follows the hosted store: codes compare case-insensitively, keywords must all
/// appear in the description, and rows with an end date are never returned.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Vec<MbsItemRow>,
}

impl MemoryStore {
    pub fn new(rows: Vec<MbsItemRow>) -> Self {
        Self { rows }
    }

    /// Load rows from a JSON array of `mbs_items` rows.
    pub fn from_json(json: &str) -> MbsResult<Self> {
        let rows = serde_json::from_str(json)
            .map_err(|e| MbsError::DataSource(format!("failed to parse fee schedule rows: {e}")))?;
        Ok(Self::new(rows))
    }

    fn current(&self) -> impl Iterator<Item = &MbsItemRow> {
        self.rows.iter().filter(|row| row.is_current())
    }
}

#[async_trait]
impl FeeScheduleStore for MemoryStore {
    async fn current_by_code(&self, code: &ItemCode) -> MbsResult<Vec<FeeScheduleRecord>> {
        let mut records: Vec<FeeScheduleRecord> = self
            .current()
            .filter(|row| row.record.item_code.eq_ignore_ascii_case(code.as_str()))
            .map(|row| row.record.clone())
            .collect();
        records.sort_by(|a, b| a.item_code.cmp(&b.item_code));
        Ok(records)
    }

    async fn search_current_descriptions(
        &self,
        terms: &[String],
        limit: usize,
    ) -> MbsResult<Vec<FeeScheduleRecord>> {
        let terms: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();
        Ok(self
            .current()
            .filter(|row| {
                let description = row.record.description.to_lowercase();
                terms.iter().all(|t| description.contains(t.as_str()))
            })
            .take(limit)
            .map(|row| row.record.clone())
            .collect())
    }
}
