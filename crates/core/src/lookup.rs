//! Fee record lookup.
//!
//! A query is either an exact item code or free-text keywords. The data store does the
//! matching; this module decides which kind of lookup a query is and enforces the rules that
//! hold for every store (current records only, keyword results capped).

use std::sync::Arc;

use async_trait::async_trait;
use mbs_types::{ItemCode, NonEmptyText};

use crate::constants::KEYWORD_SEARCH_LIMIT;
use crate::record::FeeScheduleRecord;
use crate::{MbsError, MbsResult};

/// Characters with meaning in a full-text query expression.
const FULL_TEXT_OPERATORS: &[char] = &[
    '\'', '"', '\\', '&', '|', '!', '(', ')', ':', '*', '<', '>',
];

/// A parsed search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Exact, case-insensitive item code match.
    ItemCode(ItemCode),
    /// Description keywords, all of which must match.
    Keywords(Vec<String>),
}

impl SearchQuery {
    /// Classify a raw query string.
    ///
    /// # Errors
    /// Returns `MbsError::InvalidInput` if the query is blank, or if nothing searchable is left
    /// after removing full-text operator characters.
    pub fn parse(raw: &str) -> MbsResult<Self> {
        let query = NonEmptyText::new(raw)
            .map_err(|_| MbsError::InvalidInput("Query parameter is required".into()))?;

        if ItemCode::looks_like_item_code(query.as_str()) {
            return Ok(Self::ItemCode(ItemCode::parse(query.as_str())?));
        }

        let terms = keyword_terms(query.as_str());
        if terms.is_empty() {
            return Err(MbsError::InvalidInput(
                "Query must contain at least one searchable word".into(),
            ));
        }
        Ok(Self::Keywords(terms))
    }
}

/// Split free text into AND-combined search terms.
pub fn keyword_terms(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| word.replace(FULL_TEXT_OPERATORS, ""))
        .filter(|word| !word.is_empty())
        .collect()
}

/// Read-only access to the current fee schedule.
#[async_trait]
pub trait FeeScheduleStore: Send + Sync {
    /// Current records whose item code equals `code`, ignoring case.
    async fn current_by_code(&self, code: &ItemCode) -> MbsResult<Vec<FeeScheduleRecord>>;

    /// Current records whose description matches every term, at most `limit` of them.
    async fn search_current_descriptions(
        &self,
        terms: &[String],
        limit: usize,
    ) -> MbsResult<Vec<FeeScheduleRecord>>;
}

/// Search front-end over a [`FeeScheduleStore`].
#[derive(Clone)]
pub struct LookupService {
    store: Arc<dyn FeeScheduleStore>,
}

impl LookupService {
    pub fn new(store: Arc<dyn FeeScheduleStore>) -> Self {
        Self { store }
    }

    /// Search by item code or keywords.
    ///
    /// An empty result is not an error; callers report it as "not found".
    ///
    /// # Errors
    /// - `MbsError::InvalidInput` for a blank query.
    /// - `MbsError::DataSource` if the store fails. The store message is passed through.
    pub async fn search(&self, raw_query: &str) -> MbsResult<Vec<FeeScheduleRecord>> {
        match SearchQuery::parse(raw_query)? {
            SearchQuery::ItemCode(code) => {
                tracing::debug!("item code lookup for {}", code);
                self.store.current_by_code(&code).await
            }
            SearchQuery::Keywords(terms) => {
                tracing::debug!("keyword lookup for {:?}", terms);
                let mut records = self
                    .store
                    .search_current_descriptions(&terms, KEYWORD_SEARCH_LIMIT)
                    .await?;
                records.truncate(KEYWORD_SEARCH_LIMIT);
                Ok(records)
            }
        }
    }

    /// Fetch the current record for one item code.
    pub async fn find_item(&self, code: &ItemCode) -> MbsResult<Option<FeeScheduleRecord>> {
        let records = self.store.current_by_code(code).await?;
        Ok(records.into_iter().next())
    }
}
