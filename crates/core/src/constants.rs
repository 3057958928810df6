//! Constants used throughout the MBS core crate.
//!
//! Schedule rules that the estimators apply live here next to the data-store names, so a
//! change to the published rules is a one-line edit.

/// Data-store table holding the fee schedule.
pub const MBS_ITEMS_TABLE: &str = "mbs_items";

/// Columns selected for every fee record lookup.
pub const FEE_RECORD_COLUMNS: &str = "item_code,description,schedule_fee,benefit_75_percent,\
                                      benefit_85_percent,is_assist_eligible,is_anaes_eligible";

/// Full-text search configuration used for keyword lookups.
pub const FULL_TEXT_CONFIG: &str = "english";

/// Maximum number of records a keyword search returns.
pub const KEYWORD_SEARCH_LIMIT: usize = 50;

/// Fee at or above which the major assistant item applies.
pub const ASSISTANT_FEE_THRESHOLD: f64 = 636.05;

/// Assistant item billed when the fee is under [`ASSISTANT_FEE_THRESHOLD`].
pub const MINOR_ASSISTANT_ITEM: &str = "51300";

/// Assistant item billed when the fee is at or over [`ASSISTANT_FEE_THRESHOLD`].
pub const MAJOR_ASSISTANT_ITEM: &str = "51303";

/// Share of the principal schedule fee paid for the major assistant item.
pub const MAJOR_ASSISTANT_FEE_RATE: f64 = 0.20;

/// Medicare share of an effective fee in the multiple-procedure calculation.
pub const MEDICARE_BENEFIT_RATE: f64 = 0.75;

/// Health fund share of an effective fee in the multiple-procedure calculation.
pub const HEALTH_FUND_BENEFIT_RATE: f64 = 0.25;

/// Multiple-procedure scale by fee rank. Ranks past the end use the last entry.
pub const MULTIPLE_PROCEDURE_SCALES: [f64; 3] = [1.0, 0.5, 0.25];

/// Default bind address for the REST API.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Environment variable holding the data-store base URL.
pub const DATA_STORE_URL_ENV: &str = "SUPABASE_URL";

/// Environment variable holding the data-store access key.
pub const DATA_STORE_KEY_ENV: &str = "SUPABASE_ANON_KEY";

pub const REST_ADDR_ENV: &str = "MBS_REST_ADDR";

/// Environment variable naming a JSON file of `mbs_items` rows to serve instead of the hosted
/// store.
pub const ITEMS_FILE_ENV: &str = "MBS_ITEMS_FILE";
