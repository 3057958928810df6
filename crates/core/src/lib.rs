//! # MBS Core
//!
//! Core business logic for the MBS fee estimator.
//!
//! This crate holds the data-store lookups and the pure fee calculations:
//! - Item code and keyword search over the current fee schedule
//! - Single-item and multiple-procedure out-of-pocket estimates
//! - Form validation and rendered report lines
//!
//! **No API concerns**: HTTP servers and request/response shapes belong in `api-rest` and
//! `api-shared`.

pub mod config;
pub mod constants;
pub mod currency;
pub mod error;
pub mod estimate;
pub mod forms;
pub mod lookup;
pub mod outcome;
pub mod record;
pub mod report;
pub mod service;
pub mod store;

pub use config::{store_config_from_env_values, StoreConfig};
pub use error::{MbsError, MbsResult};
pub use estimate::multiple::{estimate_multiple, MultiEstimate, ProcedurePlan};
pub use estimate::single::{estimate_single, SingleEstimate};
pub use estimate::AssistantItem;
pub use lookup::{FeeScheduleStore, LookupService, SearchQuery};
pub use outcome::Outcome;
pub use record::{FeeScheduleRecord, MbsItemRow};
pub use report::{MultiEstimateReport, SingleEstimateReport};
pub use service::EstimateService;
pub use store::{MemoryStore, PostgrestStore};
