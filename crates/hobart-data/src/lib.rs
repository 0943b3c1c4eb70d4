#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod statement;
pub mod types;
pub mod yahoo;

pub use error::{DataError, Result};
pub use statement::{StatementRow, StatementTable};
pub use types::{HistoryInterval, HistoryRange, StatementFrequency};
pub use yahoo::{CompanyData, CompanyDataProvider, IssuerInfo};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
