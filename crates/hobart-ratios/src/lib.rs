#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod record;
pub mod registry;
pub mod resolver;

pub use engine::{compute_ratios, unavailable_ratios};
pub use record::RatioRecord;
pub use registry::{LineItem, Ratio};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
