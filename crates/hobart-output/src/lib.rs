#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod report;
pub mod summary;

pub use export::{ExportError, ExportFormat, Exporter};
pub use report::{AnalysisReport, ReportError, format_issuer_header, format_ratio_table};
pub use summary::{
    Band, Commentary, ThresholdSpec, default_thresholds, generate_commentary,
    generate_commentary_with, latest_record, missing_ratio_messages,
};
