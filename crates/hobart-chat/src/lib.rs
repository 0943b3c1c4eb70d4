#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
pub mod error;
pub mod prompt;
pub mod session;

pub use client::{GeminiClient, GeminiConfig};
pub use error::{ChatError, Result};
pub use prompt::{ChatContext, DEFAULT_MAX_HISTORY_TURNS, build_prompt};
pub use session::{ChatSession, ChatTurn};
