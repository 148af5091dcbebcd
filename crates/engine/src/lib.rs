#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Incremental vertical completion engine.
//!
//! Given the text typed at a prompt, the engine asks a [`Matcher`] for all
//! matching candidates, ranks them by history recency, length and text,
//! and presents a centered window of them below the input. The host owns the
//! editable text and the screen; the engine only reads the input, replaces
//! the completable region on insert and paints decorations.
//!
//! # Main Types
//!
//! - [`Session`] - Per-session state: candidate set, selection, rank cache
//! - [`read_completion`] - Wraps a host's input loop around one session
//! - [`HostSurface`] / [`InputSource`] - What a host provides
//! - [`Matcher`] / [`Metadata`] - Where candidates and their decorations come from
//!
//! # Data Flow
//!
//! ```text
//! input ─► pipeline::recompute ─► CandidateSet ─► SelectionState::reconcile
//!                                                   │
//!         host ◄── render::paint ◄── render::render ◄┘
//! ```

/// Key-bindable commands and their outcomes.
pub mod actions;
pub mod candidate;
pub mod config;
pub mod error;
/// History-based ranking and file name helpers.
pub mod history;
/// Host surface contract.
pub mod host;
pub mod matcher;
pub mod metadata;
/// Candidate pipeline and sort keys.
pub mod pipeline;
/// Window rendering into styled lines.
pub mod render;
pub mod selection;
pub mod session;
#[cfg(test)]
mod test_support;

pub use actions::{Action, Outcome};
pub use candidate::{Candidate, PropKind, TextProp};
pub use config::{CountFormat, EngineConfig, Preselect, SortFunction};
pub use error::{Error, Result};
pub use history::{History, HistoryKind, HistoryRanker};
pub use host::{Anchor, HostEvent, HostSurface, InputSource, Placement, RequireMatch};
pub use matcher::{BasicMatcher, FileMatcher, MatchStyle, Matcher, Matches};
pub use metadata::{Affixed, Category, Group, Metadata, NoMetadata, StaticMetadata};
pub use pipeline::CandidateSet;
pub use render::{Face, Frame, StyledLine, StyledSpan};
pub use session::{Session, Sources, read_completion};
