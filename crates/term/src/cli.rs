use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use minisel_engine::{HistoryKind, RequireMatch};

#[derive(Parser, Debug)]
#[command(name = "minisel")]
#[command(about = "Pick one line from a list with incremental vertical completion")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (defaults to $MINISEL_CONFIG, then the user config dir)
	#[arg(long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Text shown before the input
	#[arg(long, short = 'p', default_value = "> ")]
	pub prompt: String,

	/// History file, one entry per line, oldest first
	#[arg(long, value_name = "FILE")]
	pub history: Option<PathBuf>,

	/// How history entries are matched against candidates
	#[arg(long, value_enum, value_name = "KIND")]
	pub history_kind: Option<HistoryKindArg>,

	/// Whether input that is not a candidate may be accepted
	#[arg(long, value_enum, default_value_t = RequireMatchArg::No)]
	pub require_match: RequireMatchArg,

	/// Candidate moved to the top of the list when present
	#[arg(long, value_name = "VALUE")]
	pub default: Option<String>,

	/// Group candidates by the text before SEP
	#[arg(long, value_name = "SEP")]
	pub group_by_prefix: Option<String>,

	/// Complete file names under DIR instead of reading candidates from stdin
	#[arg(long, value_name = "DIR")]
	pub files: Option<PathBuf>,

	/// Print the ranked candidates for QUERY and exit
	#[arg(long, short = 'f', value_name = "QUERY")]
	pub filter: Option<String>,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}

/// Command-line spelling of [`HistoryKind`].
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryKindArg {
	Plain,
	File,
}

impl From<HistoryKindArg> for HistoryKind {
	fn from(kind: HistoryKindArg) -> Self {
		match kind {
			HistoryKindArg::Plain => Self::Plain,
			HistoryKindArg::File => Self::File,
		}
	}
}

/// Command-line spelling of [`RequireMatch`].
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequireMatchArg {
	No,
	Yes,
	Confirm,
	ConfirmAfterCompletion,
}

impl From<RequireMatchArg> for RequireMatch {
	fn from(require: RequireMatchArg) -> Self {
		match require {
			RequireMatchArg::No => Self::No,
			RequireMatchArg::Yes => Self::Yes,
			RequireMatchArg::Confirm => Self::Confirm,
			RequireMatchArg::ConfirmAfterCompletion => Self::ConfirmAfterCompletion,
		}
	}
}
