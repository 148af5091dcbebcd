//! Non-interactive mode: one recompute, ranked candidates on stdout.

use std::ops::Range;

use minisel_engine::actions::candidate_text;
use minisel_engine::{Anchor, EngineConfig, Face, History, HostSurface, RequireMatch, Result, Session, Sources, StyledLine};

/// Host with a fixed input and nowhere to paint.
struct QueryHost {
	query: String,
}

impl HostSurface for QueryHost {
	fn prompt_end(&self) -> usize {
		0
	}

	fn buffer_end(&self) -> usize {
		self.query.len()
	}

	fn current_text(&self) -> String {
		self.query.clone()
	}

	fn replace_completable_region(&mut self, text: &str) {
		self.query = text.to_string();
	}

	fn paint_decoration(&mut self, _anchor: Anchor, _lines: &[StyledLine]) {}

	fn style_region(&mut self, _range: Range<usize>, _face: Option<Face>) {}

	fn require_match(&self) -> RequireMatch {
		RequireMatch::No
	}

	fn set_clipboard(&mut self, _text: String) {}
}

/// Full completions of `query` in ranked order.
pub fn filter(query: &str, mut sources: Sources<'_>, history: History, config: EngineConfig) -> Result<Vec<String>> {
	let host = QueryHost {
		query: query.to_string(),
	};
	let mut session = Session::new(config, history);
	session.update(&host, &mut sources)?;

	let set = session.current_candidate_set();
	Ok((0..set.total)
		.filter_map(|index| isize::try_from(index).ok())
		.map(|index| candidate_text(query, set, index))
		.collect())
}
