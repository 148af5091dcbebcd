//! The printf subset used by count and group-header templates.
//!
//! Supported directives are `%s`, `%Ns` (right-aligned in N columns),
//! `%-Ns` (left-aligned) and `%%`. Anything else is copied verbatim.

use unicode_width::UnicodeWidthStr;

/// Expands `template`, consuming `args` left to right. Missing arguments
/// expand to the empty string.
pub fn printf(template: &str, args: &[&str]) -> String {
	let mut out = String::with_capacity(template.len());
	let mut args = args.iter();
	let mut rest = template;

	while let Some(pos) = rest.find('%') {
		out.push_str(&rest[..pos]);
		let directive = &rest[pos + 1..];
		match parse_directive(directive) {
			Some(Directive::Percent) => {
				out.push('%');
				rest = &directive[1..];
			}
			Some(Directive::String { left, width, len }) => {
				let arg = args.next().copied().unwrap_or_default();
				pad(&mut out, arg, width, left);
				rest = &directive[len..];
			}
			None => {
				out.push('%');
				rest = directive;
			}
		}
	}
	out.push_str(rest);
	out
}

enum Directive {
	Percent,
	/// `len` is the directive length after the `%`.
	String { left: bool, width: usize, len: usize },
}

fn parse_directive(directive: &str) -> Option<Directive> {
	if directive.starts_with('%') {
		return Some(Directive::Percent);
	}
	let left = directive.starts_with('-');
	let digits_start = usize::from(left);
	let digits_len = directive[digits_start..].bytes().take_while(u8::is_ascii_digit).count();
	let directive_end = digits_start + digits_len;
	if directive.as_bytes().get(directive_end) != Some(&b's') {
		return None;
	}
	let width = directive[digits_start..directive_end].parse().unwrap_or(0);
	Some(Directive::String {
		left,
		width,
		len: directive_end + 1,
	})
}

fn pad(out: &mut String, arg: &str, width: usize, left: bool) {
	let fill = width.saturating_sub(arg.width());
	if left {
		out.push_str(arg);
		out.extend(std::iter::repeat_n(' ', fill));
	} else {
		out.extend(std::iter::repeat_n(' ', fill));
		out.push_str(arg);
	}
}
