//! Persisted opponent-history state (§6 "Opponent model"), in a simple
//! `<skill-name>: <data>` line format. Loading/saving the real on-disk
//! history store is the responsibility of a caller outside this crate; this
//! module only knows how to parse and render the format.

use crate::error::{CoreError, CoreResult};
use std::{
	collections::BTreeMap,
	fs,
	path::Path,
};

/// Per-skill historical data accumulated across games against one opponent,
/// keyed by skill name (e.g. `"OpeningPlan"`, `"ExpectedRushFrame"`).
/// Grounded in Steamhammer's `OpponentModel`/`OpponentRecord` line format,
/// which stores one free-form value string per named skill rather than a
/// structured schema.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OpponentModel {
	skills: BTreeMap<String, String>,
}

impl OpponentModel {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, skill: &str) -> Option<&str> {
		self.skills.get(skill).map(String::as_str)
	}

	pub fn set(&mut self, skill: impl Into<String>, data: impl Into<String>) {
		self.skills.insert(skill.into(), data.into());
	}

	/// Parses the `<skill-name>: <data>` line format. Blank lines and lines
	/// starting with `#` are skipped. A line missing the `: ` separator is
	/// rejected rather than silently dropped, since a truncated history file
	/// is worse than a loud failure.
	pub fn parse(text: &str) -> CoreResult<Self> {
		let mut skills = BTreeMap::new();
		for line in text.lines() {
			let line = line.trim_end();
			if line.is_empty() || line.starts_with('#') {
				continue;
			}
			let (name, data) = line
				.split_once(": ")
				.ok_or_else(|| CoreError::MalformedSkillLine(line.to_string()))?;
			skills.insert(name.to_string(), data.to_string());
		}
		Ok(Self { skills })
	}

	pub fn render(&self) -> String {
		let mut out = String::new();
		for (name, data) in &self.skills {
			out.push_str(name);
			out.push_str(": ");
			out.push_str(data);
			out.push('\n');
		}
		out
	}

	pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
		let path = path.as_ref();
		let text = fs::read_to_string(path).map_err(|source| CoreError::OpponentModelRead {
			path: path.display().to_string(),
			source,
		})?;
		Self::parse(&text)
	}

	pub fn save(&self, path: impl AsRef<Path>) -> CoreResult<()> {
		let path = path.as_ref();
		fs::write(path, self.render()).map_err(|source| CoreError::OpponentModelWrite {
			path: path.display().to_string(),
			source,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trips_through_render_and_parse() {
		let mut model = OpponentModel::new();
		model.set("OpeningPlan", "FastRush");
		model.set("ExpectedRushFrame", "2800");
		let rendered = model.render();
		let parsed = OpponentModel::parse(&rendered).unwrap();
		assert_eq!(parsed, model);
	}

	#[test]
	fn skips_blank_and_comment_lines() {
		let text = "# history for opponent foo\n\nOpeningPlan: Turtle\n";
		let parsed = OpponentModel::parse(text).unwrap();
		assert_eq!(parsed.get("OpeningPlan"), Some("Turtle"));
	}

	#[test]
	fn rejects_a_line_without_a_separator() {
		let err = OpponentModel::parse("garbage line").unwrap_err();
		assert!(matches!(err, CoreError::MalformedSkillLine(_)));
	}
}
