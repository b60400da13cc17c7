use serde::Deserialize;

use crate::song::SongInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlacklistKind {
	/// exact song id
	Id,
	/// substring of the song name
	Name,
	/// substring of any singer
	Singer,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlacklistItem {
	pub kind: BlacklistKind,
	pub content: String,
	#[serde(default = "enabled")]
	pub enabled: bool,
}

fn enabled() -> bool {
	true
}

impl BlacklistItem {
	pub fn new(kind: BlacklistKind, content: impl Into<String>) -> Self {
		Self {
			kind,
			content: content.into(),
			enabled: true,
		}
	}

	pub fn matches(&self, song: &SongInfo) -> bool {
		if !self.enabled || self.content.is_empty() {
			return false;
		}

		match self.kind {
			BlacklistKind::Id => song.id == self.content,
			BlacklistKind::Name => contains_ignore_case(&song.name, &self.content),
			BlacklistKind::Singer => song
				.singers
				.iter()
				.any(|singer| contains_ignore_case(singer, &self.content)),
		}
	}
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
	haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
	items: Vec<BlacklistItem>,
}

impl Blacklist {
	pub fn new(items: Vec<BlacklistItem>) -> Self {
		Self { items }
	}

	/// First enabled entry matching `song`.
	pub fn find(&self, song: &SongInfo) -> Option<&BlacklistItem> {
		self.items.iter().find(|item| item.matches(song))
	}

	pub fn is_blacklisted(&self, song: &SongInfo) -> bool {
		self.find(song).is_some()
	}

	pub fn items(&self) -> &[BlacklistItem] {
		&self.items
	}
}

impl From<Vec<BlacklistItem>> for Blacklist {
	fn from(items: Vec<BlacklistItem>) -> Self {
		Self::new(items)
	}
}
