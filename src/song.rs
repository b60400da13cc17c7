use std::fmt;

use chrono::{DateTime, Utc};

/// A concrete song resolved by a search module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongInfo {
	pub id: String,
	pub name: String,
	pub singers: Vec<String>,
	/// unique id of the search module that resolved this song
	pub module: String,
}

impl SongInfo {
	pub fn new(module: impl Into<String>, id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			singers: Vec::new(),
			module: module.into(),
		}
	}

	pub fn with_singers<I, S>(mut self, singers: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.singers = singers.into_iter().map(Into::into).collect();
		self
	}

	pub fn singers_text(&self) -> String {
		self.singers.join(";")
	}
}

impl fmt::Display for SongInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.singers.is_empty() {
			f.write_str(&self.name)
		} else {
			write!(f, "{} - {}", self.singers_text(), self.name)
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SongStatus {
	WaitingDownload,
	Downloading,
	WaitingPlay,
	Playing,
}

pub type RequestId = u64;

/// One entry of the request queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongItem {
	pub request_id: RequestId,
	pub info: SongInfo,
	pub user_name: String,
	pub add_time: DateTime<Utc>,
	pub status: SongStatus,
}

impl SongItem {
	pub fn new(
		request_id: RequestId,
		info: SongInfo,
		user_name: impl Into<String>,
		add_time: DateTime<Utc>,
	) -> Self {
		Self {
			request_id,
			info,
			user_name: user_name.into(),
			add_time,
			status: SongStatus::WaitingDownload,
		}
	}

	/// Same song from the same module.
	pub fn is_same_song(&self, info: &SongInfo) -> bool {
		self.info.id == info.id && self.info.module == info.module
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn same_song_needs_matching_module() {
		let info = SongInfo::new("netease", "1", "songX");
		let item = SongItem::new(0, info.clone(), "A", Utc::now());

		assert!(item.is_same_song(&info));
		assert!(!item.is_same_song(&SongInfo::new("local", "1", "songX")));
		assert!(!item.is_same_song(&SongInfo::new("netease", "2", "songX")));
	}

	#[test]
	fn display_includes_singers() {
		let info = SongInfo::new("local", "a/b", "Hello").with_singers(["Adele"]);
		assert_eq!(info.to_string(), "Adele - Hello");
		assert_eq!(SongInfo::new("local", "x", "Bare").to_string(), "Bare");
	}
}
