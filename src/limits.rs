use serde::Deserialize;

/// Request limits, read by every admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
	pub max_total_songs: u32,
	pub max_person_songs: u32,
	/// 0 disables the cooldown
	pub cooldown_minutes: u32,
}

impl Default for Limits {
	fn default() -> Self {
		Self {
			max_total_songs: 10,
			max_person_songs: 2,
			cooldown_minutes: 0,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
	MaxTotalSongs(u32),
	MaxPersonSongs(u32),
	Cooldown(u32),
}

impl Limits {
	/// Applies `limit`, returning whether the value actually changed.
	pub fn apply(&mut self, limit: Limit) -> bool {
		let (field, value) = match limit {
			Limit::MaxTotalSongs(v) => (&mut self.max_total_songs, v),
			Limit::MaxPersonSongs(v) => (&mut self.max_person_songs, v),
			Limit::Cooldown(v) => (&mut self.cooldown_minutes, v),
		};

		if *field == value {
			return false;
		}
		*field = value;
		true
	}
}
