use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
	QueueFull,
	UserQuota,
	Cooldown { until: DateTime<Utc> },
}

impl fmt::Display for Rejection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Rejection::QueueFull => f.write_str("queue is full"),
			Rejection::UserQuota => f.write_str("too many songs queued by this user"),
			Rejection::Cooldown { until } => write!(f, "cooling down until {until}"),
		}
	}
}

/// Decides whether `user_name` may add a song at `now`.
///
/// Only valid for the instant it is evaluated at. Callers that leave the owner
/// thread in between (to search, for instance) have to check again.
pub fn check(store: &Store, user_name: &str, now: DateTime<Utc>) -> Result<(), Rejection> {
	let limits = store.limits();

	if store.len() >= limits.max_total_songs as usize {
		return Err(Rejection::QueueFull);
	}

	if store.count_by_user(user_name) >= limits.max_person_songs as usize {
		return Err(Rejection::UserQuota);
	}

	if limits.cooldown_minutes != 0 {
		if let Some(last) = store.last_request(user_name) {
			let until = last.add_time + Duration::minutes(i64::from(limits.cooldown_minutes));
			if now < until {
				return Err(Rejection::Cooldown { until });
			}
		}
	}

	Ok(())
}
