//! State owned by the queue owner thread.
//!
//! Nothing here is synchronized; a [`Store`] is only ever touched from
//! inside [`Owner`](crate::owner::Owner) jobs.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};

use crate::{
	blacklist::Blacklist,
	limits::Limits,
	player::{Downloader, Player},
	song::{RequestId, SongInfo, SongItem, SongStatus},
};

/// When a user last got a song admitted. Only used for cooldowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastRequest {
	pub request_id: RequestId,
	pub add_time: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Store {
	songs: VecDeque<SongItem>,
	blacklist: Blacklist,
	last_requests: HashMap<String, LastRequest>,
	limits: Limits,
	next_id: RequestId,
}

impl Store {
	pub fn new(limits: Limits, blacklist: Blacklist) -> Self {
		Self {
			limits,
			blacklist,
			..Default::default()
		}
	}

	pub fn songs(&self) -> &VecDeque<SongItem> {
		&self.songs
	}

	pub fn len(&self) -> usize {
		self.songs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.songs.is_empty()
	}

	pub fn count_by_user(&self, user_name: &str) -> usize {
		self.songs.iter().filter(|x| x.user_name == user_name).count()
	}

	pub fn count_by_status(&self, status: SongStatus) -> usize {
		self.songs.iter().filter(|x| x.status == status).count()
	}

	pub fn contains_song(&self, info: &SongInfo) -> bool {
		self.songs.iter().any(|x| x.is_same_song(info))
	}

	/// Appends a new request and returns it.
	pub fn push(&mut self, info: SongInfo, user_name: &str, now: DateTime<Utc>) -> &SongItem {
		let item = SongItem::new(self.next_id, info, user_name, now);
		self.next_id += 1;
		self.songs.push_back(item);

		&self.songs[self.songs.len() - 1]
	}

	/// Removes the entry at `index`, releasing whatever the downloader or
	/// player still holds for it.
	pub fn remove_at(
		&mut self,
		index: usize,
		downloader: &dyn Downloader,
		player: &dyn Player,
	) -> Option<SongItem> {
		let item = self.songs.get(index)?;

		match item.status {
			SongStatus::WaitingDownload => {}
			SongStatus::Downloading => downloader.cancel_download(),
			SongStatus::WaitingPlay => downloader.evict(item),
			SongStatus::Playing => player.next(),
		}

		self.songs.remove(index)
	}

	pub fn remove(
		&mut self,
		request_id: RequestId,
		downloader: &dyn Downloader,
		player: &dyn Player,
	) -> Option<SongItem> {
		let index = self.songs.iter().position(|x| x.request_id == request_id)?;
		self.remove_at(index, downloader, player)
	}

	/// Index of the newest request of `user_name` that is not playing yet.
	pub fn last_pending_of(&self, user_name: &str) -> Option<usize> {
		self.songs
			.iter()
			.rposition(|x| x.user_name == user_name && x.status != SongStatus::Playing)
	}

	pub fn set_status(&mut self, request_id: RequestId, status: SongStatus) -> bool {
		match self.songs.iter_mut().find(|x| x.request_id == request_id) {
			Some(item) => {
				item.status = status;
				true
			}
			None => false,
		}
	}

	/// Drops a song the player finished on its own. No collaborator cleanup.
	pub fn finish(&mut self, request_id: RequestId) -> Option<SongItem> {
		let index = self.songs.iter().position(|x| x.request_id == request_id)?;
		self.songs.remove(index)
	}

	pub fn last_request(&self, user_name: &str) -> Option<&LastRequest> {
		self.last_requests.get(user_name)
	}

	pub fn record_request(&mut self, user_name: &str, request_id: RequestId, add_time: DateTime<Utc>) {
		self.last_requests.insert(
			user_name.to_owned(),
			LastRequest {
				request_id,
				add_time,
			},
		);
	}

	pub fn forget_last_request(&mut self, user_name: &str) -> Option<LastRequest> {
		self.last_requests.remove(user_name)
	}

	pub fn blacklist(&self) -> &Blacklist {
		&self.blacklist
	}

	pub fn set_blacklist(&mut self, blacklist: Blacklist) {
		self.blacklist = blacklist;
	}

	pub fn limits(&self) -> &Limits {
		&self.limits
	}

	pub fn limits_mut(&mut self) -> &mut Limits {
		&mut self.limits
	}
}
