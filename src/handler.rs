//! Chat command handling on top of the queue owner.
//!
//! [`DanmuHandler::process_danmu`] can be called from any thread. Anything
//! that reads or writes the queue is sent to the [`Owner`] and waited on;
//! searching happens on the calling thread in between, which is why a song
//! request checks admission twice.

use std::{io, sync::Arc};

use crate::{
	admission::{self, Rejection},
	blacklist::{Blacklist, BlacklistItem},
	clock::{Clock, SystemClock},
	command::{Action, AdminAction, Command, PublicAction},
	danmaku::DanmakuModel,
	error::Result,
	event::{Event, Notifier, Receiver},
	limits::{Limit, Limits},
	owner::Owner,
	player::{Downloader, Player},
	search::SearchModules,
	song::{RequestId, SongItem, SongStatus},
	store::Store,
};

/// Outcome of the final, committing step of a song request.
enum Commit {
	Added(SongItem),
	Rejected(Rejection),
	Duplicate,
}

pub struct DanmuHandler {
	owner: Owner,
	player: Arc<dyn Player>,
	downloader: Arc<dyn Downloader>,
	search_modules: SearchModules,
	notifier: Arc<Notifier>,
	clock: Arc<dyn Clock>,
}

impl DanmuHandler {
	pub fn new(
		player: Arc<dyn Player>,
		downloader: Arc<dyn Downloader>,
		search_modules: SearchModules,
		limits: Limits,
		blacklist: Blacklist,
	) -> io::Result<Self> {
		Ok(Self {
			owner: Owner::spawn(Store::new(limits, blacklist))?,
			player,
			downloader,
			search_modules,
			notifier: Default::default(),
			clock: Arc::new(SystemClock),
		})
	}

	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;
		self
	}

	pub fn subscribe(&self) -> Receiver {
		self.notifier.subscribe()
	}

	pub fn search_modules(&self) -> &SearchModules {
		&self.search_modules
	}

	/// Handles one chat message. Never fails: problems are logged and the
	/// message is dropped.
	///
	/// Blocks the calling thread while searching and while the queue owner
	/// works. From async code, run it through `spawn_blocking` so runtime
	/// workers stay free.
	pub fn process_danmu(&self, danmaku: &DanmakuModel) {
		let Some(text) = danmaku.text() else { return };
		let Some(command) = Command::parse(text) else { return };
		let Some(action) = command.action(danmaku.is_admin) else { return };

		let res = match action {
			Action::Admin(action) => self.run_admin(action),
			Action::Public(action) => self.run_public(&danmaku.user_name, action),
		};

		if let Err(e) = res {
			log::error!("Error handling {:?} from {}: {}", text, danmaku.user_name, e);
		}
	}

	fn run_admin(&self, action: AdminAction) -> Result<()> {
		match action {
			AdminAction::Skip => {
				self.skip_current()?;
			}
			AdminAction::Pause => self.player.pause(),
			AdminAction::Play => self.player.play(),
			AdminAction::Volume(Some(percent)) => self.player.set_volume(f32::from(percent) / 100.),
			AdminAction::Volume(None) => {}
		}

		Ok(())
	}

	fn run_public(&self, user_name: &str, action: PublicAction) -> Result<()> {
		match action {
			PublicAction::AddSong(keyword) => {
				self.request_song(user_name, &keyword)?;
			}
			PublicAction::CancelSong => {
				self.cancel_last_song(user_name)?;
			}
			PublicAction::VoteSkip => {
				log::debug!("{user_name} voted to skip, vote skipping is not supported");
			}
		}

		Ok(())
	}

	fn narrate_rejection(&self, user_name: &str, rejection: &Rejection) {
		match rejection {
			Rejection::Cooldown { .. } => {
				self.notifier
					.log(format!("{user_name} is still cooling down, request rejected"));
			}
			_ => log::debug!("Request from {user_name} rejected: {rejection}"),
		}
	}

	/// Whether `user_name` may add a song right now.
	pub fn can_add_song(&self, user_name: &str) -> Result<bool> {
		let clock = Arc::clone(&self.clock);
		let user = user_name.to_owned();

		match self
			.owner
			.invoke(move |store| admission::check(store, &user, clock.now()))?
		{
			Ok(()) => Ok(true),
			Err(rejection) => {
				self.narrate_rejection(user_name, &rejection);
				Ok(false)
			}
		}
	}

	/// Searches `keyword` and queues the result for `user_name` if allowed.
	/// Returns the queued request.
	pub fn request_song(&self, user_name: &str, keyword: &str) -> Result<Option<SongItem>> {
		// a bare command still counts as an attempt and hears about its cooldown
		if !self.can_add_song(user_name)? || keyword.trim().is_empty() {
			return Ok(None);
		}

		let Some(song) = self.search_modules.resolve(keyword) else {
			log::debug!("Nothing found for {keyword:?}");
			return Ok(None);
		};

		let blacklisted = {
			let song = song.clone();
			self.owner
				.invoke(move |store| store.blacklist().is_blacklisted(&song))?
		};
		if blacklisted {
			self.notifier.log(format!("Song {} is blacklisted", song.name));
			return Ok(None);
		}

		// the queue may have changed while searching
		let clock = Arc::clone(&self.clock);
		let user = user_name.to_owned();
		let commit = self.owner.invoke(move |store| {
			let now = clock.now();
			if let Err(rejection) = admission::check(store, &user, now) {
				return Commit::Rejected(rejection);
			}
			if store.contains_song(&song) {
				return Commit::Duplicate;
			}

			let item = store.push(song, &user, now).clone();
			store.record_request(&user, item.request_id, now);
			Commit::Added(item)
		})?;

		match commit {
			Commit::Added(item) => {
				self.notifier.log(format!("Song requested: {}", item.info.name));
				Ok(Some(item))
			}
			Commit::Rejected(rejection) => {
				self.narrate_rejection(user_name, &rejection);
				Ok(None)
			}
			Commit::Duplicate => {
				log::debug!("{user_name} requested a song already in the queue");
				Ok(None)
			}
		}
	}

	/// Removes the newest request of `user_name` that is not playing yet.
	pub fn cancel_last_song(&self, user_name: &str) -> Result<Option<SongItem>> {
		let downloader = Arc::clone(&self.downloader);
		let player = Arc::clone(&self.player);
		let user = user_name.to_owned();

		let removed = self.owner.invoke(move |store| {
			let index = store.last_pending_of(&user)?;
			let removed = store.remove_at(index, &*downloader, &*player)?;

			// only a song that never played gives the cooldown back
			if removed.status != SongStatus::Playing {
				store.forget_last_request(&user);
			}
			Some(removed)
		})?;

		if let Some(item) = &removed {
			log::info!("{user_name} cancelled {}", item.info.name);
		}

		Ok(removed)
	}

	/// Removes the head of the queue.
	pub fn skip_current(&self) -> Result<Option<SongItem>> {
		let downloader = Arc::clone(&self.downloader);
		let player = Arc::clone(&self.player);

		let removed = self
			.owner
			.invoke(move |store| store.remove_at(0, &*downloader, &*player))?;

		if let Some(item) = &removed {
			self.notifier.log(format!("Skipped {}", item.info.name));
		}

		Ok(removed)
	}
}

// Queue access for the playback engine and the UI.
impl DanmuHandler {
	pub fn songs(&self) -> Result<Vec<SongItem>> {
		self.owner
			.invoke(|store| store.songs().iter().cloned().collect())
	}

	pub fn set_status(&self, request_id: RequestId, status: SongStatus) -> Result<bool> {
		self.owner
			.invoke(move |store| store.set_status(request_id, status))
	}

	/// Drops a song that finished playing on its own.
	pub fn finish(&self, request_id: RequestId) -> Result<Option<SongItem>> {
		self.owner.invoke(move |store| store.finish(request_id))
	}

	pub fn blacklist(&self) -> Result<Vec<BlacklistItem>> {
		self.owner.invoke(|store| store.blacklist().items().to_vec())
	}

	pub fn set_blacklist(&self, items: Vec<BlacklistItem>) -> Result<()> {
		self.owner
			.invoke(move |store| store.set_blacklist(Blacklist::new(items)))
	}

	pub fn limits(&self) -> Result<Limits> {
		self.owner.invoke(|store| *store.limits())
	}

	/// Applies `limit`; subscribers hear about it only if the value changed.
	pub fn set_limit(&self, limit: Limit) -> Result<bool> {
		let changed = self
			.owner
			.invoke(move |store| store.limits_mut().apply(limit))?;

		if changed {
			self.notifier.send(Event::LimitChanged(limit));
		}

		Ok(changed)
	}

	pub fn set_max_total_songs(&self, value: u32) -> Result<bool> {
		self.set_limit(Limit::MaxTotalSongs(value))
	}

	pub fn set_max_person_songs(&self, value: u32) -> Result<bool> {
		self.set_limit(Limit::MaxPersonSongs(value))
	}

	pub fn set_cooldown(&self, minutes: u32) -> Result<bool> {
		self.set_limit(Limit::Cooldown(minutes))
	}
}
