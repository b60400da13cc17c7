#![allow(dead_code)]

use std::{
	collections::HashSet,
	sync::{
		atomic::{AtomicUsize, Ordering},
		Arc, Mutex, OnceLock,
	},
};

use chrono::{DateTime, TimeZone, Utc};
use jukebox::{
	blacklist::Blacklist,
	clock::ManualClock,
	error::BoxError,
	event::{Event, Receiver},
	player::{Downloader, Player},
	search::{SearchModule, SearchModules},
	DanmakuModel, DanmuHandler, Limits, SongInfo, SongItem,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
	Play,
	Pause,
	Volume(f32),
	Next,
	CancelDownload,
	Evict(String),
}

#[derive(Debug, Default)]
pub struct Engine {
	calls: Mutex<Vec<Call>>,
}

impl Engine {
	fn push(&self, call: Call) {
		self.calls.lock().unwrap().push(call);
	}

	pub fn take(&self) -> Vec<Call> {
		std::mem::take(&mut *self.calls.lock().unwrap())
	}
}

impl Player for Engine {
	fn play(&self) {
		self.push(Call::Play);
	}

	fn pause(&self) {
		self.push(Call::Pause);
	}

	fn set_volume(&self, volume: f32) {
		self.push(Call::Volume(volume));
	}

	fn next(&self) {
		self.push(Call::Next);
	}
}

impl Downloader for Engine {
	fn cancel_download(&self) {
		self.push(Call::CancelDownload);
	}

	fn evict(&self, song: &SongItem) {
		self.push(Call::Evict(song.info.id.clone()));
	}
}

type Hook = Box<dyn Fn(&str) + Send + Sync>;

/// Finds every keyword except the ones in `misses`; the song id is the keyword.
#[derive(Default)]
pub struct Catalog {
	pub id: &'static str,
	misses: Mutex<HashSet<String>>,
	calls: AtomicUsize,
	hook: OnceLock<Hook>,
}

impl Catalog {
	pub fn new(id: &'static str) -> Arc<Self> {
		Arc::new(Self {
			id,
			..Default::default()
		})
	}

	pub fn miss(&self, keyword: &str) {
		self.misses.lock().unwrap().insert(keyword.to_owned());
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	/// Runs `hook` in the middle of every search.
	pub fn during_search(&self, hook: impl Fn(&str) + Send + Sync + 'static) {
		let _ = self.hook.set(Box::new(hook));
	}
}

impl SearchModule for Catalog {
	fn unique_id(&self) -> &str {
		self.id
	}

	fn search(&self, keyword: &str) -> Result<Option<SongInfo>, BoxError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if let Some(hook) = self.hook.get() {
			hook(keyword);
		}
		if self.misses.lock().unwrap().contains(keyword) {
			return Ok(None);
		}

		Ok(Some(SongInfo::new(self.id, keyword, keyword).with_singers(["Someone"])))
	}
}

pub fn start() -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap()
}

pub struct Rig {
	pub handler: Arc<DanmuHandler>,
	pub engine: Arc<Engine>,
	pub catalog: Arc<Catalog>,
	pub clock: Arc<ManualClock>,
	pub events: Receiver,
}

impl Rig {
	pub fn new(max_total_songs: u32, max_person_songs: u32, cooldown_minutes: u32) -> Self {
		Self::with_blacklist(
			Limits {
				max_total_songs,
				max_person_songs,
				cooldown_minutes,
			},
			Blacklist::default(),
		)
	}

	pub fn with_blacklist(limits: Limits, blacklist: Blacklist) -> Self {
		let engine = Arc::new(Engine::default());
		let catalog = Catalog::new("catalog");
		let clock = Arc::new(ManualClock::new(start()));

		let handler = DanmuHandler::new(
			Arc::clone(&engine) as Arc<dyn Player>,
			Arc::clone(&engine) as Arc<dyn Downloader>,
			SearchModules::new(Some(Arc::clone(&catalog) as Arc<dyn SearchModule>), None),
			limits,
			blacklist,
		)
		.unwrap()
		.with_clock(Arc::clone(&clock) as _);
		let events = handler.subscribe();

		Self {
			handler: Arc::new(handler),
			engine,
			catalog,
			clock,
			events,
		}
	}

	pub fn say(&self, user: &str, text: &str) {
		self.handler.process_danmu(&DanmakuModel::comment(user, text));
	}

	pub fn admin_say(&self, user: &str, text: &str) {
		self.handler
			.process_danmu(&DanmakuModel::comment(user, text).admin());
	}

	/// (user, song id) pairs in queue order.
	pub fn queue(&self) -> Vec<(String, String)> {
		self.handler
			.songs()
			.unwrap()
			.into_iter()
			.map(|x| (x.user_name, x.info.id))
			.collect()
	}

	/// Narration received so far.
	pub fn narration(&mut self) -> Vec<String> {
		let mut out = Vec::new();
		while let Ok(event) = self.events.try_recv() {
			if let Event::Log(message) = event.as_ref() {
				out.push(message.clone());
			}
		}
		out
	}
}

pub fn pair(user: &str, id: &str) -> (String, String) {
	(user.to_owned(), id.to_owned())
}
