use std::{
	io::{self, BufRead},
	sync::Arc,
	thread,
};

use jukebox::{
	config::Config,
	event::Event,
	player::{Downloader, Player},
	search::{fs::LocalFiles, SearchModule, SearchModules},
	DanmakuModel, DanmuHandler, SongItem,
};

/// Stands in for the playback engine and only logs what it is asked to do.
#[derive(Debug)]
struct LogPlayer;

impl Player for LogPlayer {
	fn play(&self) {
		log::info!("player: play");
	}

	fn pause(&self) {
		log::info!("player: pause");
	}

	fn set_volume(&self, volume: f32) {
		log::info!("player: volume {volume:.2}");
	}

	fn next(&self) {
		log::info!("player: next");
	}
}

impl Downloader for LogPlayer {
	fn cancel_download(&self) {
		log::info!("downloader: cancel");
	}

	fn evict(&self, song: &SongItem) {
		log::info!("downloader: evict {}", song.info.id);
	}
}

/// `[!]user: text`, a leading `!` marks an admin.
fn parse_line(line: &str) -> Option<DanmakuModel> {
	let (user, text) = line.split_once(':')?;
	let (user, is_admin) = match user.trim().strip_prefix('!') {
		Some(user) => (user.trim(), true),
		None => (user.trim(), false),
	};
	if user.is_empty() {
		return None;
	}

	let mut danmaku = DanmakuModel::comment(user, text);
	danmaku.is_admin = is_admin;
	Some(danmaku)
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
	env_logger::init();

	let config = Config::from_env()?;
	let local: Arc<dyn SearchModule> = Arc::new(LocalFiles::new(&config.media_dir));
	let engine = Arc::new(LogPlayer);

	let handler = DanmuHandler::new(
		Arc::clone(&engine) as Arc<dyn Player>,
		engine,
		SearchModules::new(Some(local), None),
		config.limits,
		config.blacklist.into(),
	)?;

	let mut events = handler.subscribe();
	thread::spawn(move || {
		while let Some(event) = events.blocking_recv() {
			match event.as_ref() {
				Event::Log(message) => println!("{message}"),
				Event::LimitChanged(limit) => println!("limit changed: {limit:?}"),
			}
		}
	});

	for line in io::stdin().lock().lines() {
		match parse_line(&line?) {
			Some(danmaku) => handler.process_danmu(&danmaku),
			None => log::warn!("Expected `user: text`"),
		}
	}

	for song in handler.songs()? {
		log::info!("left in queue: {} ({})", song.info, song.user_name);
	}

	Ok(())
}
