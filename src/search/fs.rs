use std::{
	io,
	path::{Path, PathBuf},
};

use crate::{error::BoxError, song::SongInfo};

use super::SearchModule;

/// Searches a `<dir>/<artist>/<title>.<ext>` music library.
#[derive(Debug, Clone)]
pub struct LocalFiles {
	dir: PathBuf,
	extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
	artist: String,
	title: String,
	path: PathBuf,
}

impl LocalFiles {
	pub const ID: &'static str = "local";

	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self {
			dir: dir.into(),
			extensions: vec!["mp3".into(), "flac".into()],
		}
	}

	pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.extensions = extensions.into_iter().map(Into::into).collect();
		self
	}

	fn accepts(&self, path: &Path) -> bool {
		path.extension()
			.and_then(|x| x.to_str())
			.map_or(false, |ext| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
	}

	fn scan(&self) -> io::Result<Vec<Entry>> {
		if !self.dir.is_dir() {
			return Err(io::Error::new(
				io::ErrorKind::InvalidInput,
				format!("{} is not a directory", self.dir.display()),
			));
		}

		let mut entries = Vec::new();

		for artist_dir in self.dir.read_dir()? {
			let artist_dir = artist_dir?;
			if !artist_dir.file_type()?.is_dir() {
				continue;
			}
			let artist = artist_dir.file_name().to_string_lossy().into_owned();

			for file in artist_dir.path().read_dir()? {
				let file = file?;
				if !file.file_type()?.is_file() {
					continue;
				}

				let path = file.path();
				if !self.accepts(&path) {
					continue;
				}

				let title = match path.file_stem() {
					Some(stem) => stem.to_string_lossy().into_owned(),
					None => continue,
				};

				entries.push(Entry {
					artist: artist.clone(),
					title,
					path,
				});
			}
		}

		// read_dir order is platform dependent
		entries.sort_by(|a, b| a.path.cmp(&b.path));

		Ok(entries)
	}

	fn to_song(&self, entry: Entry) -> SongInfo {
		let id = entry
			.path
			.strip_prefix(&self.dir)
			.unwrap_or(&entry.path)
			.to_string_lossy()
			.replace('\\', "/");

		SongInfo::new(Self::ID, id, entry.title).with_singers([entry.artist])
	}
}

impl SearchModule for LocalFiles {
	fn unique_id(&self) -> &str {
		Self::ID
	}

	/// Exact title (or "artist title") matches win over substring matches.
	fn search(&self, keyword: &str) -> Result<Option<SongInfo>, BoxError> {
		let keyword = keyword.trim().to_lowercase();
		if keyword.is_empty() {
			return Ok(None);
		}

		let entries = self.scan()?;
		let keys = |entry: &Entry| {
			let title = entry.title.to_lowercase();
			let full = format!("{} {}", entry.artist.to_lowercase(), title);
			(title, full)
		};

		let exact = entries.iter().position(|entry| {
			let (title, full) = keys(entry);
			title == keyword || full == keyword
		});
		let found = exact.or_else(|| {
			entries.iter().position(|entry| {
				let (title, full) = keys(entry);
				title.contains(&keyword) || full.contains(&keyword)
			})
		});

		Ok(found.map(|i| self.to_song(entries[i].clone())))
	}
}
