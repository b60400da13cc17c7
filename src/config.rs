use std::{
	env, fs, io,
	path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{blacklist::BlacklistItem, error::Result, limits::Limits};

pub const CONFIG_ENV: &str = "JUKEBOX_CONFIG";
pub const DEFAULT_PATH: &str = "jukebox.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
	pub limits: Limits,
	pub media_dir: PathBuf,
	pub blacklist: Vec<BlacklistItem>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			limits: Limits::default(),
			media_dir: "./media".into(),
			blacklist: Vec::new(),
		}
	}
}

impl Config {
	pub fn parse(text: &str) -> Result<Self> {
		Ok(toml::from_str(text)?)
	}

	/// Reads `path`, falling back to defaults if it does not exist.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		match fs::read_to_string(path.as_ref()) {
			Ok(text) => Self::parse(&text),
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				log::info!("No config at {}, using defaults", path.as_ref().display());
				Ok(Self::default())
			}
			Err(e) => Err(e.into()),
		}
	}

	/// Loads from `$JUKEBOX_CONFIG`, or `./jukebox.toml`.
	pub fn from_env() -> Result<Self> {
		let path = env::var_os(CONFIG_ENV)
			.map(PathBuf::from)
			.unwrap_or_else(|| DEFAULT_PATH.into());

		Self::load(path)
	}
}
