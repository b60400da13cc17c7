use std::{fmt, io};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum Error {
	/// The owner thread is gone, or dropped the reply for a unit of work.
	OwnerGone,
	/// A job tried to wait on the owner thread it runs on.
	Reentrant,
	Io(io::Error),
	Config(toml::de::Error),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::OwnerGone => f.write_str("Queue owner thread is not running"),
			Error::Reentrant => f.write_str("Blocking call into the queue owner from its own thread"),
			Error::Io(e) => write!(f, "IO Error: {e}"),
			Error::Config(e) => write!(f, "Config Error: {e}"),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::OwnerGone | Error::Reentrant => None,
			Error::Io(e) => Some(e),
			Error::Config(e) => Some(e),
		}
	}
}

impl From<io::Error> for Error {
	fn from(e: io::Error) -> Self {
		Self::Io(e)
	}
}

impl From<toml::de::Error> for Error {
	fn from(e: toml::de::Error) -> Self {
		Self::Config(e)
	}
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
