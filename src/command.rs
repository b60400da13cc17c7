//! Chat message tokenizing and verb routing.

/// A chat line split into a verb and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<'a> {
	pub verb: &'a str,
	pub args: Vec<&'a str>,
}

impl<'a> Command<'a> {
	/// `None` for blank input.
	pub fn parse(text: &'a str) -> Option<Self> {
		let mut tokens = text.split_whitespace();
		let verb = tokens.next()?;

		Some(Self {
			verb,
			args: tokens.collect(),
		})
	}

	/// Arguments joined back with single spaces.
	pub fn rest(&self) -> String {
		self.args.join(" ")
	}

	/// Matches admin only verbs. Callers are responsible for checking that
	/// the sender is an admin.
	pub fn admin_action(&self) -> Option<AdminAction> {
		let action = match self.verb {
			"切歌" => AdminAction::Skip,
			"暂停" | "暫停" => AdminAction::Pause,
			"播放" => AdminAction::Play,
			"音量" => AdminAction::Volume(self.args.first().and_then(|x| parse_volume(x))),
			_ => return None,
		};

		Some(action)
	}

	pub fn public_action(&self) -> Option<PublicAction> {
		let action = match self.verb {
			"点歌" | "點歌" => PublicAction::AddSong(self.rest()),
			"取消点歌" | "取消點歌" => PublicAction::CancelSong,
			"投票切歌" => PublicAction::VoteSkip,
			_ => return None,
		};

		Some(action)
	}

	/// Routes the command for a sender. Admin verbs shadow public ones and
	/// are invisible to everyone else.
	pub fn action(&self, is_admin: bool) -> Option<Action> {
		if is_admin {
			if let Some(action) = self.admin_action() {
				return Some(Action::Admin(action));
			}
		}

		self.public_action().map(Action::Public)
	}
}

/// Volume percent, `None` when not an integer in `0..=100`.
fn parse_volume(arg: &str) -> Option<u8> {
	arg.parse::<i64>()
		.ok()
		.filter(|x| (0..=100).contains(x))
		.map(|x| x as u8)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
	Skip,
	Pause,
	Play,
	/// `None` for a missing or invalid argument
	Volume(Option<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicAction {
	AddSong(String),
	CancelSong,
	VoteSkip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
	Admin(AdminAction),
	Public(PublicAction),
}
