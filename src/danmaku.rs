#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgType {
	Comment,
	GiftSend,
	Welcome,
	GuardBuy,
	SuperChat,
	LiveStart,
	LiveEnd,
	Other,
}

/// One message from the live room. Admin status is resolved upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanmakuModel {
	pub user_name: String,
	pub is_admin: bool,
	pub msg_type: MsgType,
	pub comment_text: Option<String>,
}

impl DanmakuModel {
	pub fn comment(user_name: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			user_name: user_name.into(),
			is_admin: false,
			msg_type: MsgType::Comment,
			comment_text: Some(text.into()),
		}
	}

	pub fn admin(mut self) -> Self {
		self.is_admin = true;
		self
	}

	/// Text of a comment, if this is one.
	pub fn text(&self) -> Option<&str> {
		match self.msg_type {
			MsgType::Comment => self.comment_text.as_deref(),
			_ => None,
		}
	}
}
