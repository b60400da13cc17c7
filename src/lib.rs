//! Song requests from live room chat.
//!
//! Viewers queue songs with `点歌 <keywords>` and take them back with
//! `取消点歌`; admins can skip, pause, resume and set the volume. Requests are
//! limited by queue size, a per user quota and an optional cooldown, and
//! resolved through up to two search modules with a blacklist on top.

pub mod admission;
pub mod blacklist;
pub mod clock;
pub mod command;
pub mod config;
pub mod danmaku;
pub mod error;
pub mod event;
pub mod handler;
pub mod limits;
pub mod owner;
pub mod player;
pub mod search;
pub mod song;
pub mod store;

pub use danmaku::{DanmakuModel, MsgType};
pub use error::{Error, Result};
pub use handler::DanmuHandler;
pub use limits::{Limit, Limits};
pub use song::{SongInfo, SongItem, SongStatus};
