use crate::song::SongItem;

/// Playback engine seam. Implementations handle their own threading.
pub trait Player: Send + Sync {
	fn play(&self);
	fn pause(&self);
	/// `volume` is in `0.0..=1.0`
	fn set_volume(&self, volume: f32);
	/// Abandons the song currently playing. Called from the queue owner
	/// thread, so it must not wait on the handler.
	fn next(&self);
}

/// Download/cache seam.
pub trait Downloader: Send + Sync {
	/// Cancels the download in progress. Same threading rule as
	/// [`Player::next`].
	fn cancel_download(&self);
	/// Drops any cached file of a downloaded song.
	fn evict(&self, song: &SongItem);
}
