use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::limits::Limit;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
	/// Human readable narration for the streamer.
	Log(String),
	LimitChanged(Limit),
}

/// Events a subscriber may fall behind by before new ones are dropped for it.
pub const CAPACITY: usize = 64;

pub type Sender = mpsc::Sender<Arc<Event>>;
pub type Receiver = mpsc::Receiver<Arc<Event>>;

/// Fans events out to every live subscriber. Never blocks.
#[derive(Debug, Default)]
pub struct Notifier {
	subscribers: Mutex<Vec<Sender>>,
}

impl Notifier {
	/// A subscriber that stops reading keeps at most [`CAPACITY`] events
	/// and misses the rest until it catches up.
	pub fn subscribe(&self) -> Receiver {
		let (sx, rx) = mpsc::channel(CAPACITY);
		self.lock().push(sx);
		rx
	}

	pub fn send(&self, event: Event) {
		let event = Arc::new(event);
		// closed receivers are dropped on the way
		self.lock().retain(|sx| match sx.try_send(Arc::clone(&event)) {
			Ok(()) => true,
			Err(TrySendError::Full(_)) => {
				log::warn!("Subscriber is lagging, dropped {event:?}");
				true
			}
			Err(TrySendError::Closed(_)) => false,
		});
	}

	pub fn log(&self, message: impl Into<String>) {
		let message = message.into();
		log::info!("{message}");
		self.send(Event::Log(message));
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Sender>> {
		self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_subscriber_gets_a_copy() {
		let notifier = Notifier::default();
		let mut a = notifier.subscribe();
		let mut b = notifier.subscribe();

		notifier.log("hello");

		assert_eq!(*a.try_recv().unwrap(), Event::Log("hello".into()));
		assert_eq!(*b.try_recv().unwrap(), Event::Log("hello".into()));
		assert!(a.try_recv().is_err());
	}

	#[test]
	fn closed_subscribers_are_pruned() {
		let notifier = Notifier::default();
		let a = notifier.subscribe();
		let mut b = notifier.subscribe();
		drop(a);

		notifier.send(Event::LimitChanged(Limit::Cooldown(3)));

		assert_eq!(notifier.lock().len(), 1);
		assert_eq!(*b.try_recv().unwrap(), Event::LimitChanged(Limit::Cooldown(3)));
	}

	#[test]
	fn slow_subscribers_keep_a_bounded_backlog() {
		let notifier = Notifier::default();
		let mut slow = notifier.subscribe();

		for i in 0..CAPACITY + 10 {
			notifier.log(format!("event {i}"));
		}

		assert_eq!(notifier.lock().len(), 1);
		let mut got = 0;
		while slow.try_recv().is_ok() {
			got += 1;
		}
		assert_eq!(got, CAPACITY);

		// caught up, receives again
		notifier.log("later");
		assert_eq!(*slow.try_recv().unwrap(), Event::Log("later".into()));
	}
}
