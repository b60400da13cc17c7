//! The single thread allowed to touch the [`Store`].
//!
//! Every admission check and queue mutation is sent here as a job. Jobs run
//! one at a time in submission order, so each one sees a consistent store,
//! but two jobs sent by the same caller may have other callers' jobs in
//! between.

use std::{
	io,
	panic::{self, AssertUnwindSafe},
	thread,
};

use tokio::sync::mpsc;

use crate::{
	error::{Error, Result},
	store::Store,
};

type Job = Box<dyn FnOnce(&mut Store) + Send>;

#[derive(Debug)]
pub struct Owner {
	jobs: Option<mpsc::UnboundedSender<Job>>,
	handle: Option<thread::JoinHandle<()>>,
}

impl Owner {
	pub fn spawn(store: Store) -> io::Result<Self> {
		let (jobs, mut rx) = mpsc::unbounded_channel::<Job>();

		let handle = thread::Builder::new()
			.name("jukebox-owner".into())
			.spawn(move || {
				let mut store = store;

				while let Some(job) = rx.blocking_recv() {
					// a panicking job loses its reply, the store stays served
					if panic::catch_unwind(AssertUnwindSafe(|| job(&mut store))).is_err() {
						log::error!("Queue job panicked");
					}
				}

				log::debug!("Queue owner stopped with {} songs queued", store.len());
			})?;

		Ok(Self {
			jobs: Some(jobs),
			handle: Some(handle),
		})
	}

	fn is_current_thread(&self) -> bool {
		self.handle
			.as_ref()
			.map_or(false, |handle| handle.thread().id() == thread::current().id())
	}

	/// Queues `job` without waiting for it.
	pub fn execute<F>(&self, job: F) -> Result<()>
	where
		F: FnOnce(&mut Store) + Send + 'static,
	{
		self.jobs
			.as_ref()
			.ok_or(Error::OwnerGone)?
			.send(Box::new(job))
			.map_err(|_| Error::OwnerGone)
	}

	/// Runs `job` on the owner thread and blocks until it returns.
	///
	/// Callable from any thread, runtime worker threads included (the wait
	/// then blocks that worker). Not callable from inside a job.
	pub fn invoke<F, T>(&self, job: F) -> Result<T>
	where
		F: FnOnce(&mut Store) -> T + Send + 'static,
		T: Send + 'static,
	{
		if self.is_current_thread() {
			return Err(Error::Reentrant);
		}

		// crossbeam's recv is plain blocking, unlike tokio's which refuses
		// to run on a runtime thread
		let (tx, rx) = crossbeam_channel::bounded(1);
		self.execute(move |store| {
			let _ = tx.send(job(store));
		})?;

		rx.recv().map_err(|_| Error::OwnerGone)
	}
}

impl Drop for Owner {
	fn drop(&mut self) {
		// closing the channel ends the loop once queued jobs are done
		self.jobs.take();

		if let Some(handle) = self.handle.take() {
			if handle.thread().id() == thread::current().id() {
				return;
			}
			if handle.join().is_err() {
				log::error!("Queue owner thread panicked");
			}
		}
	}
}
