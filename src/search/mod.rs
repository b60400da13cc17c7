use std::{
	fmt,
	panic::{self, AssertUnwindSafe},
	sync::{Arc, PoisonError, RwLock},
};

use crate::{error::BoxError, song::SongInfo};

pub mod fs;

/// Resolves free text keywords into a song.
pub trait SearchModule: Send + Sync {
	/// Stable id, part of a song's identity together with the song id.
	fn unique_id(&self) -> &str;

	/// `Ok(None)` when nothing matched.
	fn search(&self, keyword: &str) -> Result<Option<SongInfo>, BoxError>;

	/// [`search`](Self::search) with errors and panics turned into `None`.
	fn safe_search(&self, keyword: &str) -> Option<SongInfo> {
		match panic::catch_unwind(AssertUnwindSafe(|| self.search(keyword))) {
			Ok(Ok(Some(mut song))) => {
				song.module = self.unique_id().to_owned();
				Some(song)
			}
			Ok(Ok(None)) => None,
			Ok(Err(e)) => {
				log::error!("{} error: {:?}", self.unique_id(), e);
				None
			}
			Err(_) => {
				log::error!("{} panicked searching {:?}", self.unique_id(), keyword);
				None
			}
		}
	}
}

type Slot = RwLock<Option<Arc<dyn SearchModule>>>;

/// Primary and secondary search module slots. Either may be empty.
#[derive(Default)]
pub struct SearchModules {
	primary: Slot,
	secondary: Slot,
}

impl SearchModules {
	pub fn new(
		primary: Option<Arc<dyn SearchModule>>,
		secondary: Option<Arc<dyn SearchModule>>,
	) -> Self {
		Self {
			primary: RwLock::new(primary),
			secondary: RwLock::new(secondary),
		}
	}

	fn get(slot: &Slot) -> Option<Arc<dyn SearchModule>> {
		slot.read().unwrap_or_else(PoisonError::into_inner).clone()
	}

	fn set(slot: &Slot, module: Option<Arc<dyn SearchModule>>) {
		*slot.write().unwrap_or_else(PoisonError::into_inner) = module;
	}

	pub fn primary(&self) -> Option<Arc<dyn SearchModule>> {
		Self::get(&self.primary)
	}

	pub fn secondary(&self) -> Option<Arc<dyn SearchModule>> {
		Self::get(&self.secondary)
	}

	pub fn set_primary(&self, module: Option<Arc<dyn SearchModule>>) {
		Self::set(&self.primary, module);
	}

	pub fn set_secondary(&self, module: Option<Arc<dyn SearchModule>>) {
		Self::set(&self.secondary, module);
	}

	/// First hit of the primary then the secondary module.
	///
	/// Slots are read up front; the search itself runs without holding them.
	pub fn resolve(&self, keyword: &str) -> Option<SongInfo> {
		[self.primary(), self.secondary()]
			.into_iter()
			.flatten()
			.find_map(|module| module.safe_search(keyword))
	}
}

impl fmt::Debug for SearchModules {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let id = |module: Option<Arc<dyn SearchModule>>| module.map(|m| m.unique_id().to_owned());

		f.debug_struct("SearchModules")
			.field("primary", &id(self.primary()))
			.field("secondary", &id(self.secondary()))
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;

	enum Reply {
		Hit,
		Miss,
		Fail,
		Panic,
	}

	struct Stub {
		id: &'static str,
		reply: Reply,
		calls: AtomicUsize,
	}

	impl Stub {
		fn new(id: &'static str, reply: Reply) -> Arc<Self> {
			Arc::new(Self {
				id,
				reply,
				calls: AtomicUsize::new(0),
			})
		}

		fn calls(&self) -> usize {
			self.calls.load(Ordering::SeqCst)
		}
	}

	impl SearchModule for Stub {
		fn unique_id(&self) -> &str {
			self.id
		}

		fn search(&self, keyword: &str) -> Result<Option<SongInfo>, BoxError> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			match self.reply {
				Reply::Hit => Ok(Some(SongInfo::new("wrong", "1", keyword))),
				Reply::Miss => Ok(None),
				Reply::Fail => Err("network down".into()),
				Reply::Panic => panic!("provider bug"),
			}
		}
	}

	fn modules(primary: &Arc<Stub>, secondary: &Arc<Stub>) -> SearchModules {
		SearchModules::new(
			Some(Arc::clone(primary) as Arc<dyn SearchModule>),
			Some(Arc::clone(secondary) as Arc<dyn SearchModule>),
		)
	}

	#[test]
	fn primary_hit_skips_secondary() {
		let (a, b) = (Stub::new("a", Reply::Hit), Stub::new("b", Reply::Hit));

		let song = modules(&a, &b).resolve("songX").unwrap();

		assert_eq!(song.module, "a");
		assert_eq!(song.name, "songX");
		assert_eq!((a.calls(), b.calls()), (1, 0));
	}

	#[test]
	fn falls_back_on_miss_error_or_panic() {
		for reply in [Reply::Miss, Reply::Fail, Reply::Panic] {
			let (a, b) = (Stub::new("a", reply), Stub::new("b", Reply::Hit));

			assert_eq!(modules(&a, &b).resolve("x").map(|s| s.module), Some("b".into()));
			assert_eq!((a.calls(), b.calls()), (1, 1));
		}
	}

	#[test]
	fn both_failing_is_none() {
		let (a, b) = (Stub::new("a", Reply::Panic), Stub::new("b", Reply::Fail));
		assert_eq!(modules(&a, &b).resolve("x"), None);
	}

	#[test]
	fn empty_slots_are_skipped() {
		let b = Stub::new("b", Reply::Hit);
		let modules = SearchModules::new(None, Some(Arc::clone(&b) as Arc<dyn SearchModule>));
		assert_eq!(modules.resolve("x").map(|s| s.module), Some("b".into()));

		modules.set_secondary(None);
		assert_eq!(modules.resolve("x"), None);
		assert_eq!(SearchModules::default().resolve("x"), None);
	}

	#[test]
	fn slots_can_be_swapped() {
		let (a, b) = (Stub::new("a", Reply::Hit), Stub::new("b", Reply::Hit));
		let modules = SearchModules::default();

		modules.set_primary(Some(Arc::clone(&a) as Arc<dyn SearchModule>));
		assert_eq!(modules.resolve("x").map(|s| s.module), Some("a".into()));

		modules.set_primary(Some(Arc::clone(&b) as Arc<dyn SearchModule>));
		assert_eq!(modules.resolve("x").map(|s| s.module), Some("b".into()));
		assert_eq!(format!("{modules:?}"), r#"SearchModules { primary: Some("b"), secondary: None }"#);
	}
}
