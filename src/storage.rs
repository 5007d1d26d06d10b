use crate::data::User;
use gloo_storage::{LocalStorage, Storage};

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
	#[error("failed to write {key:?} to local storage: {source}")]
	Write {
		key: String,
		#[source]
		source: gloo_storage::errors::StorageError,
	},
}

/// Durable, keyed storage for collections of users.
pub trait RecordStore {
	/// The collection stored under `key`, or an empty one if nothing usable is there.
	fn get(&self, key: &str) -> Vec<User>;

	/// Overwrites the collection stored under `key`.
	fn set(&self, key: &str, users: &[User]) -> Result<(), StorageError>;
}

/// Keeps each collection as a json array in the browser's `localStorage`,
/// so the cache outlives reloads of the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalRecordStore;

impl RecordStore for LocalRecordStore {
	fn get(&self, key: &str) -> Vec<User> {
		match LocalStorage::get::<Vec<User>>(key) {
			Ok(users) => users,
			Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Vec::new(),
			Err(err) => {
				log::warn!(target: "storage", "discarding unreadable {key:?} collection: {err:?}");
				Vec::new()
			}
		}
	}

	fn set(&self, key: &str, users: &[User]) -> Result<(), StorageError> {
		LocalStorage::set(key, users).map_err(|source| StorageError::Write {
			key: key.to_owned(),
			source,
		})
	}
}
