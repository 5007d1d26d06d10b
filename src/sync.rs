use crate::{
	api::{Remote, RemoteError, UsersApi},
	data::{validate_create, validate_update, FieldErrors, User, UserForm, UserId},
	storage::{LocalRecordStore, RecordStore, StorageError},
};
use std::rc::Rc;
use yew::prelude::*;

/// The remote call a [`SyncError::Remote`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
	List,
	Get,
	Create,
	Update,
	Delete,
}

impl Operation {
	fn activity(&self) -> &'static str {
		match self {
			Self::List => "getting users",
			Self::Get => "getting user details",
			Self::Create => "creating user",
			Self::Update => "updating user",
			Self::Delete => "deleting user",
		}
	}
}

#[derive(thiserror::Error, Debug)]
pub enum SyncError {
	#[error("invalid user: {0}")]
	Validation(FieldErrors),
	#[error("{} failed: {source}", .op.activity())]
	Remote {
		op: Operation,
		#[source]
		source: RemoteError,
	},
	#[error(transparent)]
	Storage(#[from] StorageError),
	#[error("no cached user with id {0}")]
	Missing(UserId),
}

impl SyncError {
	/// The message shown to the user when the action fails outright.
	/// Validation failures are shown inline instead, so they have none.
	pub fn notification(&self) -> Option<String> {
		match self {
			Self::Validation(_) => None,
			Self::Remote { op, .. } => Some(format!("Some error occurred while {}.", op.activity())),
			Self::Storage(_) => Some("Some error occurred while saving users locally.".into()),
			Self::Missing(_) => Some("That user no longer exists locally.".into()),
		}
	}

	pub fn field_errors(&self) -> Option<&FieldErrors> {
		match self {
			Self::Validation(errors) => Some(errors),
			_ => None,
		}
	}
}

/// Reads an id from a url segment, accepting the forms a js `Number()` would (ex: " 5", "5.0").
fn parse_id(key: &str) -> Option<UserId> {
	let key = key.trim();
	if let Ok(id) = key.parse::<UserId>() {
		return Some(id);
	}
	let number = key.parse::<f64>().ok()?;
	match number.is_finite() && number >= 0.0 && number.fract() == 0.0 && number <= u64::MAX as f64 {
		true => Some(number as UserId),
		false => None,
	}
}

fn remote_err(op: Operation) -> impl FnOnce(RemoteError) -> SyncError {
	move |source| SyncError::Remote { op, source }
}

/// Decides whether reads are served by the local cache or the remote,
/// and writes every mutation through to both (remote first).
#[derive(Clone)]
pub struct Coordinator {
	store: Rc<dyn RecordStore>,
	remote: Rc<dyn Remote>,
	collection_key: Rc<str>,
}

impl PartialEq for Coordinator {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.store, &other.store)
			&& Rc::ptr_eq(&self.remote, &other.remote)
			&& self.collection_key == other.collection_key
	}
}

impl std::fmt::Debug for Coordinator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Coordinator")
			.field("collection_key", &self.collection_key)
			.finish_non_exhaustive()
	}
}

impl Coordinator {
	pub fn new(store: Rc<dyn RecordStore>, remote: Rc<dyn Remote>, collection_key: &str) -> Self {
		Self {
			store,
			remote,
			collection_key: collection_key.into(),
		}
	}

	pub fn working_set(&self) -> Vec<User> {
		self.store.get(&self.collection_key)
	}

	fn persist(&self, users: &[User]) -> Result<(), SyncError> {
		Ok(self.store.set(&self.collection_key, users)?)
	}

	pub async fn load(&self) -> Result<Vec<User>, SyncError> {
		let cached = self.working_set();
		if !cached.is_empty() {
			log::debug!(target: "sync", "serving {} cached users", cached.len());
			return Ok(cached);
		}
		log::debug!(target: "sync", "no cached users, fetching from remote");
		let users = self.remote.list().await.map_err(remote_err(Operation::List))?;
		// The fetched users are still shown when they can't be cached, the next load fetches again.
		if let Err(err) = self.persist(&users) {
			log::error!(target: "sync", "{err}");
		}
		Ok(users)
	}

	/// Finds a single user by the key from the url.
	///
	/// Users fetched from the remote here are not added to the cache.
	pub async fn load_one(&self, key: &str) -> Result<Option<User>, SyncError> {
		if let Some(id) = parse_id(key) {
			if let Some(user) = self.working_set().into_iter().find(|user| user.id == id) {
				return Ok(Some(user));
			}
		}
		log::debug!(target: "sync", "user {key:?} is not cached, fetching from remote");
		self.remote.get(key).await.map_err(remote_err(Operation::Get))
	}

	pub async fn create(&self, form: &UserForm) -> Result<User, SyncError> {
		validate_create(form).map_err(SyncError::Validation)?;
		let new_user = form.to_new_user();
		let mut created = self
			.remote
			.create(&new_user)
			.await
			.map_err(remote_err(Operation::Create))?;

		let mut users = self.working_set();
		if users.iter().any(|user| user.id == created.id) {
			let next_id = users.iter().map(|user| user.id).max().unwrap_or_default() + 1;
			log::warn!(
				target: "sync",
				"remote assigned id {} which is already cached, using {next_id} locally",
				created.id
			);
			created.id = next_id;
		}
		users.push(created.clone());
		self.persist(&users)?;
		Ok(created)
	}

	pub async fn update(&self, id: UserId, form: &UserForm) -> Result<User, SyncError> {
		validate_update(form).map_err(SyncError::Validation)?;
		let Some(mut merged) = self.working_set().into_iter().find(|user| user.id == id) else {
			return Err(SyncError::Missing(id));
		};
		form.apply_to(&mut merged);
		let mut updated = self
			.remote
			.update(&merged)
			.await
			.map_err(remote_err(Operation::Update))?;
		updated.id = id;

		// Re-read, the cache may have changed while the request was in flight.
		let mut users = self.working_set();
		match users.iter_mut().find(|user| user.id == id) {
			Some(slot) => *slot = updated.clone(),
			None => log::warn!(target: "sync", "user {id} was removed while being updated"),
		}
		self.persist(&users)?;
		Ok(updated)
	}

	pub async fn delete(&self, id: UserId) -> Result<(), SyncError> {
		self.remote.delete(id).await.map_err(remote_err(Operation::Delete))?;
		let mut users = self.working_set();
		users.retain(|user| user.id != id);
		self.persist(&users)
	}
}

#[function_component]
pub fn Provider(props: &yew::html::ChildrenProps) -> Html {
	let coordinator = use_memo((), |_| {
		let config = crate::config::Config::default();
		log::info!(target: "sync", "using {} with cache key {:?}", config.api_base_url, config.collection_key);
		Coordinator::new(
			Rc::new(LocalRecordStore),
			Rc::new(UsersApi::new(config.api_base_url)),
			&config.collection_key,
		)
	});
	html! {
		<ContextProvider<Coordinator> context={(*coordinator).clone()}>
			{props.children.clone()}
		</ContextProvider<Coordinator>>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		data::Field,
		testing::{user, FakeRemote, MemoryStore},
	};
	use futures::executor::block_on;
	use pretty_assertions::assert_eq;

	const KEY: &str = "users";

	fn coordinator(store: &Rc<MemoryStore>, remote: &Rc<FakeRemote>) -> Coordinator {
		Coordinator::new(store.clone(), remote.clone(), KEY)
	}

	fn valid_form() -> UserForm {
		UserForm {
			name: "Ada Lovelace".into(),
			email: "ada@engines.org".into(),
			phone: "0123456789".into(),
			street: "12 St James's Square".into(),
			city: "London".into(),
			company: "Analytical Engines".into(),
			website: "https://engines.org".into(),
		}
	}

	fn ids(users: &[User]) -> Vec<UserId> {
		users.iter().map(|user| user.id).collect()
	}

	#[test]
	fn load_fetches_and_caches_when_empty() {
		let store = Rc::new(MemoryStore::default());
		let remote = Rc::new(FakeRemote::with_users(vec![user(1, "Leanne"), user(2, "Ervin")]));
		let sync = coordinator(&store, &remote);

		let users = block_on(sync.load()).unwrap();
		assert_eq!(ids(&users), vec![1, 2]);
		assert_eq!(store.get(KEY), users);
		assert_eq!(remote.calls().list, 1);
	}

	#[test]
	fn load_serves_cache_without_remote() {
		let store = Rc::new(MemoryStore::with(KEY, vec![user(4, "Patricia")]));
		let remote = Rc::new(FakeRemote::with_users(vec![user(1, "Leanne")]));
		let sync = coordinator(&store, &remote);

		let users = block_on(sync.load()).unwrap();
		assert_eq!(ids(&users), vec![4]);
		assert_eq!(remote.calls().list, 0);
	}

	#[test]
	fn load_failure_leaves_store_empty() {
		let store = Rc::new(MemoryStore::default());
		let remote = Rc::new(FakeRemote::failing());
		let sync = coordinator(&store, &remote);

		let err = block_on(sync.load()).unwrap_err();
		assert_eq!(err.notification().as_deref(), Some("Some error occurred while getting users."));
		assert!(store.get(KEY).is_empty());
	}

	#[test]
	fn load_one_prefers_cache() {
		let store = Rc::new(MemoryStore::with(KEY, vec![user(1, "Leanne"), user(2, "Ervin")]));
		let remote = Rc::new(FakeRemote::with_users(vec![user(2, "Someone Else")]));
		let sync = coordinator(&store, &remote);

		let found = block_on(sync.load_one("2")).unwrap().unwrap();
		assert_eq!(found.name, "Ervin");
		assert_eq!(remote.calls().get, 0);
	}

	#[test]
	fn load_one_falls_back_to_remote_once_without_caching() {
		let store = Rc::new(MemoryStore::with(KEY, vec![user(1, "Leanne")]));
		let remote = Rc::new(FakeRemote::with_users(vec![user(9, "Glenna")]));
		let sync = coordinator(&store, &remote);

		let found = block_on(sync.load_one("9")).unwrap().unwrap();
		assert_eq!(found.name, "Glenna");
		assert_eq!(remote.calls().get, 1);
		assert_eq!(ids(&store.get(KEY)), vec![1]);
	}

	#[test]
	fn load_one_reports_absent_users() {
		let store = Rc::new(MemoryStore::default());
		let remote = Rc::new(FakeRemote::default());
		let sync = coordinator(&store, &remote);

		assert_eq!(block_on(sync.load_one("42")).unwrap(), None);
		assert_eq!(remote.calls().get, 1);
	}

	#[test]
	fn load_one_with_non_numeric_key_asks_remote() {
		let store = Rc::new(MemoryStore::with(KEY, vec![user(1, "Leanne")]));
		let remote = Rc::new(FakeRemote::default());
		let sync = coordinator(&store, &remote);

		assert_eq!(block_on(sync.load_one("abc")).unwrap(), None);
		assert_eq!(remote.calls().get, 1);
	}

	#[test]
	fn create_rejects_short_name_without_io() {
		let store = Rc::new(MemoryStore::default());
		let remote = Rc::new(FakeRemote::default());
		let sync = coordinator(&store, &remote);

		let mut form = valid_form();
		form.name = "Al".into();
		let err = block_on(sync.create(&form)).unwrap_err();
		let errors = err.field_errors().unwrap();
		assert_eq!(
			errors.get(Field::Name),
			Some("Name is required and must be at least 3 characters.")
		);
		assert_eq!(err.notification(), None);
		assert_eq!(remote.calls().create, 0);
		assert!(store.get(KEY).is_empty());
	}

	#[test]
	fn create_derives_username_and_appends() {
		let store = Rc::new(MemoryStore::with(KEY, vec![user(1, "Leanne")]));
		let remote = Rc::new(FakeRemote::default());
		let sync = coordinator(&store, &remote);

		let mut form = valid_form();
		form.name = "Ada  King Lovelace".into();
		let created = block_on(sync.create(&form)).unwrap();
		assert_eq!(created.username, "USER-adakinglovelace");
		assert_eq!(remote.created().unwrap().username, "USER-adakinglovelace");
		assert_eq!(ids(&store.get(KEY)), vec![1, created.id]);
	}

	#[test]
	fn create_reassigns_colliding_server_id() {
		let store = Rc::new(MemoryStore::with(KEY, vec![user(1, "Leanne"), user(11, "Created Before")]));
		let remote = Rc::new(FakeRemote::default().assigning(11));
		let sync = coordinator(&store, &remote);

		let created = block_on(sync.create(&valid_form())).unwrap();
		assert_eq!(created.id, 12);
		assert_eq!(ids(&store.get(KEY)), vec![1, 11, 12]);
	}

	#[test]
	fn create_failure_leaves_cache_alone() {
		let store = Rc::new(MemoryStore::with(KEY, vec![user(1, "Leanne")]));
		let remote = Rc::new(FakeRemote::failing());
		let sync = coordinator(&store, &remote);

		let err = block_on(sync.create(&valid_form())).unwrap_err();
		assert_eq!(err.notification().as_deref(), Some("Some error occurred while creating user."));
		assert_eq!(ids(&store.get(KEY)), vec![1]);
	}

	#[test]
	fn update_phone_rules() {
		let store = Rc::new(MemoryStore::with(KEY, vec![user(3, "Clementine")]));
		let remote = Rc::new(FakeRemote::default());
		let sync = coordinator(&store, &remote);

		let mut form = valid_form();
		form.phone = String::new();
		let err = block_on(sync.update(3, &form)).unwrap_err();
		assert_eq!(err.field_errors().unwrap().get(Field::Phone), Some("Phone number is required."));
		assert_eq!(remote.calls().update, 0);

		form.phone = "123".into();
		let updated = block_on(sync.update(3, &form)).unwrap();
		assert_eq!(updated.phone, "123");
		assert_eq!(remote.calls().update, 1);
	}

	#[test]
	fn update_merges_into_cached_record() {
		let mut original = user(3, "Clementine");
		original.username = "Samantha".into();
		original.extra.insert("nickname".into(), "Clem".into());
		let store = Rc::new(MemoryStore::with(KEY, vec![user(1, "Leanne"), original]));
		let remote = Rc::new(FakeRemote::default());
		let sync = coordinator(&store, &remote);

		let updated = block_on(sync.update(3, &valid_form())).unwrap();
		assert_eq!(updated.id, 3);
		assert_eq!(updated.username, "Samantha");
		assert_eq!(updated.name, "Ada Lovelace");
		assert_eq!(updated.address.city, "London");
		assert_eq!(updated.extra.get("nickname"), Some(&serde_json::Value::from("Clem")));

		let cached = store.get(KEY);
		assert_eq!(ids(&cached), vec![1, 3]);
		assert_eq!(cached[1], updated);
		assert_eq!(cached[0].name, "Leanne");
	}

	#[test]
	fn update_failure_writes_nothing() {
		let before = vec![user(3, "Clementine")];
		let store = Rc::new(MemoryStore::with(KEY, before.clone()));
		let remote = Rc::new(FakeRemote::failing());
		let sync = coordinator(&store, &remote);

		let err = block_on(sync.update(3, &valid_form())).unwrap_err();
		assert_eq!(err.notification().as_deref(), Some("Some error occurred while updating user."));
		assert_eq!(store.get(KEY), before);
	}

	#[test]
	fn update_of_uncached_user_is_missing() {
		let store = Rc::new(MemoryStore::default());
		let remote = Rc::new(FakeRemote::default());
		let sync = coordinator(&store, &remote);

		let err = block_on(sync.update(8, &valid_form())).unwrap_err();
		assert!(matches!(err, SyncError::Missing(8)));
		assert_eq!(remote.calls().update, 0);
	}

	#[test]
	fn delete_then_load_omits_user() {
		let store = Rc::new(MemoryStore::with(KEY, vec![user(4, "Patricia"), user(5, "Chelsey")]));
		let remote = Rc::new(FakeRemote::default());
		let sync = coordinator(&store, &remote);

		block_on(sync.delete(5)).unwrap();
		let users = block_on(sync.load()).unwrap();
		assert_eq!(ids(&users), vec![4]);
	}

	#[test]
	fn delete_failure_keeps_user() {
		let store = Rc::new(MemoryStore::with(KEY, vec![user(4, "Patricia"), user(5, "Chelsey")]));
		let remote = Rc::new(FakeRemote::failing());
		let sync = coordinator(&store, &remote);

		let err = block_on(sync.delete(5)).unwrap_err();
		assert_eq!(err.notification().as_deref(), Some("Some error occurred while deleting user."));
		assert!(store.get(KEY).iter().any(|user| user.id == 5));
	}

	#[test]
	fn load_still_returns_users_that_cannot_be_cached() {
		let store = Rc::new(MemoryStore::default().read_only());
		let remote = Rc::new(FakeRemote::with_users(vec![user(1, "Leanne"), user(2, "Ervin")]));
		let sync = coordinator(&store, &remote);

		let users = block_on(sync.load()).unwrap();
		assert_eq!(ids(&users), vec![1, 2]);
		assert!(store.get(KEY).is_empty());
	}

	#[test]
	fn storage_failure_on_write_is_reported() {
		let store = Rc::new(MemoryStore::default().read_only());
		let remote = Rc::new(FakeRemote::default());
		let sync = coordinator(&store, &remote);

		let err = block_on(sync.create(&valid_form())).unwrap_err();
		assert!(matches!(err, SyncError::Storage(_)));
		assert_eq!(
			err.notification().as_deref(),
			Some("Some error occurred while saving users locally.")
		);
	}

	#[test]
	fn ids_parse_like_js_numbers() {
		assert_eq!(parse_id("5"), Some(5));
		assert_eq!(parse_id(" 5 "), Some(5));
		assert_eq!(parse_id("5.0"), Some(5));
		assert_eq!(parse_id("5.5"), None);
		assert_eq!(parse_id("-1"), None);
		assert_eq!(parse_id("abc"), None);
	}

	#[test]
	fn load_one_finds_cached_user_from_padded_key() {
		let store = Rc::new(MemoryStore::with(KEY, vec![user(5, "Chelsey")]));
		let remote = Rc::new(FakeRemote::default());
		let sync = coordinator(&store, &remote);

		let found = block_on(sync.load_one(" 5.0")).unwrap().unwrap();
		assert_eq!(found.name, "Chelsey");
		assert_eq!(remote.calls().get, 0);
	}

	#[test]
	fn coordinators_compare_by_identity() {
		let store = Rc::new(MemoryStore::default());
		let remote = Rc::new(FakeRemote::default());
		let sync = coordinator(&store, &remote);
		assert_eq!(sync, sync.clone());
		assert_ne!(sync, coordinator(&Rc::new(MemoryStore::default()), &remote));
	}
}
