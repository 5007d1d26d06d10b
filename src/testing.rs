//! In-memory stand-ins for the browser storage and the rest api.

use crate::{
	api::{Remote, RemoteError},
	data::{NewUser, User, UserFields, UserId},
	response::ResponseError,
	storage::{RecordStore, StorageError},
};
use futures_util::{future::LocalBoxFuture, FutureExt};
use reqwest::StatusCode;
use std::{
	cell::{Cell, RefCell},
	collections::HashMap,
};

pub fn user(id: UserId, name: &str) -> User {
	User {
		id,
		fields: UserFields {
			name: name.to_owned(),
			email: format!("{}@example.com", name.to_lowercase()),
			phone: "5550000000".into(),
			..Default::default()
		},
	}
}

#[derive(Default)]
pub struct MemoryStore {
	collections: RefCell<HashMap<String, Vec<User>>>,
	read_only: bool,
}

impl MemoryStore {
	pub fn with(key: &str, users: Vec<User>) -> Self {
		let store = Self::default();
		store.collections.borrow_mut().insert(key.to_owned(), users);
		store
	}

	pub fn read_only(mut self) -> Self {
		self.read_only = true;
		self
	}
}

impl RecordStore for MemoryStore {
	fn get(&self, key: &str) -> Vec<User> {
		self.collections.borrow().get(key).cloned().unwrap_or_default()
	}

	fn set(&self, key: &str, users: &[User]) -> Result<(), StorageError> {
		if self.read_only {
			return Err(StorageError::Write {
				key: key.to_owned(),
				source: gloo_storage::errors::StorageError::KeyNotFound(key.to_owned()),
			});
		}
		self.collections.borrow_mut().insert(key.to_owned(), users.to_vec());
		Ok(())
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Calls {
	pub list: usize,
	pub get: usize,
	pub create: usize,
	pub update: usize,
	pub delete: usize,
}

/// Serves a fixed set of users, echoing writes back the way the demo api does.
#[derive(Default)]
pub struct FakeRemote {
	users: Vec<User>,
	failing: bool,
	assigned_id: Option<UserId>,
	calls: Cell<Calls>,
	created: RefCell<Option<NewUser>>,
}

impl FakeRemote {
	pub fn with_users(users: Vec<User>) -> Self {
		Self {
			users,
			..Default::default()
		}
	}

	/// Every call fails with a server error.
	pub fn failing() -> Self {
		Self {
			failing: true,
			..Default::default()
		}
	}

	/// The id handed to every created user.
	pub fn assigning(mut self, id: UserId) -> Self {
		self.assigned_id = Some(id);
		self
	}

	pub fn calls(&self) -> Calls {
		self.calls.get()
	}

	/// The body of the most recent create request.
	pub fn created(&self) -> Option<NewUser> {
		self.created.borrow().clone()
	}

	fn record(&self, count: impl FnOnce(&mut Calls)) -> Result<(), RemoteError> {
		let mut calls = self.calls.get();
		count(&mut calls);
		self.calls.set(calls);
		match self.failing {
			true => Err(ResponseError::Status(StatusCode::INTERNAL_SERVER_ERROR)),
			false => Ok(()),
		}
	}
}

impl Remote for FakeRemote {
	fn list(&self) -> LocalBoxFuture<'_, Result<Vec<User>, RemoteError>> {
		async move {
			self.record(|calls| calls.list += 1)?;
			Ok(self.users.clone())
		}
		.boxed_local()
	}

	fn get<'a>(&'a self, id: &'a str) -> LocalBoxFuture<'a, Result<Option<User>, RemoteError>> {
		async move {
			self.record(|calls| calls.get += 1)?;
			Ok(self.users.iter().find(|user| user.id.to_string() == id).cloned())
		}
		.boxed_local()
	}

	fn create<'a>(&'a self, user: &'a NewUser) -> LocalBoxFuture<'a, Result<User, RemoteError>> {
		async move {
			self.record(|calls| calls.create += 1)?;
			*self.created.borrow_mut() = Some(user.clone());
			Ok(User {
				id: self.assigned_id.unwrap_or(101),
				fields: user.clone(),
			})
		}
		.boxed_local()
	}

	fn update<'a>(&'a self, user: &'a User) -> LocalBoxFuture<'a, Result<User, RemoteError>> {
		async move {
			self.record(|calls| calls.update += 1)?;
			Ok(user.clone())
		}
		.boxed_local()
	}

	fn delete(&self, _id: UserId) -> LocalBoxFuture<'_, Result<(), RemoteError>> {
		async move { self.record(|calls| calls.delete += 1) }.boxed_local()
	}
}
