use super::{Remote, RemoteError};
use crate::{
	data::{NewUser, User, UserId},
	response::Response,
};
use futures_util::{future::LocalBoxFuture, FutureExt};
use reqwest::Method;
use serde::de::{DeserializeOwned, IgnoredAny};

/// Client for the `/users` rest resource.
#[derive(Debug, Clone)]
pub struct UsersApi {
	client: reqwest::Client,
	base_url: String,
}

impl UsersApi {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			client: reqwest::Client::new(),
			base_url: base_url.into(),
		}
	}

	fn endpoint(&self, id: Option<&str>) -> String {
		match id {
			None => format!("{}/users", self.base_url),
			Some(id) => format!("{}/users/{}", self.base_url, urlencoding::encode(id)),
		}
	}

	fn request<T>(&self, method: Method, id: Option<&str>) -> Response<T>
	where
		T: DeserializeOwned,
	{
		let mut builder = self.client.request(method, self.endpoint(id));
		builder = builder.header("Accept", "application/json");
		Response::<T>::from(builder)
	}
}

impl Remote for UsersApi {
	fn list(&self) -> LocalBoxFuture<'_, Result<Vec<User>, RemoteError>> {
		self.request::<Vec<User>>(Method::GET, None).send().boxed_local()
	}

	fn get<'a>(&'a self, id: &'a str) -> LocalBoxFuture<'a, Result<Option<User>, RemoteError>> {
		self.request::<User>(Method::GET, Some(id)).send_optional().boxed_local()
	}

	fn create<'a>(&'a self, user: &'a NewUser) -> LocalBoxFuture<'a, Result<User, RemoteError>> {
		self.request::<User>(Method::POST, None).with_json(user).send().boxed_local()
	}

	fn update<'a>(&'a self, user: &'a User) -> LocalBoxFuture<'a, Result<User, RemoteError>> {
		let id = user.id.to_string();
		async move {
			self.request::<User>(Method::PUT, Some(&id))
				.with_json(user)
				.send()
				.await
		}
		.boxed_local()
	}

	fn delete(&self, id: UserId) -> LocalBoxFuture<'_, Result<(), RemoteError>> {
		let id = id.to_string();
		async move {
			self.request::<IgnoredAny>(Method::DELETE, Some(&id)).send_discard().await
		}
		.boxed_local()
	}
}
