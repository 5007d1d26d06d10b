use crate::data::{NewUser, User, UserId};
use futures_util::future::LocalBoxFuture;

mod users;
pub use users::*;

pub type RemoteError = crate::response::ResponseError;

/// The service of record for users.
///
/// Every call is a single request: there is no retry, timeout, or cancellation.
/// Futures are local since the app runs entirely on the browser's event loop.
pub trait Remote {
	fn list(&self) -> LocalBoxFuture<'_, Result<Vec<User>, RemoteError>>;

	/// `Ok(None)` if the remote has no user for `id`.
	fn get<'a>(&'a self, id: &'a str) -> LocalBoxFuture<'a, Result<Option<User>, RemoteError>>;

	fn create<'a>(&'a self, user: &'a NewUser) -> LocalBoxFuture<'a, Result<User, RemoteError>>;

	fn update<'a>(&'a self, user: &'a User) -> LocalBoxFuture<'a, Result<User, RemoteError>>;

	fn delete(&self, id: UserId) -> LocalBoxFuture<'_, Result<(), RemoteError>>;
}
