//! Build-time configuration.
//!
//! The app is shipped as a static bundle, so everything here is resolved when the
//! wasm module is compiled. `USER_API_URL` may be set in the build environment to
//! point the client at a different host exposing the same `/users` resource.

pub static API_BASE_URL: &str = match option_env!("USER_API_URL") {
	Some(url) => url,
	None => "https://jsonplaceholder.typicode.com",
};

/// The `localStorage` key holding the cached user collection.
pub static USERS_STORAGE_KEY: &str = "users";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
	pub api_base_url: String,
	pub collection_key: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			api_base_url: API_BASE_URL.trim_end_matches('/').to_owned(),
			collection_key: USERS_STORAGE_KEY.to_owned(),
		}
	}
}
