use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type UserId = u64;

/// A user record as served by the remote `/users` resource and mirrored into the local cache.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,
	#[serde(flatten)]
	pub fields: UserFields,
}

impl std::ops::Deref for User {
	type Target = UserFields;

	fn deref(&self) -> &Self::Target {
		&self.fields
	}
}
impl std::ops::DerefMut for User {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.fields
	}
}

// Everything but the id. This is also the body of a create request, the server assigns the id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserFields {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub username: String,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub phone: String,
	#[serde(default)]
	pub address: Address,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub company: Option<Company>,
	#[serde(default)]
	pub website: String,
	// Anything the api sends that isn't modeled above, kept so the cache round-trips it.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

pub type NewUser = UserFields;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Address {
	#[serde(default)]
	pub street: String,
	#[serde(default)]
	pub city: String,
	// suite, zipcode, geo, ...
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl std::fmt::Display for Address {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}, {}", self.street, self.city)
	}
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Company {
	pub name: String,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Company {
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			extra: Map::new(),
		}
	}
}

impl User {
	pub fn company_name(&self) -> Option<&str> {
		self.company.as_ref().map(|company| company.name.as_str())
	}
}
