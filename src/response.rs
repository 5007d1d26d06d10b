use reqwest::{RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

/// A request whose successful response body decodes as `T`.
pub struct Response<T> {
	builder: RequestBuilder,
	marker: std::marker::PhantomData<T>,
}
impl<T> std::fmt::Debug for Response<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.builder.fmt(f)
	}
}
impl<T> Response<T>
where
	T: DeserializeOwned,
{
	pub fn from(builder: RequestBuilder) -> Self {
		Self {
			builder,
			marker: Default::default(),
		}
	}

	pub fn with_json<Q>(mut self, json: &Q) -> Self
	where
		Q: Serialize + ?Sized,
	{
		self.builder = self.builder.json(json);
		self
	}

	pub async fn send(self) -> Result<T, ResponseError> {
		match self.send_optional().await? {
			Some(data) => Ok(data),
			None => Err(ResponseError::Status(StatusCode::NOT_FOUND)),
		}
	}

	/// Like [`Response::send`], but a `404 Not Found` is `Ok(None)` instead of an error.
	pub async fn send_optional(self) -> Result<Option<T>, ResponseError> {
		let response: reqwest::Response = self.builder.send().await?;
		let status = response.status();
		if status == StatusCode::NOT_FOUND {
			return Ok(None);
		}
		if !status.is_success() {
			return Err(ResponseError::Status(status));
		}
		let text = response.text().await?;
		let output = match serde_json::from_str(&text) {
			Ok(data) => data,
			Err(err) => {
				return Err(InvalidJson(text, err).into());
			}
		};
		Ok(Some(output))
	}

	/// Sends the request, only checking that it succeeded. The body is not read.
	pub async fn send_discard(self) -> Result<(), ResponseError> {
		let response: reqwest::Response = self.builder.send().await?;
		match response.status() {
			status if status.is_success() => Ok(()),
			status => Err(ResponseError::Status(status)),
		}
	}
}

#[derive(thiserror::Error, Debug)]
pub enum ResponseError {
	#[error(transparent)]
	Request(#[from] reqwest::Error),
	#[error("server responded with {0}")]
	Status(StatusCode),
	#[error(transparent)]
	InvalidJson(#[from] InvalidJson),
}

#[derive(thiserror::Error, Debug)]
pub struct InvalidJson(pub String, pub serde_json::Error);
impl std::fmt::Display for InvalidJson {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Invalid json: {:?}\nError: {:?}", self.0, self.1)
	}
}
