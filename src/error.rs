use std::borrow::Cow;

use aide::OperationOutput;
use axum::{
	body::Body,
	extract::rejection,
	http::{Response, StatusCode},
	response::IntoResponse,
	Json,
};
use schemars::JsonSchema;
use serde::Serialize;
use validator::ValidationErrors;

use crate::repository;

pub type Map = serde_json::Map<String, serde_json::Value>;

/// A single error message sent to the client.
///
/// Error responses are always a list of these, so a client can
/// report every problem with a request at once.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Message<'a> {
	/// A machine-readable error code, such as `required` or `unknown_idea`.
	pub code: Cow<'a, str>,
	/// A human-readable description of the error.
	pub content: Cow<'a, str>,
	/// The request field that caused the error, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<Cow<'a, str>>,
	/// Extra information about the error, such as the limit that was exceeded.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Cow<'a, Map>>,
}

impl<'a> Message<'a> {
	pub fn new(code: impl Into<Cow<'a, str>>) -> Self {
		let code = code.into();

		Self {
			content: code.clone(),
			code,
			field: None,
			details: None,
		}
	}

	pub fn content(mut self, content: impl Into<Cow<'a, str>>) -> Self {
		self.content = content.into();
		self
	}

	pub fn field(mut self, field: impl Into<Cow<'a, str>>) -> Self {
		self.field = Some(field.into());
		self
	}

	pub fn detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.details
			.get_or_insert_with(|| Cow::Owned(Map::new()))
			.to_mut()
			.insert(key.into(), value.into());
		self
	}

	pub fn into_vec(self) -> Vec<Self> {
		vec![self]
	}
}

/// The shape of a route-specific error: which status it maps to
/// and which messages are sent to the client.
pub trait ErrorShape {
	fn status(&self) -> StatusCode;

	fn into_errors(self) -> Vec<Message<'static>>;
}

/// Error type shared by every route.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error("validation error: {0}")]
	Validation(#[from] ValidationErrors),
	#[error("json error: {0}")]
	Json(#[from] rejection::JsonRejection),
	#[error("query error: {0}")]
	Query(#[from] rejection::QueryRejection),
	#[error("path error: {0}")]
	Path(#[from] rejection::PathRejection),
	#[error("repository error: {0}")]
	Repository(#[from] repository::Error),
}

impl AppError {
	fn status(&self) -> StatusCode {
		match self {
			Self::Validation(..) | Self::Query(..) | Self::Path(..) => StatusCode::BAD_REQUEST,
			Self::Json(rejection) => rejection.status(),
			Self::Repository(..) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn into_errors(self) -> Vec<Message<'static>> {
		match self {
			Self::Validation(errors) => validation_messages(&errors),
			Self::Json(rejection) => Message::new("invalid_json")
				.content(rejection.body_text())
				.into_vec(),
			Self::Query(rejection) => Message::new("invalid_query")
				.content(rejection.body_text())
				.into_vec(),
			Self::Path(rejection) => Message::new("invalid_path")
				.content(rejection.body_text())
				.into_vec(),
			Self::Repository(error) => {
				tracing::error!(%error, "storage failure");

				Message::new("internal_error")
					.content("An internal error occurred.")
					.into_vec()
			}
		}
	}
}

/// Flattens validation errors into one message per violation,
/// ordered by field name and then by the order the checks ran in.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<Message<'static>> {
	let mut fields = errors
		.field_errors()
		.into_iter()
		.map(|(field, errors)| (field.to_string(), errors))
		.collect::<Vec<_>>();

	fields.sort_by(|a, b| a.0.cmp(&b.0));

	fields
		.into_iter()
		.flat_map(|(field, errors)| {
			errors.iter().map(move |error| {
				let mut message = Message::new(error.code.to_string()).field(field.clone());

				if let Some(content) = &error.message {
					message = message.content(content.to_string());
				}

				for (key, value) in &error.params {
					message = message.detail(key.to_string(), value.clone());
				}

				message
			})
		})
		.collect()
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response<Body> {
		(self.status(), Json(self.into_errors())).into_response()
	}
}

/// The error returned by route handlers: either a shared [`AppError`]
/// or the route's own error type.
#[derive(Debug)]
pub enum RouteError<T> {
	App(AppError),
	Route(T),
}

impl<T: ErrorShape> From<T> for RouteError<T> {
	fn from(error: T) -> Self {
		Self::Route(error)
	}
}

impl<T> From<AppError> for RouteError<T> {
	fn from(error: AppError) -> Self {
		Self::App(error)
	}
}

impl<T> From<ValidationErrors> for RouteError<T> {
	fn from(errors: ValidationErrors) -> Self {
		Self::App(AppError::Validation(errors))
	}
}

impl<T> From<repository::Error> for RouteError<T> {
	fn from(error: repository::Error) -> Self {
		Self::App(AppError::Repository(error))
	}
}

impl<T: ErrorShape> IntoResponse for RouteError<T> {
	fn into_response(self) -> Response<Body> {
		match self {
			Self::App(error) => error.into_response(),
			Self::Route(error) => (error.status(), Json(error.into_errors())).into_response(),
		}
	}
}

impl<T> OperationOutput for RouteError<T> {
	type Inner = Vec<Message<'static>>;
}
