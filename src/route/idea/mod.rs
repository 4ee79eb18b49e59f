use aide::axum::{
	routing::{get_with, post_with},
	ApiRouter,
};
use axum::http::StatusCode;

use crate::{error, AppState};

pub mod model;
pub mod route;
pub mod validate;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	#[error("unknown idea {0}")]
	UnknownIdea(i64),
}

pub type RouteError = error::RouteError<Error>;

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/",
			get_with(get_ideas, get_ideas_docs).post_with(create_idea, create_idea_docs),
		)
		.api_route(
			"/:id",
			get_with(get_idea, get_idea_docs)
				.put_with(update_idea, update_idea_docs)
				.delete_with(delete_idea, delete_idea_docs),
		)
		.api_route(
			"/:id/comments",
			post_with(create_comment, create_comment_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownIdea(..) => StatusCode::NOT_FOUND,
		}
	}

	fn into_errors(self) -> Vec<error::Message<'static>> {
		match self {
			Self::UnknownIdea(idea) => error::Message::new("unknown_idea")
				.content("The idea you requested does not exist.")
				.detail("idea", idea)
				.into_vec(),
		}
	}
}
