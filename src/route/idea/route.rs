use axum::extract::State;
use macros::route;

use crate::{
	extract::{Json, Path, Query},
	openapi::tag,
	repository, Files, Ideas,
};

use super::{model, validate, Error, RouteError};

/// Maps a missing record to [`Error::UnknownIdea`].
fn unknown_idea(id: i64) -> impl FnOnce(repository::Error) -> RouteError {
	move |error| match error {
		repository::Error::NotFound => Error::UnknownIdea(id).into(),
		error => error.into(),
	}
}

/// Get all ideas
/// Returns a paginated response of all ideas, newest first. Comments are not included.
#[route(tag = tag::IDEA)]
pub async fn get_ideas(
	State(ideas): State<Ideas>,
	Query(paginate): Query<model::Paginate>,
) -> Result<Json<Vec<model::Idea>>, RouteError> {
	let ideas = ideas.list(paginate.limit(), paginate.offset()).await?;

	Ok(Json(ideas))
}

/// Get single idea
/// Returns a single idea by its unique id, including its comments.
#[route(tag = tag::IDEA)]
pub async fn get_idea(
	State(ideas): State<Ideas>,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::Idea>, RouteError> {
	let idea = ideas.get(path.id).await.map_err(unknown_idea(path.id))?;

	Ok(Json(idea))
}

/// Submit idea
/// Validates and stores a new idea. The referenced PDF must already be present in the upload directory.
#[route(tag = tag::IDEA)]
pub async fn create_idea(
	State(ideas): State<Ideas>,
	State(files): State<Files>,
	Json(input): Json<model::CreateIdeaInput>,
) -> Result<Json<model::Idea>, RouteError> {
	let mut idea = model::Idea::from(input);

	validate::check_idea(&idea, files.as_ref())?;
	ideas.insert(&mut idea).await?;

	tracing::info!(id = idea.id, submitted_by = idea.submitted_by, "idea submitted");

	Ok(Json(idea))
}

/// Update idea
/// Updates an existing idea by its unique id. Omitted fields are left unchanged, and the resulting idea is validated as a whole.
#[route(tag = tag::IDEA)]
pub async fn update_idea(
	State(ideas): State<Ideas>,
	State(files): State<Files>,
	Path(path): Path<model::IdInput>,
	Json(input): Json<model::UpdateIdeaInput>,
) -> Result<Json<model::Idea>, RouteError> {
	let mut idea = ideas.get(path.id).await.map_err(unknown_idea(path.id))?;

	input.apply_to(&mut idea);
	validate::check_idea(&idea, files.as_ref())?;

	ideas
		.update(&mut idea)
		.await
		.map_err(unknown_idea(path.id))?;

	tracing::info!(id = idea.id, version = idea.version, "idea updated");

	Ok(Json(idea))
}

/// Delete idea
/// Deletes an existing idea and its comments by its unique id.
#[route(tag = tag::IDEA)]
pub async fn delete_idea(
	State(ideas): State<Ideas>,
	Path(path): Path<model::IdInput>,
) -> Result<(), RouteError> {
	ideas
		.delete(path.id)
		.await
		.map_err(unknown_idea(path.id))?;

	tracing::info!(id = path.id, "idea deleted");

	Ok(())
}

/// Comment on idea
/// Adds a comment to an existing idea.
#[route(tag = tag::IDEA)]
pub async fn create_comment(
	State(ideas): State<Ideas>,
	Path(path): Path<model::IdInput>,
	Json(input): Json<model::CreateCommentInput>,
) -> Result<Json<model::Comment>, RouteError> {
	let mut comment = model::Comment::new(path.id, input);

	validate::check_comment(&comment)?;
	ideas
		.insert_comment(&mut comment)
		.await
		.map_err(unknown_idea(path.id))?;

	Ok(Json(comment))
}
