pub use crate::route::model::{IdInput, Paginate};

use crate::route::model::null_as_default;

use chrono::{DateTime, Utc};
use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where an idea is in the review process.
#[derive(
	Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "idea_status", rename_all = "lowercase")]
pub enum IdeaStatus {
	#[default]
	Pending,
	Approved,
	Rejected,
}

/// A single idea, submitted by a user for review.
///
/// Missing or `null` fields in a request body default to their empty value,
/// so they are reported by validation rather than rejected as malformed JSON.
#[model]
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct Idea {
	/// The unique identifier of the idea.
	#[serde(skip_deserializing)]
	pub id: i64,
	/// The creation time of the record.
	#[serde(skip_deserializing)]
	pub created_at: DateTime<Utc>,
	/// The title of the idea, at most 100 bytes.
	#[serde(default, deserialize_with = "null_as_default")]
	pub title: String,
	/// A detailed description of the idea, at most 1000 bytes.
	#[serde(default, deserialize_with = "null_as_default")]
	pub description: String,
	/// The category of the idea, at most 50 bytes.
	#[serde(default, deserialize_with = "null_as_default")]
	pub category: String,
	/// Path of the PDF document describing the idea, relative to the upload directory.
	#[serde(default, deserialize_with = "null_as_default")]
	pub pdf: String,
	/// Tags associated with the idea. At least one is required, and they must be unique.
	#[serde(default, deserialize_with = "null_as_default")]
	pub tags: Vec<String>,
	/// The user that submitted the idea.
	#[serde(default, deserialize_with = "null_as_default")]
	pub submitted_by: i64,
	/// When the idea was submitted.
	#[serde(skip_deserializing)]
	pub submitted_at: DateTime<Utc>,
	#[serde(skip_deserializing)]
	pub upvotes: i32,
	#[serde(skip_deserializing)]
	pub downvotes: i32,
	/// The review status of the idea.
	#[serde(skip_deserializing)]
	pub status: IdeaStatus,
	/// Comments left on the idea, oldest first. Only filled in when fetching a single idea.
	#[serde(skip_deserializing)]
	pub comments: Vec<Comment>,
	/// Users that are interested in the idea.
	#[serde(skip_deserializing)]
	pub interested_users: Vec<i64>,
	/// Incremented on every update.
	#[serde(skip_deserializing)]
	pub version: i32,
}

impl From<CreateIdeaInput> for Idea {
	fn from(input: CreateIdeaInput) -> Self {
		Self {
			title: input.title,
			description: input.description,
			category: input.category,
			pdf: input.pdf,
			tags: input.tags,
			submitted_by: input.submitted_by,
			..Self::default()
		}
	}
}

impl UpdateIdeaInput {
	/// Overwrites the fields of `idea` that are present in the input.
	pub fn apply_to(self, idea: &mut Idea) {
		if let Some(title) = self.title {
			idea.title = title;
		}

		if let Some(description) = self.description {
			idea.description = description;
		}

		if let Some(category) = self.category {
			idea.category = category;
		}

		if let Some(pdf) = self.pdf {
			idea.pdf = pdf;
		}

		if let Some(tags) = self.tags {
			idea.tags = tags;
		}

		if let Some(submitted_by) = self.submitted_by {
			idea.submitted_by = submitted_by;
		}
	}
}

/// A comment left on an idea.
#[model(create_only)]
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct Comment {
	/// The unique identifier of the comment.
	#[serde(skip_deserializing)]
	pub id: i64,
	/// The idea the comment belongs to.
	#[serde(skip_deserializing)]
	pub idea_id: i64,
	/// The user that wrote the comment.
	#[serde(default, deserialize_with = "null_as_default")]
	pub commented_by: i64,
	/// The content of the comment, at most 1000 bytes.
	#[serde(default, deserialize_with = "null_as_default")]
	pub content: String,
	/// The creation time of the comment.
	#[serde(skip_deserializing)]
	pub created_at: DateTime<Utc>,
}

impl Comment {
	pub fn new(idea_id: i64, input: CreateCommentInput) -> Self {
		Self {
			idea_id,
			commented_by: input.commented_by,
			content: input.content,
			..Self::default()
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_missing_fields_default_to_empty() {
		let input: CreateIdeaInput = serde_json::from_str(r#"{ "title": "Idea" }"#).unwrap();
		let idea = Idea::from(input);

		assert_eq!(idea.title, "Idea");
		assert!(idea.tags.is_empty());
		assert_eq!(idea.submitted_by, 0);
		assert_eq!(idea.status, IdeaStatus::Pending);
	}

	#[test]
	fn test_null_fields_default_to_empty() {
		let input: CreateIdeaInput =
			serde_json::from_str(r#"{ "title": null, "tags": null, "submitted_by": null }"#).unwrap();
		let idea = Idea::from(input);

		assert!(idea.title.is_empty());
		assert!(idea.tags.is_empty());
		assert_eq!(idea.submitted_by, 0);

		let input: UpdateIdeaInput = serde_json::from_str(r#"{ "title": null }"#).unwrap();

		assert_eq!(input.title, None);

		let input: CreateCommentInput = serde_json::from_str(r#"{ "content": null }"#).unwrap();

		assert!(input.content.is_empty());
	}

	#[test]
	fn test_server_fields_are_ignored() {
		let input: CreateIdeaInput =
			serde_json::from_str(r#"{ "title": "Idea", "id": 7, "version": 9, "status": "approved" }"#)
				.unwrap();
		let idea = Idea::from(input);

		assert_eq!(idea.id, 0);
		assert_eq!(idea.version, 0);
		assert_eq!(idea.status, IdeaStatus::Pending);
	}

	#[test]
	fn test_apply_update() {
		let mut idea = Idea {
			title: "Old".into(),
			category: "cat".into(),
			tags: vec!["a".into()],
			..Idea::default()
		};

		let input: UpdateIdeaInput =
			serde_json::from_str(r#"{ "title": "New", "tags": ["b", "c"] }"#).unwrap();

		input.apply_to(&mut idea);

		assert_eq!(idea.title, "New");
		assert_eq!(idea.category, "cat");
		assert_eq!(idea.tags, ["b", "c"]);
	}

	#[test]
	fn test_status_is_lowercase() {
		assert_eq!(
			serde_json::to_value(IdeaStatus::Approved).unwrap(),
			serde_json::json!("approved")
		);
	}
}
