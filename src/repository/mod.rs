mod memory;
mod postgres;

pub use memory::MemoryIdeaRepository;
pub use postgres::PgIdeaRepository;

use crate::route::idea::model::{Comment, Idea};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("record not found")]
	NotFound,
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
	#[error("migration error: {0}")]
	Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Storage for ideas and the comments left on them.
#[axum::async_trait]
pub trait IdeaRepository: Send + Sync {
	/// Stores a new idea, filling in its id, timestamps and version.
	async fn insert(&self, idea: &mut Idea) -> Result<(), Error>;

	/// Fetches a single idea along with its comments, oldest first.
	async fn get(&self, id: i64) -> Result<Idea, Error>;

	/// Lists ideas newest first, without their comments.
	async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Idea>, Error>;

	/// Overwrites the stored idea with the same id and bumps its version.
	async fn update(&self, idea: &mut Idea) -> Result<(), Error>;

	/// Deletes an idea and its comments.
	async fn delete(&self, id: i64) -> Result<(), Error>;

	/// Stores a comment on an existing idea, filling in its id and creation time.
	async fn insert_comment(&self, comment: &mut Comment) -> Result<(), Error>;
}
