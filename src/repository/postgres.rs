use chrono::{DateTime, Utc};

use super::{Error, IdeaRepository};
use crate::{
	route::idea::model::{Comment, Idea, IdeaStatus},
	Database,
};

/// Foreign key from `comment.idea_id` to `idea.id`.
const COMMENT_IDEA_FKEY: &str = "comment_idea_id_fkey";

#[derive(sqlx::FromRow)]
struct IdeaRow {
	id: i64,
	created_at: DateTime<Utc>,
	title: String,
	description: String,
	category: String,
	pdf: String,
	tags: Vec<String>,
	submitted_by: i64,
	submitted_at: DateTime<Utc>,
	upvotes: i32,
	downvotes: i32,
	status: IdeaStatus,
	interested_users: Vec<i64>,
	version: i32,
}

impl From<IdeaRow> for Idea {
	fn from(row: IdeaRow) -> Self {
		Self {
			id: row.id,
			created_at: row.created_at,
			title: row.title,
			description: row.description,
			category: row.category,
			pdf: row.pdf,
			tags: row.tags,
			submitted_by: row.submitted_by,
			submitted_at: row.submitted_at,
			upvotes: row.upvotes,
			downvotes: row.downvotes,
			status: row.status,
			comments: Vec::new(),
			interested_users: row.interested_users,
			version: row.version,
		}
	}
}

#[derive(sqlx::FromRow)]
struct CommentRow {
	id: i64,
	idea_id: i64,
	commented_by: i64,
	content: String,
	created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
	fn from(row: CommentRow) -> Self {
		Self {
			id: row.id,
			idea_id: row.idea_id,
			commented_by: row.commented_by,
			content: row.content,
			created_at: row.created_at,
		}
	}
}

/// [`IdeaRepository`] backed by a Postgres database.
#[derive(Debug, Clone)]
pub struct PgIdeaRepository {
	database: Database,
}

impl PgIdeaRepository {
	/// Connects to the database and brings its schema up to date.
	pub async fn connect(url: &str) -> Result<Self, Error> {
		let database = Database::connect(url).await?;

		sqlx::migrate!().run(&database).await?;
		tracing::info!("database migrations applied");

		Ok(Self { database })
	}
}

#[axum::async_trait]
impl IdeaRepository for PgIdeaRepository {
	async fn insert(&self, idea: &mut Idea) -> Result<(), Error> {
		let (id, created_at, submitted_at, version) =
			sqlx::query_as::<_, (i64, DateTime<Utc>, DateTime<Utc>, i32)>(
				r#"
					INSERT INTO idea (title, description, category, pdf, tags, submitted_by, status)
					VALUES ($1, $2, $3, $4, $5, $6, $7)
					RETURNING id, created_at, submitted_at, version
				"#,
			)
			.bind(&idea.title)
			.bind(&idea.description)
			.bind(&idea.category)
			.bind(&idea.pdf)
			.bind(&idea.tags)
			.bind(idea.submitted_by)
			.bind(idea.status)
			.fetch_one(&self.database)
			.await?;

		idea.id = id;
		idea.created_at = created_at;
		idea.submitted_at = submitted_at;
		idea.version = version;
		idea.comments.clear();

		Ok(())
	}

	async fn get(&self, id: i64) -> Result<Idea, Error> {
		let idea = sqlx::query_as::<_, IdeaRow>(
			r#"
				SELECT * FROM idea
				WHERE id = $1
			"#,
		)
		.bind(id)
		.fetch_optional(&self.database)
		.await?
		.ok_or(Error::NotFound)?;

		let comments = sqlx::query_as::<_, CommentRow>(
			r#"
				SELECT * FROM comment
				WHERE idea_id = $1
				ORDER BY created_at, id
			"#,
		)
		.bind(id)
		.fetch_all(&self.database)
		.await?;

		let mut idea = Idea::from(idea);
		idea.comments = comments.into_iter().map(Comment::from).collect();

		Ok(idea)
	}

	async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Idea>, Error> {
		let ideas = sqlx::query_as::<_, IdeaRow>(
			r#"
				SELECT * FROM idea
				ORDER BY created_at DESC, id DESC
				LIMIT $1 OFFSET $2
			"#,
		)
		.bind(limit)
		.bind(offset)
		.fetch_all(&self.database)
		.await?;

		Ok(ideas.into_iter().map(Idea::from).collect())
	}

	async fn update(&self, idea: &mut Idea) -> Result<(), Error> {
		let version = sqlx::query_scalar::<_, i32>(
			r#"
				UPDATE idea
				SET title = $1, description = $2, category = $3, pdf = $4,
					tags = $5, submitted_by = $6, status = $7, version = version + 1
				WHERE id = $8
				RETURNING version
			"#,
		)
		.bind(&idea.title)
		.bind(&idea.description)
		.bind(&idea.category)
		.bind(&idea.pdf)
		.bind(&idea.tags)
		.bind(idea.submitted_by)
		.bind(idea.status)
		.bind(idea.id)
		.fetch_optional(&self.database)
		.await?
		.ok_or(Error::NotFound)?;

		idea.version = version;

		Ok(())
	}

	async fn delete(&self, id: i64) -> Result<(), Error> {
		let status = sqlx::query(
			r#"
				DELETE FROM idea
				WHERE id = $1
			"#,
		)
		.bind(id)
		.execute(&self.database)
		.await?;

		if status.rows_affected() == 0 {
			return Err(Error::NotFound);
		}

		Ok(())
	}

	async fn insert_comment(&self, comment: &mut Comment) -> Result<(), Error> {
		let (id, created_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
			r#"
				INSERT INTO comment (idea_id, commented_by, content)
				VALUES ($1, $2, $3)
				RETURNING id, created_at
			"#,
		)
		.bind(comment.idea_id)
		.bind(comment.commented_by)
		.bind(&comment.content)
		.fetch_one(&self.database)
		.await
		.map_err(|e| match e {
			sqlx::Error::Database(ref d) if d.constraint() == Some(COMMENT_IDEA_FKEY) => {
				Error::NotFound
			}
			e => Error::Database(e),
		})?;

		comment.id = id;
		comment.created_at = created_at;

		Ok(())
	}
}
