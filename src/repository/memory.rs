use std::{
	collections::BTreeMap,
	sync::{Mutex, MutexGuard, PoisonError},
};

use chrono::Utc;

use super::{Error, IdeaRepository};
use crate::route::idea::model::{Comment, Idea};

#[derive(Debug, Default)]
struct Store {
	ideas: BTreeMap<i64, Idea>,
	comments: BTreeMap<i64, Comment>,
	last_idea_id: i64,
	last_comment_id: i64,
}

/// In-memory implementation of [`IdeaRepository`].
///
/// Used when no database is configured, and in tests.
#[derive(Debug, Default)]
pub struct MemoryIdeaRepository {
	store: Mutex<Store>,
}

impl MemoryIdeaRepository {
	fn store(&self) -> MutexGuard<'_, Store> {
		self.store.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

#[axum::async_trait]
impl IdeaRepository for MemoryIdeaRepository {
	async fn insert(&self, idea: &mut Idea) -> Result<(), Error> {
		let mut store = self.store();
		let now = Utc::now();

		store.last_idea_id += 1;

		idea.id = store.last_idea_id;
		idea.created_at = now;
		idea.submitted_at = now;
		idea.version = 1;
		idea.comments.clear();

		store.ideas.insert(idea.id, idea.clone());

		Ok(())
	}

	async fn get(&self, id: i64) -> Result<Idea, Error> {
		let store = self.store();
		let mut idea = store.ideas.get(&id).cloned().ok_or(Error::NotFound)?;

		idea.comments = store
			.comments
			.values()
			.filter(|comment| comment.idea_id == id)
			.cloned()
			.collect();

		Ok(idea)
	}

	async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Idea>, Error> {
		let store = self.store();

		// Ids are handed out in creation order
		Ok(store
			.ideas
			.values()
			.rev()
			.skip(usize::try_from(offset).unwrap_or(0))
			.take(usize::try_from(limit).unwrap_or(0))
			.cloned()
			.collect())
	}

	async fn update(&self, idea: &mut Idea) -> Result<(), Error> {
		let mut store = self.store();
		let stored = store.ideas.get_mut(&idea.id).ok_or(Error::NotFound)?;

		stored.title.clone_from(&idea.title);
		stored.description.clone_from(&idea.description);
		stored.category.clone_from(&idea.category);
		stored.pdf.clone_from(&idea.pdf);
		stored.tags.clone_from(&idea.tags);
		stored.submitted_by = idea.submitted_by;
		stored.status = idea.status;
		stored.version += 1;

		idea.version = stored.version;

		Ok(())
	}

	async fn delete(&self, id: i64) -> Result<(), Error> {
		let mut store = self.store();

		store.ideas.remove(&id).ok_or(Error::NotFound)?;
		store.comments.retain(|_, comment| comment.idea_id != id);

		Ok(())
	}

	async fn insert_comment(&self, comment: &mut Comment) -> Result<(), Error> {
		let mut store = self.store();

		if !store.ideas.contains_key(&comment.idea_id) {
			return Err(Error::NotFound);
		}

		store.last_comment_id += 1;

		comment.id = store.last_comment_id;
		comment.created_at = Utc::now();

		store.comments.insert(comment.id, comment.clone());

		Ok(())
	}
}
