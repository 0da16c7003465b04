//! Comments attached to tasks.

use super::BoardServiceResult;
use crate::board::{
    domain::{Comment, CommentId, NewComment, TaskId, TextField},
    ports::BoardStore,
};
use mockable::Clock;
use std::sync::Arc;

/// Creates and maintains task comments, timestamped from an injected clock.
pub struct CommentService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for CommentService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> CommentService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    /// Creates a new comment service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Adds a comment to a task.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::Validation`] for empty or
    /// oversized text, and a not-found repository error when the task is
    /// unknown.
    pub async fn create_comment(
        &self,
        text: impl Into<String>,
        task_id: TaskId,
    ) -> BoardServiceResult<Comment> {
        let new = NewComment::new(text, task_id, &*self.clock)?;
        let comment = self
            .store
            .write(move |tx| -> BoardServiceResult<Comment> {
                tx.task_by_id(task_id)?;
                Ok(tx.create_comment(new)?)
            })
            .await?;
        tracing::debug!(comment_id = %comment.id(), %task_id, "comment created");
        Ok(comment)
    }

    /// Fetches a comment.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the comment is unknown.
    pub async fn get_comment(&self, comment_id: CommentId) -> BoardServiceResult<Comment> {
        self.store
            .read(move |tx| -> BoardServiceResult<Comment> { Ok(tx.comment_by_id(comment_id)?) })
            .await
    }

    /// Lists the task's comments, newest first.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the task is unknown.
    pub async fn list_comments(&self, task_id: TaskId) -> BoardServiceResult<Vec<Comment>> {
        let mut comments = self
            .store
            .read(move |tx| -> BoardServiceResult<Vec<Comment>> {
                Ok(tx.list_comments(task_id)?)
            })
            .await?;
        comments.reverse();
        Ok(comments)
    }

    /// Replaces the comment text; the creation timestamp is kept.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::Validation`] for invalid text, and
    /// a not-found repository error when the comment is unknown.
    pub async fn update_comment(
        &self,
        comment_id: CommentId,
        text: impl Into<String>,
    ) -> BoardServiceResult<Comment> {
        let comment_text = text.into();
        TextField::CommentText.validate(&comment_text)?;
        self.store
            .write(move |tx| -> BoardServiceResult<Comment> {
                let mut comment = tx.comment_by_id(comment_id)?;
                comment.edit_text(comment_text)?;
                Ok(tx.update_comment(&comment)?)
            })
            .await
    }

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the comment is unknown.
    pub async fn delete_comment(&self, comment_id: CommentId) -> BoardServiceResult<()> {
        self.store
            .write(move |tx| -> BoardServiceResult<()> { Ok(tx.delete_comment(comment_id)?) })
            .await?;
        tracing::debug!(%comment_id, "comment deleted");
        Ok(())
    }
}
