//! Task repository
//!
//! Five persistence operations over the `tasks` table, each atomic at the
//! statement level. There are no cross-operation transactions: concurrent
//! create/update/delete against the same task_id may interleave, and the
//! update path tolerates a racing delete by re-reading (last-write-wins).

use sqlx::{PgPool, Postgres, QueryBuilder};

use super::DbError;
use crate::models::{NewTask, Page, Patch, Task, TaskPatch};

const SELECT_TASK: &str = "SELECT task_id, title, description, status, due_date, \
     created_at, updated_at FROM tasks WHERE task_id = $1";

/// Task repository
pub struct TaskRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TaskRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new task and return the stored record.
    ///
    /// The row is re-read after the insert so the returned timestamps and
    /// defaults are what the datastore actually stored, not client-side
    /// assumptions.
    pub async fn create(&self, new: &NewTask) -> Result<Task, DbError> {
        let (task_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO tasks (title, description, status, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING task_id
            "#,
        )
        .bind(new.title.as_str())
        .bind(new.description.as_deref())
        .bind(new.status)
        .bind(new.due_date)
        .fetch_one(self.pool)
        .await?;

        tracing::info!(task_id, "task created");

        // Vanishing between insert and re-read means someone deleted the row
        // already; surface it as a storage error, never a partial record.
        match self.get(task_id).await? {
            Some(task) => Ok(task),
            None => Err(DbError::Sqlx(sqlx::Error::RowNotFound)),
        }
    }

    /// Fetch a single task by id.
    ///
    /// `Ok(None)` is the not-found outcome; a storage failure is a distinct
    /// `Err` even where callers collapse the two externally.
    pub async fn get(&self, task_id: i64) -> Result<Option<Task>, DbError> {
        let task = sqlx::query_as::<_, Task>(SELECT_TASK)
            .bind(task_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(task)
    }

    /// List tasks, most recently created first.
    ///
    /// `task_id DESC` breaks created_at ties so pagination stays disjoint.
    pub async fn list(&self, page: Page) -> Result<Vec<Task>, DbError> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT task_id, title, description, status, due_date, created_at, updated_at
            FROM tasks
            ORDER BY created_at DESC, task_id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(self.pool)
        .await?;

        Ok(tasks)
    }

    /// Apply a partial update and return the post-update record.
    ///
    /// Confirms existence first and returns `NotFound` without writing if
    /// the task is missing. An empty patch is a no-op returning the existing
    /// record (`updated_at` untouched). The existence check and the write
    /// are separate statements; a delete landing between them affects zero
    /// rows, which is logged and resolved by re-reading whatever is current.
    pub async fn update(&self, task_id: i64, patch: &TaskPatch) -> Result<Task, DbError> {
        let Some(existing) = self.get(task_id).await? else {
            return Err(DbError::NotFound {
                resource: "task",
                id: task_id,
            });
        };

        if patch.is_empty() {
            return Ok(existing);
        }

        // SET clause built from exactly the supplied fields; column names
        // are static strings, values are always bound parameters.
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE tasks SET updated_at = now()");

        if let Patch::Value(title) = &patch.title {
            qb.push(", title = ").push_bind(title.as_str());
        }
        match &patch.description {
            Patch::Value(description) => {
                qb.push(", description = ").push_bind(description.as_str());
            }
            Patch::Null => {
                qb.push(", description = NULL");
            }
            Patch::Absent => {}
        }
        if let Patch::Value(status) = &patch.status {
            qb.push(", status = ").push_bind(*status);
        }
        match &patch.due_date {
            Patch::Value(due_date) => {
                qb.push(", due_date = ").push_bind(*due_date);
            }
            Patch::Null => {
                qb.push(", due_date = NULL");
            }
            Patch::Absent => {}
        }

        qb.push(" WHERE task_id = ").push_bind(task_id);

        let result = qb.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            tracing::warn!(task_id, "update affected no rows; concurrent delete likely");
        } else {
            tracing::info!(task_id, "task updated");
        }

        match self.get(task_id).await? {
            Some(task) => Ok(task),
            None => Err(DbError::NotFound {
                resource: "task",
                id: task_id,
            }),
        }
    }

    /// Delete a task; `Ok(false)` means no row matched.
    pub async fn delete(&self, task_id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM tasks WHERE task_id = $1")
            .bind(task_id)
            .execute(self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(task_id, "task deleted");
        }
        Ok(deleted)
    }
}
