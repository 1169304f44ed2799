use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{RemoteError, Session, SupabaseClient, ensure_success};
use crate::core::task::{Task, TaskFields};

const TABLE: &str = "tasks";

#[derive(Serialize)]
struct NewTaskRow<'a> {
    #[serde(flatten)]
    fields: &'a TaskFields,
    user_id: Uuid,
}

#[derive(Serialize)]
struct TaskPatch<'a> {
    #[serde(flatten)]
    fields: &'a TaskFields,
    updated_at: DateTime<Utc>,
}

/// Query filter restricting rows to the session's owner. Every task request carries it.
pub(crate) fn owner_scope(session: &Session) -> (&'static str, String) {
    ("user_id", format!("eq.{}", session.owner_id()))
}

/// Filters addressing one row of the owner.
pub(crate) fn row_scope(id: Uuid, session: &Session) -> [(&'static str, String); 2] {
    [("id", format!("eq.{}", id)), owner_scope(session)]
}

impl SupabaseClient {
    /// All tasks of the signed-in user, newest first.
    pub async fn list_tasks(&self, session: &Session) -> Result<Vec<Task>, RemoteError> {
        let (col, owner) = owner_scope(session);
        let req = self.http.get(self.rest_url(TABLE)).query(&[
            ("select", "*".to_string()),
            (col, owner),
            ("order", "created_at.desc".to_string()),
        ]);
        let resp = ensure_success(self.authorize(req, Some(session)).send().await?).await?;
        let tasks: Vec<Task> = resp.json().await?;
        log::debug!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    /// One task by id; `Ok(None)` if it does not exist or belongs to someone else.
    pub async fn get_task(&self, id: Uuid, session: &Session) -> Result<Option<Task>, RemoteError> {
        let req = self
            .http
            .get(self.rest_url(TABLE))
            .query(&[("select", "*".to_string())])
            .query(&row_scope(id, session));
        let resp = ensure_success(self.authorize(req, Some(session)).send().await?).await?;
        let rows: Vec<Task> = resp.json().await?;
        Ok(rows.into_iter().next())
    }

    pub async fn create_task(&self, fields: &TaskFields, session: &Session) -> Result<Task, RemoteError> {
        let row = NewTaskRow {
            fields,
            user_id: session.owner_id(),
        };
        let req = self
            .http
            .post(self.rest_url(TABLE))
            .header("Prefer", "return=representation")
            .json(&[row]);
        let resp = ensure_success(self.authorize(req, Some(session)).send().await?).await?;
        let rows: Vec<Task> = resp.json().await?;
        let task = rows
            .into_iter()
            .next()
            .ok_or_else(|| RemoteError::Decode("insert returned no row".to_string()))?;
        log::info!("Created task {}", task.id);
        Ok(task)
    }

    /// Update one of the owner's tasks. Zero matched rows is `NotFound`.
    pub async fn update_task(
        &self,
        id: Uuid,
        fields: &TaskFields,
        session: &Session,
    ) -> Result<(), RemoteError> {
        let patch = TaskPatch {
            fields,
            updated_at: Utc::now(),
        };
        let req = self
            .http
            .patch(self.rest_url(TABLE))
            .query(&row_scope(id, session))
            .header("Prefer", "return=representation")
            .json(&patch);
        let resp = ensure_success(self.authorize(req, Some(session)).send().await?).await?;
        let rows: Vec<Task> = resp.json().await?;
        if rows.is_empty() {
            return Err(RemoteError::NotFound);
        }
        log::info!("Updated task {}", id);
        Ok(())
    }

    pub async fn delete_task(&self, id: Uuid, session: &Session) -> Result<(), RemoteError> {
        let req = self
            .http
            .delete(self.rest_url(TABLE))
            .query(&row_scope(id, session))
            .header("Prefer", "return=representation");
        let resp = ensure_success(self.authorize(req, Some(session)).send().await?).await?;
        let rows: Vec<Task> = resp.json().await?;
        if rows.is_empty() {
            return Err(RemoteError::NotFound);
        }
        log::info!("Deleted task {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::task::{Priority, TaskStatus};
    use crate::remote::sample_session;
    use chrono::NaiveDate;

    fn fields() -> TaskFields {
        TaskFields {
            title: "Buy milk".into(),
            description: "2 litres".into(),
            priority: Priority::High,
            status: TaskStatus::Pending,
            due_date: NaiveDate::from_ymd_opt(2026, 6, 1),
        }
    }

    #[test]
    fn every_scope_names_the_owner() {
        let session = sample_session();
        let owner = format!("eq.{}", session.owner_id());
        assert_eq!(owner_scope(&session), ("user_id", owner.clone()));

        let id = Uuid::new_v4();
        let scope = row_scope(id, &session);
        assert_eq!(scope[0], ("id", format!("eq.{}", id)));
        assert_eq!(scope[1], ("user_id", owner));
    }

    #[test]
    fn insert_row_carries_owner() {
        let session = sample_session();
        let fields = fields();
        let value = serde_json::to_value(NewTaskRow {
            fields: &fields,
            user_id: session.owner_id(),
        })
        .unwrap();
        assert_eq!(value["user_id"], session.owner_id().to_string());
        assert_eq!(value["title"], "Buy milk");
        assert_eq!(value["due_date"], "2026-06-01");
        assert_eq!(value["priority"], "high");
    }

    #[test]
    fn patch_never_moves_ownership() {
        let fields = fields();
        let value = serde_json::to_value(TaskPatch {
            fields: &fields,
            updated_at: Utc::now(),
        })
        .unwrap();
        assert!(value.get("user_id").is_none());
        assert!(value.get("id").is_none());
        assert!(value.get("updated_at").is_some());
        assert_eq!(value["status"], "pending");
    }
}
