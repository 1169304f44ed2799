pub mod filter;
pub mod stats;
pub mod task;
pub mod validate;

#[cfg(test)]
pub(crate) fn sample_task(title: &str, status: task::TaskStatus) -> task::Task {
    let now = chrono::Utc::now();
    task::Task {
        id: uuid::Uuid::new_v4(),
        owner_id: uuid::Uuid::nil(),
        title: title.to_string(),
        description: None,
        priority: task::Priority::Medium,
        status,
        due_date: None,
        created_at: now,
        updated_at: now,
    }
}
