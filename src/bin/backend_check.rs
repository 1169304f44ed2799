//! Backend diagnostic: restore the stored session, list the owner's tasks and
//! print the dashboard numbers.

use taskflow::config::TaskFlowConfig;
use taskflow::core::stats::{compute_stats, recent_tasks};
use taskflow::remote::SupabaseClient;

#[tokio::main]
async fn main() {
    match systemd_journal_logger::JournalLog::new() {
        Ok(journal) => {
            let _ = journal
                .with_syslog_identifier("taskflow-check".to_string())
                .install();
        }
        Err(e) => eprintln!("Journal logging unavailable: {}", e),
    }
    log::set_max_level(log::LevelFilter::Info);

    println!("=== TaskFlow backend check ===\n");

    let Some((config, _)) = TaskFlowConfig::load() else {
        println!("Could not open config.");
        return;
    };
    let config = config.with_env_overrides();

    let client = match SupabaseClient::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            println!("Client error: {}", e);
            return;
        }
    };
    println!("Backend: {}", client.base_url());

    let session = match client.get_session().await {
        Ok(Some(session)) => session,
        Ok(None) => {
            println!("No stored session. Sign in with the app first.");
            return;
        }
        Err(e) => {
            println!("Session error: {}", e);
            return;
        }
    };
    println!("Signed in as {} ({})\n", session.email(), session.owner_id());

    let tasks = match client.list_tasks(&session).await {
        Ok(tasks) => tasks,
        Err(e) => {
            println!("Failed to list tasks: {}", e);
            return;
        }
    };

    let today = chrono::Local::now().date_naive();
    let stats = compute_stats(&tasks, today);
    println!("--- Stats as of {} ---", today);
    println!("  Total:       {}", stats.total);
    println!("  Pending:     {}", stats.pending);
    println!("  In progress: {}", stats.in_progress);
    println!("  Completed:   {}", stats.completed);
    println!("  Overdue:     {}", stats.overdue);

    println!("\n--- Recent ---");
    for task in recent_tasks(&tasks) {
        let due = task
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  [{:<11}] {:<6} {:<10} {}",
            task.status.label(),
            task.priority.label(),
            due,
            task.title
        );
    }
}
