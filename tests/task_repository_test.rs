//! Integration tests for the SQLite task repository.

mod common;

use chrono::{Duration, Utc};
use common::{pending_task, sub_agent, test_pool, test_user};
use sqlx::SqlitePool;
use zerovector::adapters::sqlite::{SqlitePersonaRepository, SqliteTaskRepository};
use zerovector::domain::models::{Persona, TaskStatus};
use zerovector::domain::ports::{PersonaRepository, TaskFilter, TaskRepository};

async fn seeded_persona(pool: &SqlitePool) -> Persona {
    let repo = SqlitePersonaRepository::new(pool.clone());
    let persona = sub_agent(test_user(), "Assignee", "general work");
    repo.insert(&persona).await.unwrap();
    persona
}

#[tokio::test]
async fn test_task_round_trip() {
    let pool = test_pool().await;
    let repo = SqliteTaskRepository::new(pool.clone());
    let persona = seeded_persona(&pool).await;

    let task = pending_task(test_user(), "Round trip", "store and load")
        .with_assignment(persona.id)
        .with_deadline(Utc::now() + Duration::days(1));
    repo.insert(&task).await.unwrap();

    let loaded = repo.get(task.id).await.unwrap().unwrap();
    assert_eq!(loaded, task);
}

#[tokio::test]
async fn test_update_writes_terminal_fields_together() {
    let pool = test_pool().await;
    let repo = SqliteTaskRepository::new(pool.clone());
    let persona = seeded_persona(&pool).await;

    let mut task = pending_task(test_user(), "Finishable", "work to finish");
    repo.insert(&task).await.unwrap();

    task.start(persona.id).unwrap();
    task.complete("the work has been finished and delivered").unwrap();
    repo.update(&task).await.unwrap();

    let loaded = repo.get(task.id).await.unwrap().unwrap();
    assert_eq!(loaded.status, TaskStatus::Completed);
    assert_eq!(loaded.assigned_to, Some(persona.id));
    assert!(loaded.result.is_some());
    assert!(loaded.completed_at.is_some());
}

#[tokio::test]
async fn test_update_missing_task_is_not_found() {
    let repo = SqliteTaskRepository::new(test_pool().await);
    let task = pending_task(test_user(), "Ghost", "never stored");
    assert!(repo.update(&task).await.is_err());
}

#[tokio::test]
async fn test_due_filter_returns_oldest_first_with_limit() {
    let pool = test_pool().await;
    let repo = SqliteTaskRepository::new(pool.clone());
    let persona = seeded_persona(&pool).await;
    let user_id = test_user();

    let base = Utc::now();
    let mut ids = Vec::new();
    for i in 0..4 {
        let mut task = pending_task(user_id, &format!("task {i}"), "queued work");
        task.created_at = base + Duration::milliseconds(i);
        repo.insert(&task).await.unwrap();
        ids.push(task.id);
    }

    // One stuck in_progress task is also due
    let mut stuck = pending_task(user_id, "stuck", "interrupted work");
    stuck.created_at = base - Duration::seconds(5);
    stuck.start(persona.id).unwrap();
    repo.insert(&stuck).await.unwrap();

    // Terminal tasks are not due
    let mut finished = pending_task(user_id, "finished", "already handled");
    finished.start(persona.id).unwrap();
    finished.complete("all delivered and completed earlier").unwrap();
    repo.insert(&finished).await.unwrap();

    let due = repo.list(TaskFilter::due(3)).await.unwrap();
    assert_eq!(due.len(), 3);
    assert_eq!(due[0].id, stuck.id, "oldest first");
    assert_eq!(due[1].id, ids[0]);
    assert_eq!(due[2].id, ids[1]);
}

#[tokio::test]
async fn test_count_by_status() {
    let pool = test_pool().await;
    let repo = SqliteTaskRepository::new(pool.clone());
    let persona = seeded_persona(&pool).await;
    let user_id = test_user();

    for i in 0..3 {
        repo.insert(&pending_task(user_id, &format!("p{i}"), "pending work"))
            .await
            .unwrap();
    }
    let mut failed = pending_task(user_id, "f", "failing work");
    failed.start(persona.id).unwrap();
    failed.fail(None).unwrap();
    repo.insert(&failed).await.unwrap();

    assert_eq!(repo.count(TaskFilter::pending()).await.unwrap(), 3);
    assert_eq!(
        repo.count(TaskFilter {
            statuses: vec![TaskStatus::Failed],
            ..TaskFilter::default()
        })
        .await
        .unwrap(),
        1
    );
    assert_eq!(repo.count(TaskFilter::default()).await.unwrap(), 4);
}
