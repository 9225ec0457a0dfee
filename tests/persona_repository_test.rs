//! Integration tests for the SQLite persona repository.

mod common;

use common::{conductor, department_head, sub_agent, test_pool, test_user};
use zerovector::adapters::sqlite::SqlitePersonaRepository;
use zerovector::domain::models::{PersonaRole, PersonaState};
use zerovector::domain::ports::{PersonaFilter, PersonaRepository};

#[tokio::test]
async fn test_persona_round_trip() {
    let repo = SqlitePersonaRepository::new(test_pool().await);
    let user_id = test_user();

    let parent = conductor(user_id);
    repo.insert(&parent).await.unwrap();

    let persona =
        department_head(user_id, "Archivist", "records management").with_parent(parent.id);
    repo.insert(&persona).await.unwrap();

    let loaded = repo.get(persona.id).await.unwrap().unwrap();
    assert_eq!(loaded, persona);
}

#[tokio::test]
async fn test_update_persists_lifecycle_fields() {
    let repo = SqlitePersonaRepository::new(test_pool().await);
    let mut persona = sub_agent(test_user(), "Worker", "general work");
    repo.insert(&persona).await.unwrap();

    persona.wake().unwrap();
    persona.record_completion().unwrap();
    repo.update(&persona).await.unwrap();

    let loaded = repo.get(persona.id).await.unwrap().unwrap();
    assert_eq!(loaded.state, PersonaState::Sleeping);
    assert_eq!(loaded.experience_count, 1);
    assert!((loaded.consciousness_level - 2.0).abs() < f64::EPSILON);
    assert!(loaded.last_active_at.is_some());
}

#[tokio::test]
async fn test_update_missing_persona_is_not_found() {
    let repo = SqlitePersonaRepository::new(test_pool().await);
    let persona = sub_agent(test_user(), "Ghost", "nothing");
    assert!(repo.update(&persona).await.is_err());
}

#[tokio::test]
async fn test_selectable_filter_excludes_dreaming_and_archived() {
    let repo = SqlitePersonaRepository::new(test_pool().await);
    let user_id = test_user();

    let awake = conductor(user_id);
    repo.insert(&awake).await.unwrap();

    let asleep = sub_agent(user_id, "Asleep", "a");
    repo.insert(&asleep).await.unwrap();

    let mut dreaming = sub_agent(user_id, "Dreaming", "b");
    dreaming.state = PersonaState::Dreaming;
    repo.insert(&dreaming).await.unwrap();

    let mut archived = sub_agent(user_id, "Archived", "c");
    archived.state = PersonaState::Archived;
    repo.insert(&archived).await.unwrap();

    let selectable = repo.list(PersonaFilter::selectable_for(user_id)).await.unwrap();
    let names: Vec<&str> = selectable.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Conductor Prime"));
    assert!(names.contains(&"Asleep"));
}

#[tokio::test]
async fn test_filter_scopes_by_user_and_role() {
    let repo = SqlitePersonaRepository::new(test_pool().await);
    let user_a = test_user();
    let user_b = test_user();

    repo.insert(&conductor(user_a)).await.unwrap();
    repo.insert(&sub_agent(user_a, "A-agent", "x")).await.unwrap();
    repo.insert(&sub_agent(user_b, "B-agent", "y")).await.unwrap();

    let for_a = repo
        .list(PersonaFilter {
            user_id: Some(user_a),
            ..PersonaFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(for_a.len(), 2);

    let conductors = repo
        .list(PersonaFilter {
            user_id: Some(user_a),
            role: Some(PersonaRole::Conductor),
            ..PersonaFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(conductors.len(), 1);
    assert_eq!(conductors[0].name, "Conductor Prime");
}
