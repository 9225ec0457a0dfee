//! Common test utilities for integration tests
//!
//! Provides shared fixtures, a migrated in-memory database pool, and a
//! programmable completion client stub used across test files.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use zerovector::adapters::sqlite::create_migrated_test_pool;
use zerovector::domain::models::{Persona, PersonaRole, PersonaState, Task};
use zerovector::domain::ports::{CompletionClient, CompletionError, CompletionRequest};

/// Create an in-memory database with the full schema applied.
pub async fn test_pool() -> SqlitePool {
    create_migrated_test_pool()
        .await
        .expect("failed to create test pool")
}

pub fn test_user() -> Uuid {
    Uuid::new_v4()
}

/// An active conductor persona.
pub fn conductor(user_id: Uuid) -> Persona {
    Persona::new(
        user_id,
        "Conductor Prime",
        PersonaRole::Conductor,
        Persona::default_system_prompt(PersonaRole::Conductor),
    )
    .with_state(PersonaState::Active)
}

/// A sleeping department head with a specialization.
pub fn department_head(user_id: Uuid, name: &str, specialization: &str) -> Persona {
    Persona::new(
        user_id,
        name,
        PersonaRole::DepartmentHead,
        Persona::default_system_prompt(PersonaRole::DepartmentHead),
    )
    .with_specialization(specialization)
    .with_department(specialization.split_whitespace().next().unwrap_or("General"))
}

/// A sleeping sub-agent with a specialization.
pub fn sub_agent(user_id: Uuid, name: &str, specialization: &str) -> Persona {
    Persona::new(
        user_id,
        name,
        PersonaRole::SubAgent,
        Persona::default_system_prompt(PersonaRole::SubAgent),
    )
    .with_specialization(specialization)
}

pub fn pending_task(user_id: Uuid, title: &str, description: &str) -> Task {
    Task::new(user_id, title, description)
}

/// A completion the outcome classifier scores as Success.
pub fn success_text() -> String {
    "The task has been completed in full: I analyzed the requirements, implemented the \
     solution end to end, and delivered a verified, actionable result ready for use."
        .to_string()
}

/// A completion the outcome classifier scores as Failure.
pub fn failure_text() -> String {
    "Unfortunately I was unable to proceed: access denied on the upstream system and the \
     request stayed blocked for the whole window."
        .to_string()
}

/// Programmable completion client: returns queued results in order, then
/// falls back to a fixed response. Records every request it receives.
pub struct StubCompletionClient {
    queued: Mutex<VecDeque<Result<String, CompletionError>>>,
    fallback: String,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubCompletionClient {
    /// Always respond with the given text.
    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback: text.into(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Respond with each queued result in order, then with the fallback.
    pub fn with_sequence(results: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            queued: Mutex::new(results.into()),
            fallback: success_text(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with a provider rejection.
    pub fn failing() -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback: String::new(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for StubCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        if let Some(result) = self.queued.lock().unwrap().pop_front() {
            return result;
        }
        if self.fallback.is_empty() {
            return Err(CompletionError::Provider {
                status: 500,
                body: "stubbed provider failure".to_string(),
            });
        }
        Ok(self.fallback.clone())
    }
}
