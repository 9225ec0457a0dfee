//! Property tests for the outcome classifier and persona selector.

use proptest::prelude::*;
use uuid::Uuid;

use zerovector::domain::models::{Persona, PersonaRole, Task};
use zerovector::services::{classify, select_persona, TaskOutcome};

proptest! {
    /// The classifier is total and deterministic: any input produces a
    /// verdict, and the same input always produces the same verdict.
    #[test]
    fn prop_classifier_total_and_deterministic(text in ".{0,400}") {
        let first = classify(&text);
        let second = classify(&text);
        prop_assert_eq!(first, second);
    }

    /// Anything under the 50-character floor is a failure regardless of
    /// content.
    #[test]
    fn prop_short_text_always_fails(text in "[ -~]{0,49}") {
        prop_assert!(text.trim().len() < 50);
        prop_assert_eq!(classify(&text), TaskOutcome::Failure);
    }

    /// Surrounding whitespace never changes a verdict.
    #[test]
    fn prop_whitespace_padding_is_ignored(text in ".{0,200}", pad in "[ \t\n]{0,20}") {
        let padded = format!("{pad}{text}{pad}");
        prop_assert_eq!(classify(&text), classify(&padded));
    }
}

proptest! {
    /// The selector is deterministic over arbitrary task text, and always
    /// selects someone when candidates exist.
    #[test]
    fn prop_selector_deterministic_and_total(title in "[a-zA-Z ]{1,60}", description in "[a-zA-Z ]{0,300}") {
        let user_id = Uuid::nil();
        let candidates = vec![
            Persona::new(user_id, "Prime", PersonaRole::Conductor, "p"),
            Persona::new(user_id, "Head", PersonaRole::DepartmentHead, "p")
                .with_specialization("market analysis"),
            Persona::new(user_id, "Agent", PersonaRole::SubAgent, "p")
                .with_specialization("report generation"),
        ];
        let task = Task::new(user_id, title, description);

        let first = select_persona(&candidates, &task).expect("candidates exist");
        let second = select_persona(&candidates, &task).expect("candidates exist");
        prop_assert_eq!(first.id, second.id);
    }
}
