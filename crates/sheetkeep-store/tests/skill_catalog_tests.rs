// Integration tests for the skill catalog and repository logging

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use sheetkeep_core::logging_facility::test_capture::init_test_capture;
use sheetkeep_core::model::{Ability, ProficiencyLevel};
use sheetkeep_core::ExErrorKind;
use sheetkeep_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use sheetkeep_core_types::RequestContext;

#[test]
fn test_definitions_are_ordered_by_key() {
    // Given: A migrated store
    let (_, catalog) = common::repo_and_catalog();

    // When: The catalog is listed
    let definitions = catalog.list_definitions(&RequestContext::new()).unwrap();

    // Then: All eighteen skills come back in key order
    assert_eq!(definitions.len(), 18);
    let keys: Vec<i64> = definitions.iter().map(|d| d.id).collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);

    let athletics = definitions.iter().find(|d| d.name == "Athletics").unwrap();
    assert_eq!(athletics.ability, Ability::Strength);
}

#[test]
fn test_seeding_matches_catalog() {
    // Given: The catalog of definitions
    let (repo, catalog) = common::repo_and_catalog();
    let ctx = RequestContext::new();
    let definitions = catalog.list_definitions(&ctx).unwrap();

    // When: A character is created empty
    let id = repo.create_empty(&ctx, "Fresh").unwrap();
    let sheet = repo.get_by_id(&ctx, &id).unwrap();

    // Then: One untrained row exists per definition, in catalog order
    assert_eq!(sheet.skills.len(), definitions.len());
    for (skill, definition) in sheet.skills.iter().zip(&definitions) {
        assert_eq!(skill.skill_id, definition.id);
        assert_eq!(skill.name, definition.name);
        assert_eq!(skill.ability, definition.ability);
        assert_eq!(skill.proficiency, ProficiencyLevel::None);
        assert_eq!(skill.custom_modifier, 0);
        assert_eq!(skill.character_id, id);
    }
}

#[test]
fn test_cancelled_listing() {
    let (_, catalog) = common::repo_and_catalog();
    let ctx = RequestContext::new();
    ctx.cancel();

    let err = catalog.list_definitions(&ctx).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Cancelled);
}

#[test]
fn test_repository_logs_lifecycle_with_request_id() {
    // Given: Captured logging and a known request
    let capture = init_test_capture();
    let repo = common::repo();
    let ctx = RequestContext::new();
    let request_id = ctx.request_id.as_str().to_string();
    let for_request = |op: &str, event: &str| {
        capture.count_events(|e| {
            e.op.as_deref() == Some(op)
                && e.event.as_deref() == Some(event)
                && e.fields.get("request_id") == Some(&request_id)
        })
    };

    // When: One call succeeds and one fails
    repo.create_empty(&ctx, "Logged").unwrap();
    repo.get_by_id(&ctx, "missing").unwrap_err();

    // Then: Each emits start plus end or end_error
    assert_eq!(for_request("create_empty", EVENT_START), 1);
    assert_eq!(for_request("create_empty", EVENT_END), 1);
    assert_eq!(for_request("get_by_id", EVENT_START), 1);
    assert_eq!(for_request("get_by_id", EVENT_END_ERROR), 1);
}

#[test]
fn test_catalog_error_event_carries_request_id() {
    // Given: Captured logging and a cancelled request
    let capture = init_test_capture();
    let (_, catalog) = common::repo_and_catalog();
    let ctx = RequestContext::new();
    let request_id = ctx.request_id.as_str().to_string();
    ctx.cancel();

    // When: The catalog is listed
    catalog.list_definitions(&ctx).unwrap_err();

    // Then: The failure event can be tied back to the request
    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some("list_definitions")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.fields.get("request_id") == Some(&request_id)
    });
    assert_eq!(errors, 1);
}
