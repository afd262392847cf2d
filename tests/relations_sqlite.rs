//! Relation-driven joins: descriptors with declared foreign keys resolved
//! through `join_to` and `join_through`.

mod common;

use vela_orm::{ModelDescriptor, OrmError};

fn users_model() -> ModelDescriptor {
    ModelDescriptor::new("users")
}

fn professions_model() -> ModelDescriptor {
    ModelDescriptor::new("user_professions").relation("users", "user_id")
}

fn user_events_model() -> ModelDescriptor {
    ModelDescriptor::new("user_events")
        .relation("users", "user_id")
        .relation("events", "event_id")
}

fn events_model() -> ModelDescriptor {
    ModelDescriptor::new("events").relation("user_events", "event_id")
}

#[test]
fn join_to_resolves_a_declared_relation() {
    let db = common::fixture();

    let mut users = db.model(&users_model());
    users.join_to(&professions_model(), true).unwrap();
    let joined = users.get().unwrap();

    assert_eq!(joined.len(), 2);
    assert_eq!(joined[0].get_str("firstname"), Some("John"));
    assert_eq!(joined[0].get_str("title"), Some("Writer"));
    assert_eq!(joined[1].get_str("firstname"), Some("Jane"));
    assert_eq!(joined[1].get_str("title"), Some("Singer"));
}

#[test]
fn join_to_rejects_an_undeclared_relation() {
    let db = common::fixture();

    let mut users = db.model(&users_model());
    let err = users.join_to(&events_model(), true).unwrap_err();
    assert_eq!(
        err,
        OrmError::RelationNotFound {
            from: "users".to_string(),
            to: "events".to_string(),
        }
    );
}

#[test]
fn join_through_bridges_over_an_earlier_join() {
    let db = common::fixture();

    let mut users = db.model(&users_model());
    users.join_to(&user_events_model(), true).unwrap();
    users.join_through(&events_model()).unwrap();

    let joined = users.get().unwrap();
    assert_eq!(joined.len(), 6);
    assert_eq!(joined[0].get_str("firstname"), Some("John"));
    assert_eq!(joined[0].get_str("title"), Some("Dance"));
}

#[test]
fn join_through_without_a_bridge_is_an_error() {
    let db = common::fixture();

    let mut users = db.model(&users_model());
    let err = users.join_through(&events_model()).unwrap_err();
    assert_eq!(
        err,
        OrmError::RelationNotFound {
            from: "users".to_string(),
            to: "events".to_string(),
        }
    );
}

#[test]
fn hidden_joins_drop_out_of_the_default_projection() {
    let db = common::fixture();

    let mut users = db.model(&users_model());
    users.join_to(&professions_model(), false).unwrap();
    let joined = users.get().unwrap();

    assert_eq!(joined.len(), 2);
    assert_eq!(joined[0].get_str("firstname"), Some("John"));
    assert!(!joined[0].as_map().contains_key("title"));
}

#[test]
fn aliased_projection_across_three_tables() {
    let db = common::fixture();

    let mut users = db.model(&users_model());
    users
        .select_as("users.id", "usr_id")
        .select(["firstname"])
        .select_as("user_professions.title", "profession_title")
        .select_as("events.title", "event_title");
    users.join_to(&professions_model(), false).unwrap();
    users.join_to(&user_events_model(), true).unwrap();
    users.join_through(&events_model()).unwrap();

    let row = users.first().unwrap().unwrap();
    assert_eq!(row.get_i64("usr_id"), Some(1));
    assert_eq!(row.get_str("firstname"), Some("John"));
    assert_eq!(row.get_str("profession_title"), Some("Writer"));
    assert_eq!(row.get_str("event_title"), Some("Dance"));
}

#[test]
fn relation_joins_match_their_manual_spelling() {
    let db = common::fixture();

    let mut resolved = db.model(&users_model());
    resolved.join_to(&user_events_model(), true).unwrap();
    resolved.join_through(&events_model()).unwrap();
    let resolved_rows = resolved.get().unwrap();

    let mut manual = db.table("users");
    manual
        .inner_join("user_events", ("user_events.user_id", "=", "users.id"))
        .unwrap()
        .inner_join("events", ("user_events.event_id", "=", "events.id"))
        .unwrap();
    let manual_rows = manual.get().unwrap();

    assert_eq!(resolved_rows.len(), manual_rows.len());
    for (left, right) in resolved_rows.iter().zip(manual_rows.iter()) {
        assert_eq!(left.as_map(), right.as_map());
    }
}

#[test]
fn relation_joins_compose_with_criteria_and_ordering() {
    let db = common::fixture();

    let mut users = db.model(&users_model());
    users.join_to(&user_events_model(), false).unwrap();
    users.join_through(&events_model()).unwrap();
    users.criteria("events.title", "=", "Music").unwrap();
    users.order_by("users.firstname", vela_orm::OrderDirection::Asc);

    let rows = users.get().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].get_str("firstname"), Some("Jane"));
    assert_eq!(rows[2].get_str("firstname"), Some("John"));
}
