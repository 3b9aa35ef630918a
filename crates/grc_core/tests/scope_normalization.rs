use chrono::{TimeZone, Utc};
use grc_core::model::object_type::ObjectType;
use grc_core::scope::{normalize_scope, scope_from_pairs, AttrValue, Scope, ScopeValue};
use grc_core::{create_list_objs, Entity};
use std::collections::BTreeMap;

fn single(obj_type: ObjectType, scope: Scope) -> Entity {
    let mut objs = create_list_objs(obj_type, &[scope]).unwrap();
    assert_eq!(objs.len(), 1);
    objs.remove(0)
}

#[test]
fn header_lookup_ignores_case() {
    let lower = normalize_scope(ObjectType::Program, &scope_from_pairs([("Name", "x")])).unwrap();
    let upper = normalize_scope(ObjectType::Program, &scope_from_pairs([("NAME", "x")])).unwrap();
    assert_eq!(lower, upper);

    let title = single(ObjectType::Program, scope_from_pairs([("tItLe", "Program A")]));
    assert_eq!(title.title.as_deref(), Some("Program A"));
}

#[test]
fn none_tokens_become_absent_for_every_field() {
    let scope = scope_from_pairs([
        ("Title", "None"),
        ("Description", "No person"),
        ("Admin", "No person"),
        ("Verified", "None"),
        ("Last Updated", "None"),
        ("Custom Field", "None"),
    ]);
    let normalized = normalize_scope(ObjectType::Control, &scope).unwrap();
    assert!(normalized.values().all(|value| *value == AttrValue::Absent));

    let control = single(ObjectType::Control, scope);
    assert_eq!(control.title, None);
    assert_eq!(control.description, None);
    assert!(control.people_in("admins").is_empty());
    assert_eq!(control.verified, None);
    assert_eq!(control.updated_at, None);
    assert_eq!(control.custom_attributes.get("CUSTOM FIELD"), Some(&None));
}

#[test]
fn comment_timestamp_is_converted_to_utc() {
    let mut row = BTreeMap::new();
    row.insert(
        "created_at".to_string(),
        "(Jane Doe) 08/20/2017 07:30:45 AM +03:00".to_string(),
    );
    row.insert("description".to_string(), "Looks (mostly) fine".to_string());
    let mut scope = Scope::new();
    scope.insert("Comments".to_string(), ScopeValue::Comments(vec![row]));

    let asmt = single(ObjectType::Assessment, scope);

    let comments = asmt.comments.unwrap();
    assert_eq!(
        comments[0].created_at,
        Some(Utc.with_ymd_and_hms(2017, 8, 20, 4, 30, 45).unwrap())
    );
    assert_eq!(
        comments[0].fields.get("description").map(String::as_str),
        Some("Looks (mostly) fine")
    );
}

#[test]
fn people_text_is_split_and_lists_pass_through() {
    let split = single(ObjectType::Control, scope_from_pairs([("Admin", "Ex1, Ex2 F")]));
    assert_eq!(split.people_in("admins"), &["Ex1".to_string(), "Ex2 F".to_string()]);

    let names = vec!["b@example.com".to_string(), "a@example.com".to_string()];
    let mut scope = Scope::new();
    scope.insert("Primary Contacts".to_string(), ScopeValue::List(names.clone()));
    let listed = single(ObjectType::Control, scope);
    assert_eq!(listed.people_in("primary_contacts"), names.as_slice());
}

#[test]
fn snapshot_marker_is_stripped_only_for_snapshot_capable_types() {
    let scope = scope_from_pairs([("Code", "*23eb72ac-4d9d")]);

    let control = single(ObjectType::Control, scope.clone());
    assert_eq!(control.slug.as_deref(), Some("23eb72ac-4d9d"));

    let program = single(ObjectType::Program, scope);
    assert_eq!(program.slug.as_deref(), Some("*23eb72ac-4d9d"));
}

#[test]
fn dates_are_parsed_into_utc() {
    let control = single(
        ObjectType::Control,
        scope_from_pairs([
            ("Created Date", "08/20/2017"),
            ("Last Updated", "08-20-2017 04:30:45"),
            ("Mandatory", "yes"),
        ]),
    );
    assert_eq!(
        control.created_at,
        Some(Utc.with_ymd_and_hms(2017, 8, 20, 0, 0, 0).unwrap())
    );
    assert_eq!(
        control.updated_at,
        Some(Utc.with_ymd_and_hms(2017, 8, 20, 4, 30, 45).unwrap())
    );
    assert_eq!(control.mandatory, Some(true));
}

#[test]
fn empty_text_on_typed_fields_is_absent() {
    let control = single(
        ObjectType::Control,
        scope_from_pairs([("Verified", ""), ("Created Date", ""), ("Notes", "")]),
    );
    assert_eq!(control.verified, None);
    assert_eq!(control.created_at, None);
    assert_eq!(control.notes.as_deref(), Some(""));
}

#[test]
fn unparsable_typed_value_is_an_error() {
    let err = create_list_objs(
        ObjectType::Program,
        &[scope_from_pairs([("Created Date", "yesterday")])],
    )
    .unwrap_err();
    assert!(err.to_string().contains("created_at"));
}

#[test]
fn entity_round_trips_through_its_display_scope() {
    let mut row = BTreeMap::new();
    row.insert(
        "created_at".to_string(),
        "(Jane Doe) 08/20/2017 07:30:45 AM +03:00".to_string(),
    );
    row.insert("description".to_string(), "first".to_string());
    let mut scope = scope_from_pairs([
        ("Title", "Control A"),
        ("Code", "*CONTROL-1"),
        ("State", "Draft"),
        ("Admin", "Ex1, Ex2 F"),
        ("Last Updated", "08/20/2017 07:30:45 AM +03:00"),
        ("Verified", "No"),
        ("Review Status", "Unreviewed"),
        ("Risk Rating", "High"),
        ("Owner Notes", "None"),
    ]);
    scope.insert("Comments".to_string(), ScopeValue::Comments(vec![row]));

    let original = single(ObjectType::Control, scope);
    let reread = single(ObjectType::Control, original.to_scope());

    assert_eq!(reread, original);
    assert_eq!(original.slug.as_deref(), Some("CONTROL-1"));
    assert_eq!(original.verified, Some(false));
    assert_eq!(
        original.custom_attributes.get("RISK RATING"),
        Some(&Some("High".to_string()))
    );
}

#[test]
fn scope_reads_from_json() {
    let scope: Scope = serde_json::from_value(serde_json::json!({
        "Title": "Issue A",
        "Assignees": ["a@example.com", "b@example.com"],
        "Description": null,
    }))
    .unwrap();

    let issue = single(ObjectType::Issue, scope);

    assert_eq!(issue.title.as_deref(), Some("Issue A"));
    assert_eq!(issue.people_in("assignees").len(), 2);
    assert_eq!(issue.description, None);
}

#[test]
fn entity_serializes_type_field() {
    let control = Entity::with_title(ObjectType::Control, "Control A");
    let value = serde_json::to_value(&control).unwrap();
    assert_eq!(value["type"], "Control");
    assert_eq!(value["title"], "Control A");
}
