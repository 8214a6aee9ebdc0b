use super::*;

// =============================================================
// PushMessage
// =============================================================

#[test]
fn parse_task_moved_with_numeric_ids() {
    let msg = PushMessage::parse(r#"{"type":"task_moved","task_id":5,"new_column_id":2}"#).expect("parse");
    assert_eq!(
        msg,
        PushMessage::TaskMoved { task_id: WireId("5".to_owned()), new_column_id: WireId("2".to_owned()) }
    );
}

#[test]
fn parse_task_moved_with_string_ids() {
    let msg = PushMessage::parse(r#"{"type":"task_moved","task_id":"5","new_column_id":"2"}"#).expect("parse");
    let PushMessage::TaskMoved { task_id, new_column_id } = msg else {
        panic!("expected task_moved");
    };
    assert_eq!(task_id.as_str(), "5");
    assert_eq!(new_column_id.as_str(), "2");
}

#[test]
fn parse_task_added_keeps_html() {
    let msg = PushMessage::parse(
        r#"{"type":"task_added","column_id":4,"task_html":"<div id='task-9' class='task'></div>"}"#,
    )
    .expect("parse");
    let PushMessage::TaskAdded { column_id, task_html } = msg else {
        panic!("expected task_added");
    };
    assert_eq!(column_id.as_str(), "4");
    assert_eq!(task_html, "<div id='task-9' class='task'></div>");
}

#[test]
fn parse_unknown_type_is_unknown_variant() {
    let msg = PushMessage::parse(r#"{"type":"task_deleted","task_id":3}"#).expect("parse");
    assert_eq!(msg, PushMessage::Unknown);
}

#[test]
fn parse_rejects_missing_type() {
    assert!(PushMessage::parse(r#"{"task_id":3}"#).is_err());
}

#[test]
fn parse_rejects_known_type_missing_fields() {
    assert!(PushMessage::parse(r#"{"type":"task_moved","task_id":3}"#).is_err());
}

#[test]
fn parse_rejects_malformed_json() {
    assert!(PushMessage::parse("not json").is_err());
}

// =============================================================
// MoveRequest
// =============================================================

fn sample_request() -> MoveRequest {
    MoveRequest { task_id: "7".to_owned(), body: MoveBody { column_id: "3".to_owned(), order: 2 } }
}

#[test]
fn url_appends_task_key_to_endpoint() {
    assert_eq!(sample_request().url("/tasks"), "/tasks/7");
}

#[test]
fn url_ignores_trailing_slash_on_endpoint() {
    assert_eq!(sample_request().url("/api/tasks/"), "/api/tasks/7");
}

#[test]
fn body_json_sends_column_id_as_string() {
    assert_eq!(sample_request().body_json().expect("encode"), r#"{"column_id":"3","order":2}"#);
}
