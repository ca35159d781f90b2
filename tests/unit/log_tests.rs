//! Unit tests for the append-only conversation log.

use docfill::models::{Message, Role};
use docfill::session::ConversationLog;

#[test]
fn append_returns_sequential_indices() {
    let mut log = ConversationLog::default();
    assert_eq!(log.append(Message::user("hello")), 0);
    assert_eq!(log.append(Message::assistant("hi")), 1);
    assert_eq!(log.len(), 2);
}

#[test]
fn messages_keep_arrival_order() {
    let mut log = ConversationLog::default();
    log.append(Message::user("first"));
    log.append(Message::assistant("second"));
    log.append(Message::user("third"));

    let roles: Vec<Role> = log.messages().iter().map(|m| m.role).collect();
    assert_eq!(roles, [Role::User, Role::Assistant, Role::User]);
    assert_eq!(log.messages()[2].content, "third");
}

#[test]
fn empty_log_reports_empty() {
    let log = ConversationLog::default();
    assert!(log.is_empty());
    assert_eq!(log.len(), 0);
}
