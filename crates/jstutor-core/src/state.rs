//! UI-agnostic chat state types
//!
//! This module contains data structures that are shared between different
//! frontends and don't depend on any specific UI framework.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry in the tutor conversation
///
/// Messages are immutable once created; the constructors below are the
/// only way to build one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub kind: MessageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Who (or what) a message came from, which determines how it is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Assistant,
    Error,
    Suggestion,
}

impl Message {
    fn new(kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            kind,
            code: None,
            explanation: None,
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageKind::User, content)
    }

    /// An assistant reply. `code` and `explanation` are only present on
    /// successful generations.
    pub fn assistant(content: impl Into<String>, code: Option<String>, explanation: Option<String>) -> Self {
        Self {
            code,
            explanation,
            ..Self::new(MessageKind::Assistant, content)
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(MessageKind::Error, content)
    }

    pub fn suggestion(content: impl Into<String>) -> Self {
        Self::new(MessageKind::Suggestion, content)
    }
}

/// A predefined (label, prompt) pair offered as a one-keystroke shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub prompt: &'static str,
}

/// Canned prompts shown in the quick-action bar
pub const QUICK_ACTIONS: [QuickAction; 6] = [
    QuickAction { label: "Add numbers", prompt: "Write a function to add two numbers" },
    QuickAction { label: "Check palindrome", prompt: "Create a function to check if a string is palindrome" },
    QuickAction { label: "Sort array", prompt: "Function to sort an array in ascending order" },
    QuickAction { label: "Find max", prompt: "Function to find maximum number in an array" },
    QuickAction { label: "Remove duplicates", prompt: "Function to remove duplicates from an array" },
    QuickAction { label: "Count vowels", prompt: "Function to count vowels in a string" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_has_no_code() {
        let msg = Message::user("add two numbers");
        assert_eq!(msg.kind, MessageKind::User);
        assert_eq!(msg.content, "add two numbers");
        assert!(msg.code.is_none());
        assert!(msg.explanation.is_none());
    }

    #[test]
    fn test_assistant_message_carries_code_and_explanation() {
        let msg = Message::assistant(
            "Here's what I've created:",
            Some("function add(a,b){return a+b}".to_string()),
            Some("adds two numbers".to_string()),
        );
        assert_eq!(msg.kind, MessageKind::Assistant);
        assert_eq!(msg.code.as_deref(), Some("function add(a,b){return a+b}"));
        assert_eq!(msg.explanation.as_deref(), Some("adds two numbers"));
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::user("one");
        let b = Message::user("one");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&MessageKind::Suggestion).unwrap();
        assert_eq!(json, "\"suggestion\"");
    }

    #[test]
    fn test_quick_action_labels_are_distinct() {
        for (i, a) in QUICK_ACTIONS.iter().enumerate() {
            assert!(!a.prompt.trim().is_empty());
            for b in &QUICK_ACTIONS[i + 1..] {
                assert_ne!(a.label, b.label);
            }
        }
    }
}
