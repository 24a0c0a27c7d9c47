use anyhow::Result;
use tokio::task::JoinHandle;

use crate::ai::{GenerateClient, GenerationReply};
use crate::state::Message;

const GREETING: &str =
    "👋 Hi! I'm your JavaScript coding tutor. I can help you write JavaScript/TypeScript functions.";
const HINT: &str = "Try one of the quick actions below or ask me about any JavaScript function!";

/// Shown above the generated code on every successful reply.
pub const ASSISTANT_CONFIRMATION: &str = "Here's what I've created:";

/// Shown when the request itself failed (network, bad gateway, panic).
pub const GENERIC_ERROR: &str = "Sorry, I encountered an error. Please try again.";

/// An append-only message log plus the single in-flight flag.
///
/// Invariant: at most one generation request is pending at a time; the
/// log is never edited or truncated after an append.
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<Message>,
    pending: bool,
}

impl Conversation {
    /// Starts a session with the greeting and the usage hint.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(GREETING, None, None), Message::suggestion(HINT)],
            pending: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the conversation and orchestrates one generation round trip per
/// submission.
///
/// `submit` appends the user message synchronously and spawns the network
/// call as a background task; the event loop drives [`ChatController::poll`]
/// until the task resolves into exactly one reply message.
pub struct ChatController {
    conversation: Conversation,
    client: GenerateClient,
    task: Option<JoinHandle<Result<GenerationReply>>>,
}

impl ChatController {
    pub fn new(client: GenerateClient) -> Self {
        Self {
            conversation: Conversation::new(),
            client,
            task: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn is_pending(&self) -> bool {
        self.conversation.is_pending()
    }

    /// Submits a prompt. A blank prompt is ignored; so is any submission
    /// made while a request is already in flight (dropped, not queued).
    pub fn submit(&mut self, prompt: &str) {
        if self.conversation.pending {
            return;
        }
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return;
        }

        self.conversation.push(Message::user(prompt));
        self.conversation.pending = true;

        let client = self.client.clone();
        let prompt = prompt.to_string();
        self.task = Some(tokio::spawn(async move { client.generate(&prompt).await }));
    }

    /// One-keystroke shortcut: behaves exactly like typing the canned
    /// prompt and submitting it.
    pub fn quick_action(&mut self, prompt: &str) {
        self.submit(prompt);
    }

    /// Checks the in-flight request and, once it has resolved, appends the
    /// reply message and clears the pending flag. Returns true when a
    /// message was appended so the frontend can pin its scroll.
    pub async fn poll(&mut self) -> bool {
        let Some(task) = self.task.take_if(|task| task.is_finished()) else {
            return false;
        };

        let message = match task.await {
            Ok(Ok(GenerationReply::Generated { code, explanation })) => {
                Message::assistant(ASSISTANT_CONFIRMATION, Some(code), Some(explanation))
            }
            Ok(Ok(GenerationReply::Refused(reason))) => Message::error(reason),
            Ok(Err(err)) => {
                log::warn!("generation request failed: {err:#}");
                Message::error(GENERIC_ERROR)
            }
            Err(err) => {
                log::warn!("generation task aborted: {err}");
                Message::error(GENERIC_ERROR)
            }
        };

        self.conversation.push(message);
        self.conversation.pending = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MessageKind;
    use crate::testutil::spawn_stub_server;
    use std::time::Duration;

    async fn poll_until_resolved(controller: &mut ChatController) {
        for _ in 0..200 {
            if controller.poll().await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("generation never resolved");
    }

    fn unreachable_client() -> GenerateClient {
        // Nothing listens on port 1, so every request fails fast.
        GenerateClient::new("http://127.0.0.1:1")
    }

    #[test]
    fn test_conversation_seeds_greeting_then_hint() {
        let conversation = Conversation::new();
        let kinds: Vec<MessageKind> = conversation.messages().iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec![MessageKind::Assistant, MessageKind::Suggestion]);
        assert!(!conversation.is_pending());
    }

    #[tokio::test]
    async fn test_submit_appends_user_message_synchronously() {
        let mut controller = ChatController::new(unreachable_client());
        controller.submit("  Write a function to add two numbers  ");

        let last = controller.messages().last().unwrap();
        assert_eq!(last.kind, MessageKind::User);
        assert_eq!(last.content, "Write a function to add two numbers");
        assert!(controller.is_pending());
    }

    #[tokio::test]
    async fn test_blank_prompt_is_ignored() {
        let mut controller = ChatController::new(unreachable_client());
        controller.submit("   \n\t ");
        assert_eq!(controller.messages().len(), 2);
        assert!(!controller.is_pending());
    }

    #[tokio::test]
    async fn test_second_submit_while_pending_is_dropped() {
        let mut controller = ChatController::new(unreachable_client());
        controller.submit("first");
        let count = controller.messages().len();

        controller.submit("second");
        assert_eq!(controller.messages().len(), count);

        poll_until_resolved(&mut controller).await;
        // Only the first submission resolved; nothing was queued.
        assert_eq!(controller.messages().len(), count + 1);
        assert!(!controller.is_pending());
    }

    #[tokio::test]
    async fn test_success_appends_assistant_message() {
        let base_url = spawn_stub_server(
            "200 OK",
            r#"{"code": "function add(a,b){return a+b}", "explanation": "adds two numbers"}"#,
        )
        .await;

        let mut controller = ChatController::new(GenerateClient::new(&base_url));
        controller.submit("add two numbers");
        poll_until_resolved(&mut controller).await;

        let last = controller.messages().last().unwrap();
        assert_eq!(last.kind, MessageKind::Assistant);
        assert_eq!(last.content, ASSISTANT_CONFIRMATION);
        assert_eq!(last.code.as_deref(), Some("function add(a,b){return a+b}"));
        assert_eq!(last.explanation.as_deref(), Some("adds two numbers"));
        assert!(!controller.is_pending());
    }

    #[tokio::test]
    async fn test_service_refusal_appends_error_with_its_text() {
        let base_url = spawn_stub_server("200 OK", r#"{"error": "prompt too vague"}"#).await;

        let mut controller = ChatController::new(GenerateClient::new(&base_url));
        controller.submit("???");
        poll_until_resolved(&mut controller).await;

        let last = controller.messages().last().unwrap();
        assert_eq!(last.kind, MessageKind::Error);
        assert_eq!(last.content, "prompt too vague");
        assert!(last.code.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_appends_generic_error() {
        let mut controller = ChatController::new(unreachable_client());
        controller.submit("add two numbers");
        poll_until_resolved(&mut controller).await;

        let last = controller.messages().last().unwrap();
        assert_eq!(last.kind, MessageKind::Error);
        assert_eq!(last.content, GENERIC_ERROR);
        assert!(!controller.is_pending());
    }

    #[tokio::test]
    async fn test_resolution_appends_exactly_one_message() {
        let mut controller = ChatController::new(unreachable_client());
        controller.submit("add two numbers");
        let after_submit = controller.messages().len();

        poll_until_resolved(&mut controller).await;
        assert_eq!(controller.messages().len(), after_submit + 1);

        // Further polling is inert.
        assert!(!controller.poll().await);
        assert_eq!(controller.messages().len(), after_submit + 1);
    }

    #[tokio::test]
    async fn test_quick_action_matches_typed_submission() {
        let mut controller = ChatController::new(unreachable_client());
        controller.quick_action("Write a function to add two numbers");

        let last = controller.messages().last().unwrap();
        assert_eq!(last.kind, MessageKind::User);
        assert_eq!(last.content, "Write a function to add two numbers");
        assert!(controller.is_pending());

        poll_until_resolved(&mut controller).await;
        assert!(!controller.is_pending());
    }

    #[tokio::test]
    async fn test_can_submit_again_after_an_error() {
        let mut controller = ChatController::new(unreachable_client());
        controller.submit("first");
        poll_until_resolved(&mut controller).await;

        controller.submit("second");
        assert!(controller.is_pending());
        let last = controller.messages().last().unwrap();
        assert_eq!(last.content, "second");
        poll_until_resolved(&mut controller).await;
    }
}
