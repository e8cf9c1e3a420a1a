use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::draft::ComposerDraft;
use crate::models::{ChatResponse, ConversationSummary, Message};

/// Shared application state, provided via Leptos context.
///
/// The message list is append-only from the client's point of view: it is
/// only ever replaced wholesale (conversation switch) or extended with the
/// user/assistant pair a completed send returns.
#[derive(Clone)]
pub struct AppState {
    // --- Read signals (for components to subscribe to) ---
    pub conversations: ReadSignal<Vec<ConversationSummary>>,
    pub active_conversation: ReadSignal<Option<i64>>,
    pub messages: ReadSignal<Vec<Message>>,
    pub is_sending: ReadSignal<bool>,
    pub error: ReadSignal<Option<String>>,
    pub draft: ReadSignal<ComposerDraft, LocalStorage>,

    // --- Write signals (for mutating state) ---
    pub set_conversations: WriteSignal<Vec<ConversationSummary>>,
    pub set_active_conversation: WriteSignal<Option<i64>>,
    pub set_messages: WriteSignal<Vec<Message>>,
    pub set_is_sending: WriteSignal<bool>,
    pub set_error: WriteSignal<Option<String>>,
    pub set_draft: WriteSignal<ComposerDraft, LocalStorage>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let (conversations, set_conversations) = signal(Vec::<ConversationSummary>::new());
        let (active_conversation, set_active_conversation) = signal(None::<i64>);
        let (messages, set_messages) = signal(Vec::<Message>::new());
        let (is_sending, set_is_sending) = signal(false);
        let (error, set_error) = signal(None::<String>);
        // Holds `web_sys::File` handles, which never cross threads.
        let (draft, set_draft) = signal_local(ComposerDraft::default());

        let state = Self {
            conversations,
            active_conversation,
            messages,
            is_sending,
            error,
            draft,
            set_conversations,
            set_active_conversation,
            set_messages,
            set_is_sending,
            set_error,
            set_draft,
        };

        provide_context(state.clone());
        state
    }

    /// Refresh the conversation summaries from the backend.
    pub fn load_conversations(&self) {
        let state = self.clone();
        spawn_local(async move {
            match api::list_conversations().await {
                Ok(summaries) => state.set_conversations.set(summaries),
                Err(e) => {
                    log::error!("Failed to fetch conversations: {e}");
                    state.set_error.set(Some(e.to_string()));
                }
            }
        });
    }

    /// Select a conversation and load its history. The visible message list
    /// is replaced only once the fetch succeeds; a failure leaves whatever
    /// was on screen untouched and raises the error banner instead.
    pub fn select_conversation(&self, id: i64) {
        let state = self.clone();
        // Switching away abandons whatever was being composed.
        self.clear_draft();
        self.set_active_conversation.set(Some(id));
        self.set_error.set(None);

        spawn_local(async move {
            match api::get_conversation(id).await {
                Ok(conversation) => {
                    // The user may have moved on while this was in flight.
                    if state.active_conversation.get_untracked() == Some(id) {
                        state.set_messages.set(conversation.messages);
                    } else {
                        log::warn!("Discarding history for conversation {id}: no longer active");
                    }
                }
                Err(e) => {
                    log::error!("Failed to load conversation {id}: {e}");
                    if state.active_conversation.get_untracked() == Some(id) {
                        state.set_error.set(Some(e.to_string()));
                    }
                }
            }
        });
    }

    /// Reset to the fresh-conversation state. The next send will open a new
    /// conversation server-side.
    pub fn new_conversation(&self) {
        self.clear_draft();
        self.set_active_conversation.set(None);
        self.set_messages.set(Vec::new());
        self.set_error.set(None);
    }

    /// Submit the current draft. No-op while another send is in flight or
    /// when the draft is blank; the draft is only cleared once the server
    /// has accepted it, so a failed send can be retried as-is.
    pub fn send_message(&self) {
        if self.is_sending.get_untracked() {
            return;
        }
        let draft = self.draft.get_untracked();
        if draft.is_blank() {
            return;
        }

        let text = draft.text.trim().to_string();
        let files: Vec<web_sys::File> =
            draft.attachments.iter().map(|a| a.file.clone()).collect();
        // Tag the request with the conversation it was composed in, so a
        // reply that lands after a switch can be recognised as stale.
        let dispatched_for = self.active_conversation.get_untracked();

        self.set_is_sending.set(true);
        self.set_error.set(None);

        let state = self.clone();
        spawn_local(async move {
            match api::send_message(&text, dispatched_for, &files).await {
                Ok(reply) => {
                    state.clear_draft();

                    let mut messages = state.messages.get_untracked();
                    let mut active = state.active_conversation.get_untracked();
                    if merge_chat_response(&mut messages, &mut active, dispatched_for, reply) {
                        state.set_messages.set(messages);
                        state.set_active_conversation.set(active);
                    } else {
                        log::warn!("Discarding chat reply: conversation no longer active");
                    }

                    // The server recorded the exchange either way.
                    state.load_conversations();
                }
                Err(e) => {
                    log::error!("Failed to send message: {e}");
                    state.set_error.set(Some(e.to_string()));
                }
            }
            state.set_is_sending.set(false);
        });
    }

    /// Delete a conversation. If it was the active one, fall back to the
    /// fresh-conversation state; either way the summary list is refreshed.
    pub fn delete_conversation(&self, id: i64) {
        let state = self.clone();
        spawn_local(async move {
            match api::delete_conversation(id).await {
                Ok(()) => {
                    if state.active_conversation.get_untracked() == Some(id) {
                        state.new_conversation();
                    }
                    state.load_conversations();
                }
                Err(e) => {
                    log::error!("Failed to delete conversation {id}: {e}");
                    state.set_error.set(Some(e.to_string()));
                }
            }
        });
    }

    fn clear_draft(&self) {
        self.set_draft.update(|draft| {
            for image in draft.take().attachments {
                image.revoke();
            }
        });
    }
}

/// Fold a completed send into the session. Returns `false` (leaving the
/// message list untouched) when the reply belongs to a conversation the
/// user has switched away from; otherwise appends the user/assistant pair
/// in order and adopts the server-assigned id when the send opened a fresh
/// conversation.
fn merge_chat_response(
    messages: &mut Vec<Message>,
    active: &mut Option<i64>,
    dispatched_for: Option<i64>,
    reply: ChatResponse,
) -> bool {
    if *active != dispatched_for {
        return false;
    }
    *active = Some(reply.conversation_id);
    messages.push(reply.user_message);
    messages.push(reply.assistant_message);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn message(id: i64, conversation_id: i64, role: Role, content: &str) -> Message {
        Message {
            id,
            conversation_id,
            role,
            content: content.into(),
            images: Vec::new(),
            created_at: "2025-03-14T09:00:00".into(),
        }
    }

    fn reply(conversation_id: i64) -> ChatResponse {
        ChatResponse {
            user_message: message(1, conversation_id, Role::User, "hi"),
            assistant_message: message(2, conversation_id, Role::Assistant, "hello"),
            conversation_id,
        }
    }

    #[test]
    fn fresh_send_appends_pair_and_adopts_id() {
        let mut messages = Vec::new();
        let mut active = None;

        assert!(merge_chat_response(&mut messages, &mut active, None, reply(42)));
        assert_eq!(active, Some(42));
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Assistant);
    }

    #[test]
    fn send_into_existing_conversation_appends_in_order() {
        let mut messages = vec![
            message(1, 7, Role::User, "earlier"),
            message(2, 7, Role::Assistant, "earlier reply"),
        ];
        let mut active = Some(7);

        assert!(merge_chat_response(&mut messages, &mut active, Some(7), reply(7)));
        assert_eq!(active, Some(7));
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].content, "hi");
        assert_eq!(messages[3].content, "hello");
    }

    #[test]
    fn reply_after_switching_conversation_is_discarded() {
        let mut messages = vec![message(9, 3, Role::User, "other thread")];
        let mut active = Some(3);

        // Send was dispatched for conversation 7, but 3 is active now.
        assert!(!merge_chat_response(&mut messages, &mut active, Some(7), reply(7)));
        assert_eq!(active, Some(3));
        assert_eq!(messages.len(), 1, "foreign reply must not leak in");
    }

    #[test]
    fn fresh_reply_is_discarded_after_selecting_a_conversation() {
        let mut messages = vec![message(9, 3, Role::User, "other thread")];
        let mut active = Some(3);

        // Send left from the fresh state; an existing conversation was
        // selected before the reply landed.
        assert!(!merge_chat_response(&mut messages, &mut active, None, reply(42)));
        assert_eq!(active, Some(3));
        assert_eq!(messages.len(), 1);
    }
}
