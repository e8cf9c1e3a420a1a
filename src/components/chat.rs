use leptos::html;
use leptos::prelude::*;

use crate::components::composer::Composer;
use crate::components::message::MessageBubble;
use crate::state::AppState;

/// Main chat area: error banner, header, message history, composer.
#[component]
pub fn ChatArea() -> impl IntoView {
    let state = expect_context::<AppState>();
    let bottom: NodeRef<html::Div> = NodeRef::new();

    // Keep the newest message (or the typing indicator) in view.
    {
        let messages = state.messages;
        let is_sending = state.is_sending;
        Effect::new(move |_| {
            messages.track();
            is_sending.track();
            if let Some(anchor) = bottom.get() {
                anchor.scroll_into_view();
            }
        });
    }

    let header = {
        let state = state.clone();
        move || match state.active_conversation.get() {
            Some(id) => state
                .conversations
                .with(|list| {
                    list.iter()
                        .find(|c| c.id == id)
                        .map(|c| c.display_title().to_string())
                })
                .unwrap_or_else(|| format!("Conversation {id}")),
            None => "New conversation".to_string(),
        }
    };

    let error = state.error;
    let set_error = state.set_error;
    let messages = state.messages;
    let is_sending = state.is_sending;

    view! {
        <main class="chat-area">
            {move || {
                error
                    .get()
                    .map(|err| {
                        view! {
                            <div class="error-banner">
                                <span class="error-text">{err}</span>
                                <button
                                    class="error-dismiss"
                                    title="Dismiss"
                                    on:click=move |_| set_error.set(None)
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
            }}

            <div class="chat-header">{header}</div>

            <div class="messages-container">
                {move || {
                    if messages.with(|m| m.is_empty()) && !is_sending.get() {
                        view! {
                            <div class="empty-state">
                                <h2>"Chimera Chat"</h2>
                                <p>
                                    "Start a conversation by typing a message or attaching images."
                                </p>
                            </div>
                        }
                            .into_any()
                    } else {
                        view! {
                            <For each=move || messages.get() key=|m| m.id let:msg>
                                <MessageBubble message=msg />
                            </For>
                        }
                            .into_any()
                    }
                }}
                {move || {
                    is_sending
                        .get()
                        .then(|| {
                            view! {
                                <div class="message assistant typing-indicator">
                                    <span class="dot"></span>
                                    <span class="dot"></span>
                                    <span class="dot"></span>
                                </div>
                            }
                        })
                }}
                <div class="scroll-anchor" node_ref=bottom></div>
            </div>

            <Composer />
        </main>
    }
}
