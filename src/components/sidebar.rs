use leptos::ev;
use leptos::prelude::*;

use crate::state::AppState;

fn confirm_delete() -> bool {
    web_sys::window()
        .map(|w| {
            w.confirm_with_message("Delete this conversation?")
                .unwrap_or(false)
        })
        .unwrap_or(false)
}

/// Sidebar: "New Conversation" button plus the summary list, with a delete
/// control per conversation.
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = expect_context::<AppState>();

    let on_new = {
        let state = state.clone();
        move |_| state.new_conversation()
    };

    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <h2>"Chimera Chat"</h2>
                <button class="new-chat-btn" on:click=on_new>
                    "+ New Conversation"
                </button>
            </div>
            <div class="conversation-list">
                {
                    let state = state.clone();
                    move || {
                        let convos = state.conversations.get();
                        if convos.is_empty() {
                            view! {
                                <div class="conversation-list-empty">"No conversations yet"</div>
                            }
                                .into_any()
                        } else {
                            let state = state.clone();
                            view! {
                                <For
                                    each=move || state.conversations.get()
                                    key=|c| c.id
                                    let:conv
                                >
                                    {
                                        let id = conv.id;
                                        let title = conv.display_title().to_string();
                                        let count = conv.message_count;
                                        let st_active = state.clone();
                                        let st_select = state.clone();
                                        let st_delete = state.clone();
                                        view! {
                                            <div
                                                class="conversation-item"
                                                class:active=move || {
                                                    st_active.active_conversation.get() == Some(id)
                                                }
                                                on:click=move |_| st_select.select_conversation(id)
                                            >
                                                <div class="conversation-info">
                                                    <div class="conversation-title">{title}</div>
                                                    <div class="conversation-meta">
                                                        {format!("{count} messages")}
                                                    </div>
                                                </div>
                                                <button
                                                    class="delete-btn"
                                                    title="Delete conversation"
                                                    on:click=move |ev: ev::MouseEvent| {
                                                        ev.stop_propagation();
                                                        if confirm_delete() {
                                                            st_delete.delete_conversation(id);
                                                        }
                                                    }
                                                >
                                                    "×"
                                                </button>
                                            </div>
                                        }
                                    }
                                </For>
                            }
                                .into_any()
                        }
                    }
                }
            </div>
        </aside>
    }
}
