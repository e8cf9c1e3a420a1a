use leptos::ev;
use leptos::html;
use leptos::prelude::*;

use crate::components::image_preview::PendingImageStrip;
use crate::draft::PendingImage;
use crate::state::AppState;

/// Message composer: attachment strip, image picker, textarea, send button.
///
/// Enter submits, Shift+Enter inserts a newline. The whole composer is
/// disabled while a send is in flight, so at most one send is ever pending.
#[component]
pub fn Composer() -> impl IntoView {
    let state = expect_context::<AppState>();
    let file_input: NodeRef<html::Input> = NodeRef::new();

    let is_sending = state.is_sending;
    let draft = state.draft;
    let set_draft = state.set_draft;

    let send = {
        let state = state.clone();
        move || state.send_message()
    };

    let on_keydown = {
        let send = send.clone();
        move |ev: ev::KeyboardEvent| {
            if ev.key() == "Enter" && !ev.shift_key() {
                ev.prevent_default();
                send();
            }
        }
    };

    let on_input = move |ev| {
        let value = event_target_value(&ev);
        set_draft.update(|draft| draft.text = value);
    };

    let open_picker = move |_| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let on_files_selected = move |_| {
        let Some(input) = file_input.get() else {
            return;
        };
        if let Some(list) = input.files() {
            for i in 0..list.length() {
                if let Some(file) = list.get(i) {
                    match PendingImage::new(file) {
                        Ok(image) => set_draft.update(|draft| draft.push_attachment(image)),
                        Err(e) => log::error!("Could not preview selected file: {e:?}"),
                    }
                }
            }
        }
        // Reset so picking the same file again re-fires the change event.
        input.set_value("");
    };

    let send_disabled = move || is_sending.get() || draft.with(|d| d.is_blank());

    view! {
        <div class="input-area">
            <PendingImageStrip />
            <div class="input-row">
                <input
                    type="file"
                    accept="image/*"
                    multiple
                    class="file-input"
                    node_ref=file_input
                    on:change=on_files_selected
                />
                <button
                    class="attach-btn"
                    type="button"
                    title="Attach images"
                    on:click=open_picker
                    disabled=move || is_sending.get()
                >
                    "+"
                </button>
                <textarea
                    rows="2"
                    placeholder="Type a message… (Enter to send, Shift+Enter for newline)"
                    prop:value=move || draft.with(|d| d.text.clone())
                    on:input=on_input
                    on:keydown=on_keydown
                    disabled=move || is_sending.get()
                />
                <button class="send-btn" on:click=move |_| send() disabled=send_disabled>
                    {move || if is_sending.get() { "Sending…" } else { "Send" }}
                </button>
            </div>
        </div>
    }
}
