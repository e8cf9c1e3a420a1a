use leptos::prelude::*;

use crate::api;
use crate::models::ImageInfo;
use crate::state::AppState;

/// Thumbnails for images already uploaded and attached to a message,
/// served from the backend's static file path.
#[component]
pub fn MessageImages(images: Vec<ImageInfo>) -> impl IntoView {
    view! {
        <div class="image-strip">
            {images
                .into_iter()
                .map(|image| {
                    let src = api::image_url(&image);
                    view! {
                        <img
                            class="message-image"
                            src=src
                            alt=image.file_name.clone()
                            title=image.file_name
                        />
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Thumbnails for the composer's pending attachments, each with a remove
/// control. Previews render from object URLs owned by the draft.
#[component]
pub fn PendingImageStrip() -> impl IntoView {
    let state = expect_context::<AppState>();
    let draft = state.draft;
    let set_draft = state.set_draft;

    // Remove by preview URL rather than position: object URLs are unique
    // per attachment, while row positions shift as earlier rows go away.
    let remove = move |preview_url: String| {
        set_draft.update(|draft| {
            if let Some(index) = draft
                .attachments
                .iter()
                .position(|a| a.preview_url == preview_url)
            {
                if let Some(image) = draft.remove_attachment(index) {
                    image.revoke();
                }
            }
        });
    };

    view! {
        <div class="attachment-strip">
            <For
                each=move || draft.with(|d| d.attachments.clone())
                key=|image| image.preview_url.clone()
                let:image
            >
                {
                    let url = image.preview_url.clone();
                    view! {
                        <div class="attachment">
                            <img
                                class="attachment-thumb"
                                src=image.preview_url.clone()
                                alt=image.name()
                            />
                            <button
                                class="attachment-remove"
                                type="button"
                                title="Remove attachment"
                                on:click=move |_| remove(url.clone())
                            >
                                "×"
                            </button>
                            <span class="attachment-name">{image.name()}</span>
                        </div>
                    }
                }
            </For>
        </div>
    }
}
