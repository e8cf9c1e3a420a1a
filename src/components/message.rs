use leptos::prelude::*;

use crate::components::image_preview::MessageImages;
use crate::models::Message;

/// Extract the HH:MM portion of a backend ISO-8601 timestamp. Anything too
/// short to carry a time renders as nothing rather than garbage.
fn format_time(timestamp: &str) -> &str {
    timestamp.get(11..16).unwrap_or("")
}

/// A single chat message bubble: role label, pre-wrapped text, any attached
/// images, and the time it was created.
#[component]
pub fn MessageBubble(message: Message) -> impl IntoView {
    let css_class = if message.role.is_user() {
        "message user"
    } else {
        "message assistant"
    };
    let time = format_time(&message.created_at).to_string();
    let images = (!message.images.is_empty()).then(|| {
        view! { <MessageImages images=message.images.clone() /> }
    });

    view! {
        <div class=css_class>
            <div class="role-label">{message.role.as_str()}</div>
            <div class="message-content">{message.content.clone()}</div>
            {images}
            <div class="timestamp">{time}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::format_time;

    #[test]
    fn time_is_clipped_to_hours_and_minutes() {
        assert_eq!(format_time("2025-03-14T09:26:53.589793"), "09:26");
        assert_eq!(format_time("2025-03-14T23:05:00"), "23:05");
    }

    #[test]
    fn malformed_timestamps_render_empty() {
        assert_eq!(format_time(""), "");
        assert_eq!(format_time("2025-03-14"), "");
    }
}
