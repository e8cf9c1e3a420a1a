//! Client-local composer state. A draft never leaves the browser: it is
//! cleared on a successful send or when the user switches conversation, and
//! left intact when a send fails so it can be resubmitted.

use wasm_bindgen::JsValue;
use web_sys::{File, Url};

/// Uncommitted composer contents: text plus pending attachments, in the
/// order the user added them. Generic over the attachment type; the UI uses
/// [`PendingImage`], tests use plain values.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft<A> {
    pub text: String,
    pub attachments: Vec<A>,
}

impl<A> Default for Draft<A> {
    fn default() -> Self {
        Self {
            text: String::new(),
            attachments: Vec::new(),
        }
    }
}

impl<A> Draft<A> {
    /// A blank draft must not be submitted: nothing but whitespace and no
    /// attachments. Attachments alone are enough to make a draft sendable.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty() && self.attachments.is_empty()
    }

    pub fn push_attachment(&mut self, attachment: A) {
        self.attachments.push(attachment);
    }

    /// Removes one attachment, leaving the rest in their original order.
    pub fn remove_attachment(&mut self, index: usize) -> Option<A> {
        if index < self.attachments.len() {
            Some(self.attachments.remove(index))
        } else {
            None
        }
    }

    /// Empties the draft, handing its previous contents to the caller (so
    /// preview resources can be released).
    pub fn take(&mut self) -> Draft<A> {
        std::mem::take(self)
    }
}

/// A picked local file plus the object URL its thumbnail renders from.
/// The URL is released via [`PendingImage::revoke`] when the attachment is
/// removed or the draft is cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingImage {
    pub file: File,
    pub preview_url: String,
}

impl PendingImage {
    pub fn new(file: File) -> Result<Self, JsValue> {
        let preview_url = Url::create_object_url_with_blob(&file)?;
        Ok(Self { file, preview_url })
    }

    pub fn name(&self) -> String {
        self.file.name()
    }

    pub fn revoke(self) {
        if let Err(e) = Url::revoke_object_url(&self.preview_url) {
            log::warn!("Failed to revoke object URL: {e:?}");
        }
    }
}

/// The draft the composer holds.
pub type ComposerDraft = Draft<PendingImage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_draft_rules() {
        let mut draft: Draft<&str> = Draft::default();
        assert!(draft.is_blank());

        draft.text = "   \n  ".into();
        assert!(draft.is_blank(), "whitespace-only text is still blank");

        draft.push_attachment("photo.png");
        assert!(!draft.is_blank(), "an attachment alone makes it sendable");

        draft.text = "hello".into();
        draft.attachments.clear();
        assert!(!draft.is_blank());
    }

    #[test]
    fn removing_one_attachment_preserves_order() {
        let mut draft: Draft<&str> = Draft::default();
        draft.push_attachment("a.png");
        draft.push_attachment("b.png");
        draft.push_attachment("c.png");

        assert_eq!(draft.remove_attachment(1), Some("b.png"));
        assert_eq!(draft.attachments, vec!["a.png", "c.png"]);

        assert_eq!(draft.remove_attachment(5), None);
        assert_eq!(draft.attachments, vec!["a.png", "c.png"]);
    }

    #[test]
    fn take_empties_the_draft() {
        let mut draft: Draft<&str> = Draft {
            text: "send me".into(),
            attachments: vec!["a.png"],
        };
        let taken = draft.take();
        assert_eq!(taken.text, "send me");
        assert_eq!(taken.attachments.len(), 1);
        assert!(draft.is_blank());
    }
}
