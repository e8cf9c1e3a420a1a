pub mod chat;
pub mod composer;
pub mod image_preview;
pub mod message;
pub mod sidebar;
