//! Browser-based chat client for a multimodal assistant backend: lists
//! conversations, renders message history (text plus attached images), and
//! submits new messages with optional image attachments over REST.

pub mod api;
pub mod components;
pub mod draft;
pub mod errors;
pub mod models;
pub mod state;
