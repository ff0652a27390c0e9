//! Helper functions shared by the HTTP layer and the admin CLI.
//!
//! - [`session_id`] - Cart session id generation and header extraction

pub mod session_id;
