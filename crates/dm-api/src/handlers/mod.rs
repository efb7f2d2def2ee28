//! Request handlers organized by resource

pub mod conversations;
pub mod health;
pub mod messages;
pub mod reactions;
pub mod users;
