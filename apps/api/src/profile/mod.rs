// Search profile: form fields, tag sets and per-user form sessions.

pub mod handlers;
pub mod models;
pub mod session;
pub mod tags;
