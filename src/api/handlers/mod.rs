pub mod auth;
pub mod events;
pub mod health;
pub mod media;
pub mod students;
