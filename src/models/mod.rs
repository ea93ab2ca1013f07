pub mod addon;
pub mod auth;
pub mod campaign;
pub mod client;
pub mod property;
pub mod workspace_user;

pub mod envelope;
pub mod pagination;
