pub mod addon_service;
pub mod auth_service;
pub mod campaign_service;
pub mod client_service;
pub mod fetch_guard;
pub mod list_service;
pub mod property_service;
pub mod user_service;
