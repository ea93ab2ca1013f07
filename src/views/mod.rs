pub mod list_view;
pub mod render;
