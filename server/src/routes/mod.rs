pub mod api;
pub mod overlay;
pub mod text;
