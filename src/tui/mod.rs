pub mod app;
pub mod input;
pub mod render;
pub mod text_edit;
pub mod theme;

pub use app::run;
