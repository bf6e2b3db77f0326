pub mod app;
pub mod assets;
pub mod card;
pub mod theme;
pub mod window;
