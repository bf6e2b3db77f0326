pub mod calendar;
pub mod evasive;
pub mod geometry;
mod macros;
pub mod motion;
pub mod particles;
pub mod scene;
pub mod timeline;
