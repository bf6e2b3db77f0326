use cupid::geometry::Size;
use gtk::prelude::*;
use gtk4 as gtk;

pub const DEFAULT_WIDTH: i32 = 1280;
pub const DEFAULT_HEIGHT: i32 = 800;

pub fn init_window(window: &gtk::ApplicationWindow, fullscreen: bool) {
    window.set_default_size(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    apply_fullscreen(window, fullscreen);
}

pub fn apply_fullscreen(window: &gtk::ApplicationWindow, fullscreen: bool) {
    if fullscreen {
        window.fullscreen();
    } else if window.is_fullscreen() {
        window.unfullscreen();
    }
}

/// Logical size of the drawing surface, falling back to the default window size
/// before the first allocation.
pub fn viewport_size(area: &gtk::DrawingArea) -> Size {
    let (w, h) = (area.width(), area.height());
    if w > 0 && h > 0 {
        Size::new(w as f64, h as f64)
    } else {
        Size::new(DEFAULT_WIDTH as f64, DEFAULT_HEIGHT as f64)
    }
}
