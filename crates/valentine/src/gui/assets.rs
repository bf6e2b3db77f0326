use gdk_pixbuf::Pixbuf;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const BACKGROUND: &str = "background.png";
pub const CAT: &str = "cat.png";
pub const SMOOTH_EMOJI: &str = "smooth-emoji.png";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to load '{}': {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: glib::Error,
    },
}

pub fn load_image(path: &Path) -> Result<Pixbuf, AssetError> {
    Pixbuf::from_file(path).map_err(|source| AssetError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// Images shown on the card. Missing files are left out of the drawing.
#[derive(Default)]
pub struct Assets {
    pub background: Option<Pixbuf>,
    pub cat: Option<Pixbuf>,
    pub smooth_emoji: Option<Pixbuf>,
}

impl Assets {
    pub fn load(dir: &Path) -> Self {
        Self {
            background: Self::load_optional(dir, BACKGROUND),
            cat: Self::load_optional(dir, CAT),
            smooth_emoji: Self::load_optional(dir, SMOOTH_EMOJI),
        }
    }

    fn load_optional(dir: &Path, name: &str) -> Option<Pixbuf> {
        load_image(&dir.join(name))
            .inspect_err(|e| log::warn!("{}", e))
            .ok()
    }
}
