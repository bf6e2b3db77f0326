pub mod layout;
pub mod model;
pub mod view;

pub use layout::{ButtonId, CardLayout};
pub use model::{CardAction, Stage};
pub use view::draw;

pub const CARD_MAX_WIDTH: f64 = 560.0;
pub const CARD_MARGIN: f64 = 16.0; // space kept between card and window edge
pub const CARD_PADDING: f64 = 40.0;
pub const CARD_RADIUS: f64 = 24.0;
pub const BUTTON_GAP: f64 = 16.0;
pub const BUTTON_RADIUS: f64 = 12.0;

pub const FONT_FAMILY: &str = "Sans";
pub const TITLE_FONT_FAMILY: &str = "Serif";
pub const TITLE_SIZE: f64 = 34.0;
pub const QUESTION_SIZE: f64 = 36.0;
pub const BODY_SIZE: f64 = 18.0;
pub const BUTTON_FONT_SIZE: f64 = 17.0;
pub const LINE_SPACING: f64 = 1.45;
pub const PORTRAIT_SIZE: f64 = 64.0; // cat next to the title
pub const EMOJI_IMAGE_SIZE: f64 = 128.0;

pub const POINTER_GLOW_RADIUS: f64 = 600.0;

pub const QUESTION_TITLE: &str = "Que onda mamita";
pub const QUESTION_MESSAGE: &str = "My dearest friend, if you don't mind... I'd like to join you by \
     your side... For it is plain, as anyone can see, We're simply meant to be ✨";
pub const QUESTION: &str = "Will You Be My Valentine?";

pub const YES_TITLE: &str = "Good choice";
pub const YES_MESSAGE: &str = "Let me woo you, admire you, make you feel like the most sublime \
     creature on earth. 💎";

pub const NO_EMOJI: &str = "😒";
pub const NO_TITLE: &str = "Didn't expect you to be this fast";
