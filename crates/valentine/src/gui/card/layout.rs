use super::{BUTTON_GAP, CARD_MARGIN, CARD_MAX_WIDTH, CARD_PADDING};
use cupid::geometry::{Point, Rect, Size};
use cupid::motion::Reveal;
use cupid::scene::ViewState;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    Yes,
    No,
    AddToCalendar,
    SaveIcs,
    Back,
    Forgive,
}

impl ButtonId {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Yes => "Yes! 💙",
            Self::No => "No",
            Self::AddToCalendar => "Add to Google Calendar",
            Self::SaveIcs => "Save .ics",
            Self::Back => "Back",
            Self::Forgive => "Pero tú eres el aire que respiro 🥺",
        }
    }

    /// Outlined buttons are drawn hollow; the rest are filled.
    pub fn is_outlined(&self) -> bool {
        matches!(self, Self::No | Self::Back)
    }

    /// Delay after the view change before the button fades in.
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(match self {
            Self::Yes | Self::No => 600,
            Self::AddToCalendar | Self::Forgive => 400,
            Self::SaveIcs => 450,
            Self::Back => 500,
        })
    }

    pub fn reveal(&self, view_elapsed: Duration) -> Reveal {
        Reveal::at(view_elapsed, self.reveal_delay())
    }

    fn size(&self) -> Size {
        match self {
            Self::Yes => Size::new(170.0, 56.0),
            Self::No => Size::new(110.0, 48.0),
            Self::AddToCalendar | Self::SaveIcs => Size::new(280.0, 48.0),
            Self::Back => Size::new(140.0, 48.0),
            Self::Forgive => Size::new(380.0, 52.0),
        }
    }
}

fn card_height(view: ViewState) -> f64 {
    match view {
        ViewState::Question => 460.0,
        ViewState::Yes => 560.0,
        ViewState::No => 380.0,
    }
}

/// Where the card and its buttons sit for one view at one viewport size.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub view: ViewState,
    pub card: Rect,
    pub buttons: Vec<(ButtonId, Rect)>,
}

impl CardLayout {
    pub fn compute(view: ViewState, viewport: Size) -> Self {
        let width = (viewport.width - 2.0 * CARD_MARGIN)
            .min(CARD_MAX_WIDTH)
            .max(0.0);
        let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        let card = Rect::centered(center, Size::new(width, card_height(view)));

        let buttons = match view {
            ViewState::Question => Self::question_buttons(&card),
            ViewState::Yes => Self::stacked(
                &card,
                &[ButtonId::AddToCalendar, ButtonId::SaveIcs, ButtonId::Back],
            ),
            ViewState::No => Self::stacked(&card, &[ButtonId::Forgive]),
        };

        Self {
            view,
            card,
            buttons,
        }
    }

    /// Yes and No side by side, or Yes above No when the card is too narrow.
    fn question_buttons(card: &Rect) -> Vec<(ButtonId, Rect)> {
        let (yes, no) = (ButtonId::Yes.size(), ButtonId::No.size());
        let row_width = yes.width + BUTTON_GAP + no.width;

        if row_width <= card.width - 2.0 * CARD_PADDING {
            let row_y = card.bottom() - CARD_PADDING - yes.height / 2.0;
            let left = card.center().x - row_width / 2.0;
            vec![
                (
                    ButtonId::Yes,
                    Rect::centered(Point::new(left + yes.width / 2.0, row_y), yes),
                ),
                (
                    ButtonId::No,
                    Rect::centered(
                        Point::new(left + yes.width + BUTTON_GAP + no.width / 2.0, row_y),
                        no,
                    ),
                ),
            ]
        } else {
            Self::stacked(card, &[ButtonId::Yes, ButtonId::No])
        }
    }

    /// Buttons in a centered column resting on the card's bottom padding.
    fn stacked(card: &Rect, ids: &[ButtonId]) -> Vec<(ButtonId, Rect)> {
        let max_width = (card.width - 2.0 * CARD_PADDING).max(0.0);
        let mut bottom = card.bottom() - CARD_PADDING;
        let mut buttons: Vec<_> = ids
            .iter()
            .rev()
            .map(|&id| {
                let size = id.size();
                let size = Size::new(size.width.min(max_width), size.height);
                let rect = Rect::centered(
                    Point::new(card.center().x, bottom - size.height / 2.0),
                    size,
                );
                bottom -= size.height + BUTTON_GAP;
                (id, rect)
            })
            .collect();
        buttons.reverse();
        buttons
    }

    /// Top of the area left for text and images.
    pub fn content_top(&self) -> f64 {
        self.card.y + CARD_PADDING
    }

    /// Bottom of the text area, just above the first button.
    pub fn content_bottom(&self) -> f64 {
        self.buttons
            .iter()
            .map(|(_, r)| r.y)
            .fold(self.card.bottom() - CARD_PADDING, f64::min)
            - BUTTON_GAP
    }

    pub fn button(&self, id: ButtonId) -> Option<Rect> {
        self.buttons
            .iter()
            .find(|(b, _)| *b == id)
            .map(|(_, rect)| *rect)
    }

    /// Undisplaced rectangle of the No button, if this view has one.
    pub fn no_home(&self) -> Option<Rect> {
        self.button(ButtonId::No)
    }

    /// Static button under `point`, in card coordinates, while each button is
    /// partway through its reveal. The No button moves, so it is never reported here.
    pub fn hit_test(&self, point: Point, view_elapsed: Duration) -> Option<ButtonId> {
        self.buttons
            .iter()
            .filter(|(id, _)| *id != ButtonId::No)
            .find(|(id, rect)| rect.contains(id.reveal(view_elapsed).lower(point)))
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    const DESKTOP: Size = Size {
        width: 1280.0,
        height: 800.0,
    };

    #[test]
    fn test_card_is_centered_and_capped() {
        let layout = CardLayout::compute(ViewState::Question, DESKTOP);
        assert_eq!(layout.card.width, CARD_MAX_WIDTH);
        assert_eq!(layout.card.center(), Point::new(640.0, 400.0));

        let narrow = CardLayout::compute(ViewState::Question, Size::new(300.0, 800.0));
        assert_eq!(narrow.card.width, 300.0 - 2.0 * CARD_MARGIN);
    }

    #[test]
    fn test_buttons_per_view() {
        let ids = |view| -> Vec<ButtonId> {
            CardLayout::compute(view, DESKTOP)
                .buttons
                .into_iter()
                .map(|(id, _)| id)
                .collect()
        };
        assert_eq!(ids(ViewState::Question), vec![ButtonId::Yes, ButtonId::No]);
        assert_eq!(
            ids(ViewState::Yes),
            vec![ButtonId::AddToCalendar, ButtonId::SaveIcs, ButtonId::Back]
        );
        assert_eq!(ids(ViewState::No), vec![ButtonId::Forgive]);
    }

    #[test]
    fn test_buttons_stay_inside_card() {
        for view in ViewState::iter() {
            for viewport in [DESKTOP, Size::new(360.0, 740.0)] {
                let layout = CardLayout::compute(view, viewport);
                for (id, rect) in &layout.buttons {
                    assert!(rect.x >= layout.card.x, "{id:?} in {view}");
                    assert!(rect.right() <= layout.card.right(), "{id:?} in {view}");
                    assert!(rect.bottom() <= layout.card.bottom(), "{id:?} in {view}");
                    assert!(rect.y >= layout.content_top(), "{id:?} in {view}");
                }
            }
        }
    }

    #[test]
    fn test_question_row_on_desktop_column_on_phone() {
        let desktop = CardLayout::compute(ViewState::Question, DESKTOP);
        let (yes, no) = (
            desktop.button(ButtonId::Yes).unwrap(),
            desktop.button(ButtonId::No).unwrap(),
        );
        assert_eq!(yes.center().y, no.center().y);
        assert!(yes.right() < no.x);

        let phone = CardLayout::compute(ViewState::Question, Size::new(320.0, 700.0));
        let (yes, no) = (
            phone.button(ButtonId::Yes).unwrap(),
            phone.button(ButtonId::No).unwrap(),
        );
        assert!(yes.bottom() < no.y);
    }

    #[test]
    fn test_hit_test_skips_no_button() {
        let layout = CardLayout::compute(ViewState::Question, DESKTOP);
        let yes = layout.button(ButtonId::Yes).unwrap();
        let no = layout.no_home().unwrap();
        let settled = Duration::from_secs(2);
        assert_eq!(layout.hit_test(yes.center(), settled), Some(ButtonId::Yes));
        assert_eq!(layout.hit_test(no.center(), settled), None);
        assert_eq!(layout.hit_test(Point::new(1.0, 1.0), settled), None);
    }

    #[test]
    fn test_no_home_only_on_question() {
        assert!(CardLayout::compute(ViewState::Yes, DESKTOP).no_home().is_none());
        assert!(CardLayout::compute(ViewState::No, DESKTOP).no_home().is_none());
    }

    #[test]
    fn test_content_area_above_buttons() {
        let layout = CardLayout::compute(ViewState::Yes, DESKTOP);
        let first = layout.button(ButtonId::AddToCalendar).unwrap();
        assert_eq!(layout.content_bottom(), first.y - BUTTON_GAP);
        assert!(layout.content_top() < layout.content_bottom());
    }

    #[test]
    fn test_hit_test_follows_rising_button() {
        let layout = CardLayout::compute(ViewState::Question, DESKTOP);
        let yes = layout.button(ButtonId::Yes).unwrap();
        let below = Point::new(yes.center().x, yes.bottom() + 10.0);

        // mid-reveal the button is drawn lower than its resting place
        let rising = ButtonId::Yes.reveal_delay() + Duration::from_millis(10);
        assert!(ButtonId::Yes.reveal(rising).rise > 10.0);
        assert_eq!(layout.hit_test(below, rising), Some(ButtonId::Yes));
        assert_eq!(layout.hit_test(below, Duration::from_secs(2)), None);
    }
}
