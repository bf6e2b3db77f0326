use super::layout::{ButtonId, CardLayout};
use crate::config::Config;
use crate::gui::assets::Assets;
use cupid::geometry::{Point, Size};
use cupid::scene::{Scene, ViewState};
use rand::rngs::ThreadRng;
use std::path::PathBuf;
use std::time::Duration;

/// Side effects a click asks the application to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    OpenCalendar,
    SaveIcs,
}

/// Everything the renderer needs: the scene, its layout and the images.
pub struct Stage {
    pub scene: Scene<ThreadRng>,
    pub layout: CardLayout,
    pub assets: Assets,
    pub download_dir: PathBuf,
}

impl Stage {
    pub fn new(config: &Config, viewport: Size) -> Self {
        let mut scene = Scene::new(rand::rng(), viewport);
        scene.set_timer_policy(config.timer_policy);

        let mut stage = Self {
            layout: CardLayout::compute(scene.view(), viewport),
            scene,
            assets: Assets::load(&config.assets_dir),
            download_dir: config.download_dir(),
        };
        stage.relayout(viewport);
        stage
    }

    pub fn apply_config(&mut self, config: &Config) {
        self.scene.set_timer_policy(config.timer_policy);
        self.assets = Assets::load(&config.assets_dir);
        self.download_dir = config.download_dir();
    }

    pub fn relayout(&mut self, viewport: Size) {
        self.scene.resize(viewport);
        self.layout = CardLayout::compute(self.scene.view(), viewport);
        match self.layout.no_home() {
            Some(rect) => self.scene.set_no_button_home(rect),
            None => self.scene.detach_no_button(),
        }
    }

    /// Advance to scene time `now` for a viewport of `viewport`.
    pub fn tick(&mut self, now: Duration, viewport: Size) {
        self.scene.advance(now);
        self.relayout(viewport);
    }

    /// Maps a window point into the card's resting coordinates, undoing the
    /// entrance animation.
    fn card_point(&self, point: Point) -> Point {
        self.scene
            .entrance()
            .unproject(point, self.layout.card.center())
    }

    fn no_button_point(&self, point: Point) -> Point {
        ButtonId::No
            .reveal(self.scene.view_elapsed())
            .lower(self.card_point(point))
    }

    pub fn pointer_moved(&mut self, point: Point) -> bool {
        let over_card = self.layout.card.contains(self.card_point(point));
        self.scene.track_pointer(point, over_card);
        let local = self.no_button_point(point);
        self.scene.nudge_no_button(local)
    }

    pub fn pointer_left(&mut self) {
        self.scene.pointer_left();
    }

    pub fn click(&mut self, point: Point) -> Option<CardAction> {
        let no_point = self.no_button_point(point);
        let on_no = self.scene.view() == ViewState::Question
            && self
                .scene
                .no_button()
                .rect()
                .is_some_and(|r| r.contains(no_point));

        if on_no {
            if self.scene.click_no(no_point) {
                self.relayout(self.scene.viewport());
            } else if let Some(center) = self.scene.no_button().center() {
                log::debug!(
                    "No click ignored, {:.1}px from center",
                    no_point.distance_to(center)
                );
            }
            return None;
        }

        let card_point = self.card_point(point);
        match self
            .layout
            .hit_test(card_point, self.scene.view_elapsed())?
        {
            ButtonId::Yes => {
                self.scene.accept();
                self.relayout(self.scene.viewport());
                None
            }
            ButtonId::Back | ButtonId::Forgive => {
                self.scene.reset();
                self.relayout(self.scene.viewport());
                None
            }
            ButtonId::AddToCalendar => Some(CardAction::OpenCalendar),
            ButtonId::SaveIcs => Some(CardAction::SaveIcs),
            ButtonId::No => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 1280.0,
        height: 800.0,
    };

    fn stage() -> Stage {
        let config = Config {
            assets_dir: PathBuf::from("/nonexistent/valentine-assets"),
            ..Config::default()
        };
        Stage::new(&config, VIEWPORT)
    }

    /// Ticks past every entrance and reveal of the current view.
    fn settle(stage: &mut Stage) {
        let now = stage.scene.now() + Duration::from_secs(2);
        stage.tick(now, VIEWPORT);
    }

    fn settled_stage() -> Stage {
        let mut stage = stage();
        settle(&mut stage);
        stage
    }

    fn center_of(stage: &Stage, id: ButtonId) -> Point {
        stage.layout.button(id).map(|r| r.center()).unwrap()
    }

    /// Where the renderer draws the center of `id` at the current frame.
    fn drawn_center(stage: &Stage, id: ButtonId) -> Point {
        let entrance = stage.scene.entrance();
        let pivot = stage.layout.card.center();
        let c = center_of(stage, id);
        let rise = id.reveal(stage.scene.view_elapsed()).rise;

        let (dx, dy) = (
            (c.x - pivot.x) * entrance.scale,
            (c.y + rise - pivot.y) * entrance.scale,
        );
        let (sin, cos) = entrance.rotation.sin_cos();
        Point::new(
            pivot.x + dx * cos - dy * sin,
            pivot.y + entrance.rise + dx * sin + dy * cos,
        )
    }

    #[test]
    fn test_yes_then_back() {
        let mut stage = settled_stage();
        let yes = center_of(&stage, ButtonId::Yes);
        assert_eq!(stage.click(yes), None);
        assert_eq!(stage.scene.view(), ViewState::Yes);
        assert_eq!(stage.scene.pending_bursts(), 3);
        assert_eq!(stage.layout.view, ViewState::Yes);

        settle(&mut stage);
        let back = center_of(&stage, ButtonId::Back);
        stage.click(back);
        assert_eq!(stage.scene.view(), ViewState::Question);
        assert!(stage.scene.no_button().rect().is_some());
    }

    #[test]
    fn test_calendar_buttons_request_actions() {
        let mut stage = settled_stage();
        stage.scene.accept();
        settle(&mut stage);

        let add = center_of(&stage, ButtonId::AddToCalendar);
        let save = center_of(&stage, ButtonId::SaveIcs);
        assert_eq!(stage.click(add), Some(CardAction::OpenCalendar));
        assert_eq!(stage.click(save), Some(CardAction::SaveIcs));
        assert_eq!(stage.scene.view(), ViewState::Yes);
    }

    #[test]
    fn test_clicks_land_on_buttons_as_drawn_during_entrance() {
        let mut stage = stage();
        stage.tick(Duration::from_millis(250), VIEWPORT);
        assert!(!stage.scene.entrance().is_finished());
        let yes = drawn_center(&stage, ButtonId::Yes);
        assert_eq!(stage.click(yes), None);
        assert_eq!(stage.scene.view(), ViewState::Yes);

        // the Yes card is scaled and tilted while the calendar button rises
        stage.tick(Duration::from_millis(700), VIEWPORT);
        assert!(!stage.scene.entrance().is_finished());
        assert_ne!(stage.scene.entrance().rotation, 0.0);
        let add = drawn_center(&stage, ButtonId::AddToCalendar);
        assert_eq!(stage.click(add), Some(CardAction::OpenCalendar));
    }

    #[test]
    fn test_no_button_runs_then_gets_cornered() {
        let mut stage = settled_stage();
        let home = stage.layout.no_home().unwrap();

        // a near-center click on an uncornered button is swallowed
        stage.pointer_moved(home.center());
        assert_eq!(stage.click(Point::new(home.center().x + 10.0, home.center().y)), None);
        assert_eq!(stage.scene.view(), ViewState::Question);

        let mut now = stage.scene.now();
        for _ in 0..6 {
            let center = stage.scene.no_button().center().unwrap();
            stage.pointer_moved(Point::new(center.x - 5.0, center.y - 5.0));
            now += Duration::from_secs(5);
            stage.tick(now, VIEWPORT);
        }

        let center = stage.scene.no_button().center().unwrap();
        stage.click(center);
        assert_eq!(stage.scene.view(), ViewState::No);
        assert!(stage.scene.no_button().rect().is_none());

        settle(&mut stage);
        stage.click(center_of(&stage, ButtonId::Forgive));
        assert_eq!(stage.scene.view(), ViewState::Question);
        assert_eq!(stage.scene.button_offset(), Default::default());
    }

    #[test]
    fn test_glow_follows_card_hover() {
        let mut stage = settled_stage();
        stage.pointer_moved(stage.layout.card.center());
        assert!(stage.scene.is_hovering());
        assert_eq!(stage.scene.pointer(), Some(stage.layout.card.center()));
        stage.pointer_moved(Point::new(2.0, 2.0));
        assert!(!stage.scene.is_hovering());
    }
}
