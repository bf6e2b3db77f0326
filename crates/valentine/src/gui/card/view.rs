use super::layout::{ButtonId, CardLayout};
use super::model::Stage;
use super::{
    BODY_SIZE, BUTTON_FONT_SIZE, BUTTON_RADIUS, CARD_PADDING, CARD_RADIUS, EMOJI_IMAGE_SIZE,
    FONT_FAMILY, LINE_SPACING, NO_EMOJI, NO_TITLE, PORTRAIT_SIZE, POINTER_GLOW_RADIUS, QUESTION,
    QUESTION_MESSAGE, QUESTION_SIZE, QUESTION_TITLE, TITLE_FONT_FAMILY, TITLE_SIZE, YES_MESSAGE,
    YES_TITLE,
};
use crate::gui::theme::ThemeColors;
use cairo::{Context, FontSlant, FontWeight, LinearGradient, RadialGradient};
use cupid::geometry::{Point, Rect, Size};
use cupid::motion::{Reveal, cycle_progress, keyframes};
use cupid::scene::{Scene, ViewState};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use rand::Rng;
use std::f64::consts::TAU;
use std::time::Duration;

// Loop length of the idle wobble on the Yes and No screens.
const IDLE_LOOP: Duration = Duration::from_secs(2);
const DIM_BACKGROUND: f64 = 0.4;

// Reveal delays of the text blocks, in order from the top of the card.
const TITLE_DELAY: Duration = Duration::from_millis(200);
const MESSAGE_DELAY: Duration = Duration::from_millis(300);
const DIVIDER_DELAY: Duration = Duration::from_millis(400);
const QUESTION_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy)]
struct Font {
    family: &'static str,
    size: f64,
    bold: bool,
}

impl Font {
    const fn body() -> Self {
        Self {
            family: FONT_FAMILY,
            size: BODY_SIZE,
            bold: false,
        }
    }

    const fn title(size: f64) -> Self {
        Self {
            family: TITLE_FONT_FAMILY,
            size,
            bold: true,
        }
    }

    fn apply(&self, cr: &Context) {
        let weight = if self.bold {
            FontWeight::Bold
        } else {
            FontWeight::Normal
        };
        cr.select_font_face(self.family, FontSlant::Normal, weight);
        cr.set_font_size(self.size);
    }
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn rounded_rect(cr: &Context, rect: Rect, radius: f64) {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0);
    cr.new_sub_path();
    cr.arc(rect.right() - r, rect.y + r, r, -TAU / 4.0, 0.0);
    cr.arc(rect.right() - r, rect.bottom() - r, r, 0.0, TAU / 4.0);
    cr.arc(rect.x + r, rect.bottom() - r, r, TAU / 4.0, TAU / 2.0);
    cr.arc(rect.x + r, rect.y + r, r, TAU / 2.0, TAU * 3.0 / 4.0);
    cr.close_path();
}

fn draw_image(cr: &Context, pixbuf: &Pixbuf, rect: Rect, circular: bool) -> Result<(), cairo::Error> {
    let (sx, sy) = (
        rect.width / pixbuf.width() as f64,
        rect.height / pixbuf.height() as f64,
    );
    cr.save()?;
    if circular {
        let c = rect.center();
        cr.arc(c.x, c.y, rect.width.min(rect.height) / 2.0, 0.0, TAU);
        cr.clip();
    }
    cr.translate(rect.x, rect.y);
    cr.scale(sx, sy);
    cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
    cr.paint()?;
    cr.restore()
}

/// Greedy word wrap against the current font.
fn wrap_lines(cr: &Context, text: &str, max_width: f64) -> Result<Vec<String>, cairo::Error> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if !current.is_empty() && cr.text_extents(&candidate)?.x_advance() > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}

/// Draws `text` centered on `center_x`, starting at `top`. Returns the y below the last line.
fn draw_paragraph(
    cr: &Context,
    text: &str,
    font: Font,
    color: Srgba<f64>,
    center_x: f64,
    top: f64,
    max_width: f64,
) -> Result<f64, cairo::Error> {
    font.apply(cr);
    set_color(cr, color);
    let ascent = cr.font_extents()?.ascent();
    let line_height = font.size * LINE_SPACING;

    let mut y = top;
    for line in wrap_lines(cr, text, max_width)? {
        let ext = cr.text_extents(&line)?;
        cr.move_to(center_x - ext.x_advance() / 2.0, y + ascent);
        cr.show_text(&line)?;
        y += line_height;
    }
    Ok(y)
}

/// Draws a single glyph run centered on `at`.
fn draw_symbol(cr: &Context, symbol: &str, size: f64, at: Point) -> Result<(), cairo::Error> {
    Font {
        family: FONT_FAMILY,
        size,
        bold: false,
    }
    .apply(cr);
    let ext = cr.text_extents(symbol)?;
    cr.move_to(
        at.x - ext.x_bearing() - ext.width() / 2.0,
        at.y - ext.y_bearing() - ext.height() / 2.0,
    );
    cr.show_text(symbol)
}

struct CardRenderer<'a> {
    stage: &'a Stage,
    layout: &'a CardLayout,
    colors: &'a ThemeColors,
}

impl<'a> CardRenderer<'a> {
    fn new(stage: &'a Stage, colors: &'a ThemeColors) -> Self {
        Self {
            stage,
            layout: &stage.layout,
            colors,
        }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        let entrance = self.stage.scene.entrance();
        if entrance.is_finished() {
            return self.draw_card(cr);
        }

        let c = self.layout.card.center();
        cr.save()?;
        cr.translate(c.x, c.y + entrance.rise);
        cr.rotate(entrance.rotation);
        cr.scale(entrance.scale, entrance.scale);
        cr.translate(-c.x, -c.y);

        cr.push_group();
        let drawn = self.draw_card(cr);
        cr.pop_group_to_source()?;
        cr.paint_with_alpha(entrance.opacity)?;
        cr.restore()?;
        drawn
    }

    fn draw_card(&self, cr: &Context) -> Result<(), cairo::Error> {
        self.draw_panel(cr)?;
        self.draw_content(cr)?;
        self.draw_buttons(cr)
    }

    fn reveal(&self, delay: Duration) -> Reveal {
        Reveal::at(self.stage.scene.view_elapsed(), delay)
    }

    /// Runs `draw` shifted down and faded by `reveal`.
    fn revealed<T>(
        &self,
        cr: &Context,
        reveal: Reveal,
        draw: impl FnOnce(&Context) -> Result<T, cairo::Error>,
    ) -> Result<T, cairo::Error> {
        if reveal.opacity >= 1.0 {
            return draw(cr);
        }
        cr.save()?;
        cr.translate(0.0, reveal.rise);
        cr.push_group();
        let drawn = draw(cr);
        cr.pop_group_to_source()?;
        cr.paint_with_alpha(reveal.opacity)?;
        cr.restore()?;
        drawn
    }

    fn draw_panel(&self, cr: &Context) -> Result<(), cairo::Error> {
        rounded_rect(cr, self.layout.card, CARD_RADIUS);
        set_color(cr, self.colors.card);
        cr.fill_preserve()?;
        set_color(cr, self.colors.card_border);
        cr.set_line_width(1.5);
        cr.stroke()
    }

    fn text_width(&self) -> f64 {
        (self.layout.card.width - 2.0 * CARD_PADDING).max(0.0)
    }

    fn idle_progress(&self) -> f64 {
        cycle_progress(self.stage.scene.now(), Duration::ZERO, IDLE_LOOP).unwrap_or_default()
    }

    fn draw_content(&self, cr: &Context) -> Result<(), cairo::Error> {
        match self.layout.view {
            ViewState::Question => self.draw_question(cr),
            ViewState::Yes => self.draw_yes(cr),
            ViewState::No => self.draw_no(cr),
        }
    }

    fn draw_question(&self, cr: &Context) -> Result<(), cairo::Error> {
        let cx = self.layout.card.center().x;
        let mut y = self.layout.content_top();

        // title with the cat portrait to its right
        let title_font = Font::title(TITLE_SIZE);
        title_font.apply(cr);
        let title_width = cr.text_extents(QUESTION_TITLE)?.x_advance();
        let portrait = self.stage.assets.cat.as_ref();
        let row_width = title_width + portrait.map_or(0.0, |_| 16.0 + PORTRAIT_SIZE);
        let left = cx - row_width / 2.0;
        let row_height = PORTRAIT_SIZE.max(TITLE_SIZE);

        self.revealed(cr, self.reveal(TITLE_DELAY), |cr| {
            title_font.apply(cr);
            set_color(cr, self.colors.title);
            let ascent = cr.font_extents()?.ascent();
            cr.move_to(left, y + (row_height - TITLE_SIZE) / 2.0 + ascent);
            cr.show_text(QUESTION_TITLE)?;
            if let Some(cat) = portrait {
                let rect = Rect::new(
                    left + title_width + 16.0,
                    y,
                    PORTRAIT_SIZE,
                    PORTRAIT_SIZE,
                );
                draw_image(cr, cat, rect, true)?;
            }
            Ok(())
        })?;
        y += row_height + 20.0;

        y = self.revealed(cr, self.reveal(MESSAGE_DELAY), |cr| {
            draw_paragraph(
                cr,
                QUESTION_MESSAGE,
                Font::body(),
                self.colors.text,
                cx,
                y,
                self.text_width(),
            )
        })?;
        y += 12.0;

        self.revealed(cr, self.reveal(DIVIDER_DELAY), |cr| {
            self.draw_divider(cr, y + 10.0)
        })?;
        y += 36.0;

        self.revealed(cr, self.reveal(QUESTION_DELAY), |cr| {
            draw_paragraph(
                cr,
                QUESTION,
                Font::title(QUESTION_SIZE),
                self.colors.title,
                cx,
                y,
                self.text_width(),
            )
        })?;
        Ok(())
    }

    fn draw_divider(&self, cr: &Context, y: f64) -> Result<(), cairo::Error> {
        let card = self.layout.card;
        let cx = card.center().x;
        let half = self.text_width() / 2.0;
        let (r, g, b, a) = self.colors.card_border.into_components();

        for (from, to) in [(cx - half, cx - 18.0), (cx + half, cx + 18.0)] {
            let gradient = LinearGradient::new(from, y, to, y);
            gradient.add_color_stop_rgba(0.0, r, g, b, 0.0);
            gradient.add_color_stop_rgba(1.0, r, g, b, a.max(0.8));
            cr.set_source(&gradient)?;
            cr.set_line_width(1.0);
            cr.move_to(from, y);
            cr.line_to(to, y);
            cr.stroke()?;
        }

        set_color(cr, self.colors.accent);
        draw_symbol(cr, "✨", 18.0, Point::new(cx, y))
    }

    fn draw_yes(&self, cr: &Context) -> Result<(), cairo::Error> {
        let cx = self.layout.card.center().x;
        let mut y = self.layout.content_top();

        if let Some(emoji) = self.stage.assets.smooth_emoji.as_ref() {
            let t = self.idle_progress();
            let scale = keyframes(&[1.0, 1.1, 1.0], t);
            let tilt = keyframes(&[0.0, 3.0, -3.0, 0.0], t).to_radians();
            let center = Point::new(cx, y + EMOJI_IMAGE_SIZE / 2.0);

            cr.save()?;
            cr.translate(center.x, center.y);
            cr.rotate(tilt);
            cr.scale(scale, scale);
            draw_image(
                cr,
                emoji,
                Rect::centered(
                    Point::default(),
                    Size::new(EMOJI_IMAGE_SIZE, EMOJI_IMAGE_SIZE),
                ),
                false,
            )?;
            cr.restore()?;
            y += EMOJI_IMAGE_SIZE + 24.0;
        }

        y = self.revealed(cr, self.reveal(TITLE_DELAY), |cr| {
            draw_paragraph(
                cr,
                YES_TITLE,
                Font::title(TITLE_SIZE),
                self.colors.title,
                cx,
                y,
                self.text_width(),
            )
        })?;
        y += 8.0;
        self.revealed(cr, self.reveal(MESSAGE_DELAY), |cr| {
            draw_paragraph(
                cr,
                YES_MESSAGE,
                Font::body(),
                self.colors.text,
                cx,
                y,
                self.text_width(),
            )
        })?;
        Ok(())
    }

    fn draw_no(&self, cr: &Context) -> Result<(), cairo::Error> {
        let cx = self.layout.card.center().x;
        let mut y = self.layout.content_top();

        let bob = keyframes(&[0.0, -10.0, 0.0], self.idle_progress());
        set_color(cr, self.colors.text);
        draw_symbol(cr, NO_EMOJI, 60.0, Point::new(cx, y + 36.0 + bob))?;
        y += 96.0;

        y = self.revealed(cr, self.reveal(TITLE_DELAY), |cr| {
            draw_paragraph(
                cr,
                NO_TITLE,
                Font::title(30.0),
                self.colors.title,
                cx,
                y,
                self.text_width(),
            )
        })?;
        self.revealed(cr, self.reveal(MESSAGE_DELAY), |cr| {
            set_color(cr, self.colors.text);
            draw_symbol(cr, NO_EMOJI, 22.0, Point::new(cx, y + 20.0))
        })
    }

    fn draw_buttons(&self, cr: &Context) -> Result<(), cairo::Error> {
        for (id, home) in &self.layout.buttons {
            let rect = match id {
                ButtonId::No => self.stage.scene.no_button().rect().unwrap_or(*home),
                _ => *home,
            };
            let reveal = id.reveal(self.stage.scene.view_elapsed());
            self.revealed(cr, reveal, |cr| self.draw_button(cr, *id, rect))?;
        }
        Ok(())
    }

    fn draw_button(&self, cr: &Context, id: ButtonId, rect: Rect) -> Result<(), cairo::Error> {
        rounded_rect(cr, rect, BUTTON_RADIUS);
        if id.is_outlined() {
            set_color(cr, Srgba::new(0.0, 0.0, 0.0, 0.3));
            cr.fill_preserve()?;
            set_color(cr, self.colors.outline);
            cr.set_line_width(2.0);
            cr.stroke()?;
        } else {
            set_color(cr, self.colors.button);
            cr.fill()?;
        }

        Font {
            family: FONT_FAMILY,
            size: BUTTON_FONT_SIZE,
            bold: true,
        }
        .apply(cr);
        set_color(
            cr,
            if id.is_outlined() {
                self.colors.accent
            } else {
                self.colors.button_text
            },
        );
        let label = id.label();
        let ext = cr.text_extents(label)?;
        let c = rect.center();
        cr.move_to(
            c.x - ext.x_advance() / 2.0,
            c.y - ext.y_bearing() - ext.height() / 2.0,
        );
        cr.show_text(label)
    }
}

fn draw_backdrop(
    cr: &Context,
    background: Option<&Pixbuf>,
    viewport: Size,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.backdrop);
    cr.paint()?;

    if let Some(pixbuf) = background {
        let (iw, ih) = (pixbuf.width() as f64, pixbuf.height() as f64);
        // cover the viewport, cropping the overflow evenly
        let scale = (viewport.width / iw).max(viewport.height / ih);
        let (w, h) = (iw * scale, ih * scale);
        draw_image(
            cr,
            pixbuf,
            Rect::new(
                (viewport.width - w) / 2.0,
                (viewport.height - h) / 2.0,
                w,
                h,
            ),
            false,
        )?;
        cr.set_source_rgba(0.0, 0.0, 0.0, DIM_BACKGROUND);
        cr.paint()?;
    }

    let gradient = LinearGradient::new(0.0, 0.0, 0.0, viewport.height);
    gradient.add_color_stop_rgba(0.0, 0.0, 0.0, 0.0, 0.6);
    gradient.add_color_stop_rgba(0.5, 0.0, 0.0, 0.0, 0.4);
    gradient.add_color_stop_rgba(1.0, 0.0, 0.0, 0.0, 0.7);
    cr.set_source(&gradient)?;
    cr.paint()
}

fn draw_pointer_glow<R: Rng>(
    cr: &Context,
    scene: &Scene<R>,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let Some(pointer) = scene.pointer().filter(|_| scene.is_hovering()) else {
        return Ok(());
    };

    let (r, g, b, a) = colors.glow.into_components();
    let glow = RadialGradient::new(
        pointer.x,
        pointer.y,
        0.0,
        pointer.x,
        pointer.y,
        POINTER_GLOW_RADIUS,
    );
    glow.add_color_stop_rgba(0.0, r, g, b, a * 0.4);
    glow.add_color_stop_rgba(0.4, r, g, b, 0.0);
    cr.set_source(&glow)?;
    cr.paint()
}

fn draw_ambient<R: Rng>(cr: &Context, scene: &Scene<R>) -> Result<(), cairo::Error> {
    let viewport = scene.viewport();
    for particle in scene.ambient() {
        let Some(frame) = particle.frame(scene.now(), viewport) else {
            continue;
        };
        if frame.opacity <= 0.0 {
            continue;
        }

        cr.save()?;
        cr.translate(frame.x, frame.y);
        cr.rotate(frame.rotation);
        cr.push_group();
        cr.set_source_rgba(1.0, 1.0, 1.0, 1.0);
        draw_symbol(cr, particle.symbol, particle.size, Point::default())?;
        cr.pop_group_to_source()?;
        cr.paint_with_alpha(frame.opacity)?;
        cr.restore()?;
    }
    Ok(())
}

fn draw_confetti<R: Rng>(cr: &Context, scene: &Scene<R>) -> Result<(), cairo::Error> {
    let viewport = scene.viewport();
    let age = scene.confetti_age();
    for piece in scene.confetti() {
        let Ok(color) = piece.color.to_srgb() else {
            continue;
        };
        let frame = piece.frame(age, viewport);
        cr.set_source_rgb(color.red, color.green, color.blue);
        cr.arc(frame.x, frame.y, piece.diameter() / 2.0, 0.0, TAU);
        cr.fill()?;
    }
    Ok(())
}

pub fn draw(cr: &Context, stage: &Stage, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let scene = &stage.scene;
    draw_backdrop(cr, stage.assets.background.as_ref(), scene.viewport(), colors)?;
    draw_pointer_glow(cr, scene, colors)?;
    draw_ambient(cr, scene)?;
    CardRenderer::new(stage, colors).draw(cr)?;
    draw_confetti(cr, scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairo::{Format, ImageSurface};

    #[test]
    fn test_wrap_keeps_every_word_within_width() {
        let surface = ImageSurface::create(Format::ARgb32, 8, 8).unwrap();
        let cr = Context::new(&surface).unwrap();
        Font::body().apply(&cr);

        let lines = wrap_lines(&cr, QUESTION_MESSAGE, 240.0).unwrap();
        assert_eq!(
            lines.join(" "),
            QUESTION_MESSAGE.split_whitespace().collect::<Vec<_>>().join(" ")
        );
        for line in lines.iter().filter(|l| l.contains(' ')) {
            assert!(cr.text_extents(line).unwrap().x_advance() <= 240.0, "{line}");
        }
    }

    #[test]
    fn test_wrap_empty_text() {
        let surface = ImageSurface::create(Format::ARgb32, 8, 8).unwrap();
        let cr = Context::new(&surface).unwrap();
        assert!(wrap_lines(&cr, "   ", 100.0).unwrap().is_empty());
    }
}
