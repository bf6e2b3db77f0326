use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub backdrop: Srgba<f64>,
    pub card: Srgba<f64>,
    pub card_border: Srgba<f64>,
    pub glow: Srgba<f64>,
    pub accent: Srgba<f64>,
    pub title: Srgba<f64>,
    pub text: Srgba<f64>,
    pub button: Srgba<f64>,
    pub button_text: Srgba<f64>,
    pub outline: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            backdrop: Self::lookup_color(
                context,
                "valentine_backdrop",
                Srgba::new(0.0, 0.0, 0.0, 1.0),
                None,
            ),
            card: Self::lookup_color(
                context,
                "valentine_card",
                Srgba::new(0.0, 0.0, 0.0, 0.4),
                Some(0.4),
            ),
            card_border: Self::lookup_color(
                context,
                "valentine_blue",
                Srgba::new(0.23, 0.51, 0.96, 0.4),
                Some(0.4),
            ),
            glow: Self::lookup_color(
                context,
                "valentine_blue",
                Srgba::new(0.23, 0.51, 0.96, 0.4),
                Some(0.4),
            ),
            accent: Self::lookup_color(
                context,
                "valentine_accent",
                Srgba::new(0.38, 0.65, 0.98, 1.0),
                None,
            ),
            title: Self::lookup_color(
                context,
                "valentine_glow",
                Srgba::new(0.58, 0.77, 0.99, 1.0),
                None,
            ),
            text: Self::lookup_color(
                context,
                "valentine_text",
                Srgba::new(0.82, 0.84, 0.86, 1.0),
                None,
            ),
            button: Self::lookup_color(
                context,
                "valentine_button",
                Srgba::new(0.15, 0.39, 0.92, 1.0),
                None,
            ),
            button_text: Self::lookup_color(
                context,
                "valentine_button_text",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                None,
            ),
            outline: Self::lookup_color(
                context,
                "valentine_accent",
                Srgba::new(0.38, 0.65, 0.98, 0.8),
                Some(0.8),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color valentine_backdrop #000000;
@define-color valentine_card #000000;
@define-color valentine_blue #3b82f6;
@define-color valentine_accent #60a5fa;
@define-color valentine_glow #93c5fd;
@define-color valentine_text #d1d5db;
@define-color valentine_button #2563eb;
@define-color valentine_button_text #ffffff;

.valentine-window, .valentine-drawing-area {
    background-color: @valentine_backdrop;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
