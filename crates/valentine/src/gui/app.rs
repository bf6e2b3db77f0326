use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::card::{self, CardAction, Stage};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use crate::sys::launch;
use cupid::calendar;
use cupid::geometry::Point;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct AppModel {
    pub stage: Rc<RefCell<Stage>>,
    pub started: Instant,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    frame_source: Option<glib::SourceId>,
}

#[derive(Debug)]
pub enum AppMsg {
    Tick,
    PointerMove(Point),
    PointerLeave,
    Click(Point),
    Close,
    EditConfig,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Will You Be My Valentine?"),
            add_css_class: "valentine-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, modifiers| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Close);
                        return glib::Propagation::Stop;
                    }
                    if key == gtk::gdk::Key::comma
                        && modifiers.contains(gtk::gdk::ModifierType::CONTROL_MASK)
                    {
                        sender.input(AppMsg::EditConfig);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "valentine-drawing-area",

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::PointerMove(Point::new(x, y)));
                    },
                    connect_leave[sender] => move |_| {
                        sender.input(AppMsg::PointerLeave);
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: gtk::gdk::BUTTON_PRIMARY,
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Click(Point::new(x, y)));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();
        window::init_window(&root, config.fullscreen);

        let viewport = cupid::geometry::Size::new(
            window::DEFAULT_WIDTH as f64,
            window::DEFAULT_HEIGHT as f64,
        );

        let model = AppModel {
            stage: Rc::new(RefCell::new(Stage::new(&config, viewport))),
            started: Instant::now(),
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            frame_source: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let stage_draw = model.stage.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = card::draw(cr, &stage_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let tick_sender = sender.clone();
        model.frame_source = Some(glib::timeout_add_local(FRAME_INTERVAL, move || {
            tick_sender.input(AppMsg::Tick);
            glib::ControlFlow::Continue
        }));

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Tick => {
                let viewport = window::viewport_size(&self.drawing_area);
                self.stage
                    .borrow_mut()
                    .tick(self.started.elapsed(), viewport);
                self.drawing_area.queue_draw();
            }
            AppMsg::PointerMove(point) => {
                self.stage.borrow_mut().pointer_moved(point);
            }
            AppMsg::PointerLeave => {
                self.stage.borrow_mut().pointer_left();
            }
            AppMsg::Click(point) => {
                let action = self.stage.borrow_mut().click(point);
                if let Some(action) = action {
                    self.perform(action);
                }
                self.drawing_area.queue_draw();
            }
            AppMsg::Close => {
                self.root.close();
            }
            AppMsg::EditConfig => match config::write_default_config() {
                Ok(path) => {
                    if let Err(e) = launch::open(&path.to_string_lossy()) {
                        log::error!("Failed to open '{}': {}", path.display(), e);
                    }
                }
                Err(e) => log::error!("Failed to write default config: {}", e),
            },
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.stage.borrow_mut().apply_config(&new_config);
                    window::apply_fullscreen(&self.root, new_config.fullscreen);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        if let Some(source) = self.frame_source.take() {
            source.remove();
        }
    }
}

impl AppModel {
    fn perform(&self, action: CardAction) {
        match action {
            CardAction::OpenCalendar => {
                let url = calendar::google_calendar_url();
                if let Err(e) = launch::open(&url) {
                    log::error!("Failed to open '{}': {}", url, e);
                }
            }
            CardAction::SaveIcs => {
                let dir = self.stage.borrow().download_dir.clone();
                match calendar::write_ics(&dir) {
                    Ok(path) => log::info!(
                        "Saved invite to {} ({})",
                        path.display(),
                        calendar::ICS_MIME_TYPE
                    ),
                    Err(e) => log::error!("Failed to save invite: {}", e),
                }
            }
        }
    }
}
