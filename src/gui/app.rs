use crate::config::{self, Style};
use crate::events::AppEvent;
use crate::gui::theme;
use crate::widget::{self, CheckBox, FrameScheduler, FrameToken};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Delivers frames back to the component through glib timeouts on the main loop.
pub struct GlibScheduler {
    sender: relm4::Sender<AppMsg>,
}

impl FrameScheduler for GlibScheduler {
    fn schedule_frame(&self, token: FrameToken, delay: Duration) {
        let sender = self.sender.clone();
        glib::timeout_add_local_once(delay, move || {
            sender.emit(AppMsg::Frame(token));
        });
    }
}

pub struct AppModel {
    pub checkbox: Rc<RefCell<CheckBox<GlibScheduler>>>,
    pub checked: bool,
    pub size: i32,
    pub duration_override: Option<Duration>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Toggle,
    Resize(i32, i32),
    Frame(FrameToken),
    CheckedChanged(bool),
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
    type Init = (
        Style,
        i32,
        Option<Duration>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Tickbox"),
            set_resizable: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::space {
                        sender.input(AppMsg::Toggle);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,
                set_margin_top: 24,
                set_margin_bottom: 24,
                set_margin_start: 48,
                set_margin_end: 48,

                #[local_ref]
                drawing_area -> gtk::DrawingArea {
                    set_content_width: model.size,
                    set_content_height: model.size,
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::Center,
                    add_css_class: "tickbox-drawing-area",

                    connect_resize[sender] => move |_, width, height| {
                        sender.input(AppMsg::Resize(width, height));
                    },

                    add_controller = gtk::GestureClick {
                        connect_released[sender] => move |_, _, _, _| {
                            sender.input(AppMsg::Toggle);
                        }
                    }
                },

                gtk::Label {
                    #[watch]
                    set_label: if model.checked { "Checked" } else { "Unchecked" },
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (mut style, size, duration_override, rx) = init;

        theme::load_css();

        if let Some(duration) = duration_override {
            style.anim_duration = duration;
        }

        let scheduler = GlibScheduler {
            sender: sender.input_sender().clone(),
        };
        let mut checkbox = CheckBox::new(style, scheduler);

        let listener_sender = sender.clone();
        checkbox.set_on_checked_change_listener(move |_, checked| {
            log::info!("Checked changed: {}", checked);
            listener_sender.input(AppMsg::CheckedChanged(checked));
        });

        let checkbox = Rc::new(RefCell::new(checkbox));

        let checkbox_draw = checkbox.clone();
        let canvas = gtk::DrawingArea::new();
        canvas.set_draw_func(move |_, cr, _, _| {
            if let Err(e) = widget::draw(cr, &checkbox_draw.borrow()) {
                log::error!("Drawing error: {}", e);
            }
        });

        let model = AppModel {
            checkbox,
            checked: false,
            size,
            duration_override,
            drawing_area: canvas,
        };

        let drawing_area = &model.drawing_area;
        let widgets = view_output!();

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
            AppMsg::Toggle => {
                self.checkbox.borrow_mut().toggle();
                self.drawing_area.queue_draw();
            }
            AppMsg::Resize(width, height) => {
                self.checkbox
                    .borrow_mut()
                    .on_resize(width as f64, height as f64);
            }
            AppMsg::Frame(token) => {
                if self.checkbox.borrow_mut().on_frame(token, Instant::now()) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::CheckedChanged(checked) => {
                self.checked = checked;
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(mut style) => {
                    if let Some(duration) = self.duration_override {
                        style.anim_duration = duration;
                    }
                    self.checkbox.borrow_mut().set_style(style);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
