use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use iced::task;
use iced::widget::{column, container, image, text};
use iced::window;
use iced::{event, keyboard, mouse, Element, Fill, Padding, Point, Rectangle, Size, Subscription, Task, Theme};

use crate::autocomplete::pointer::PointerHub;
use crate::autocomplete::{Action, Autocomplete, Event, NavKey, Selection, Settings};
use crate::autocomplete::requests::RequestId;
use crate::config::Config;
use crate::search::{CardSearch, LookupError};
use crate::ui::{layout, search_input, suggestion_list, theme};

pub struct State {
    search: Arc<dyn CardSearch>,
    picker: Autocomplete,
    /// Last committed commander
    selection: Option<Selection>,

    pointer_hub: PointerHub,
    /// Shared with the picker's hit test
    picker_bounds: Rc<Cell<Rectangle>>,
    window_size: Size,
    cursor: Point,

    /// Dropping either handle aborts its task
    pending_timer: Option<task::Handle>,
    pending_lookup: Option<task::Handle>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Picker(Event),
    ThumbnailFetched {
        request: RequestId,
        card_id: String,
        result: Result<Vec<u8>, Arc<LookupError>>,
    },
    KeyEvent(keyboard::Event),
    CursorMoved(Point),
    PointerPressed,
    WindowResized(Size),
}

impl State {
    pub fn new(config: Config, search: Arc<dyn CardSearch>) -> (Self, Task<Message>) {
        let window_size = Size::new(config.window.width, config.window.height);
        let mut picker = Autocomplete::new(Settings::from(&config));

        let pointer_hub = PointerHub::new();
        let picker_bounds = Rc::new(Cell::new(Rectangle::default()));
        let bounds = Rc::clone(&picker_bounds);
        picker.attach_pointer(&pointer_hub, move |position| bounds.get().contains(position));

        let mut state = Self {
            search,
            picker,
            selection: None,
            pointer_hub,
            picker_bounds,
            window_size,
            cursor: Point::ORIGIN,
            pending_timer: None,
            pending_lookup: None,
        };
        state.sync_picker();

        (state, iced::widget::operation::focus(search_input::SEARCH_INPUT_ID))
    }

    pub fn title(&self) -> String {
        String::from("Commander Picker")
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::Picker(event) => self.dispatch(event),
            Message::ThumbnailFetched {
                request,
                card_id,
                result,
            } => match result {
                Ok(bytes) => self.dispatch(Event::ThumbnailLoaded {
                    request,
                    card_id,
                    image: image::Handle::from_bytes(bytes),
                }),
                Err(e) => {
                    tracing::warn!("Failed to load thumbnail for {}: {}", card_id, e);
                    Task::none()
                }
            },
            Message::KeyEvent(kb_event) => match kb_event {
                keyboard::Event::KeyPressed {
                    key: keyboard::Key::Named(keyboard::key::Named::Escape),
                    ..
                } => self.dispatch(Event::Key(NavKey::Escape)),
                keyboard::Event::KeyPressed {
                    key: keyboard::Key::Named(keyboard::key::Named::ArrowUp),
                    ..
                } => self.dispatch(Event::Key(NavKey::Up)),
                keyboard::Event::KeyPressed {
                    key: keyboard::Key::Named(keyboard::key::Named::ArrowDown),
                    ..
                } => self.dispatch(Event::Key(NavKey::Down)),
                _ => Task::none(),
            },
            Message::CursorMoved(position) => {
                self.cursor = position;
                Task::none()
            }
            Message::PointerPressed => {
                let picker_id = self.picker.pointer_id();
                let hit = self
                    .pointer_hub
                    .dispatch(self.cursor)
                    .into_iter()
                    .find(|(id, _)| Some(*id) == picker_id)
                    .map(|(_, hit)| hit);
                match hit {
                    Some(hit) => self.dispatch(Event::PointerPressed(hit)),
                    None => Task::none(),
                }
            }
            Message::WindowResized(size) => {
                self.window_size = size;
                Task::none()
            }
        };

        self.sync_picker();
        task
    }

    pub fn view(&self) -> Element<'_, Message> {
        let heading = text("Record commander").size(20).color(theme::TEXT_PRIMARY);

        let picker = column![
            search_input::view(
                self.picker.query(),
                self.picker.placeholder(),
                self.picker.is_loading()
            ),
            suggestion_list::view(&self.picker),
        ]
        .spacing(layout::DROPDOWN_GAP);

        let summary = match &self.selection {
            Some(selection) => text(format!(
                "Commander: {} ({})",
                selection.name,
                colors_label(&selection.color_identity)
            ))
            .size(14)
            .color(theme::TEXT_PRIMARY),
            None => text("No commander selected")
                .size(14)
                .color(theme::TEXT_SECONDARY),
        };

        let content = column![heading, picker, summary]
            .spacing(layout::SPACING)
            .padding(Padding::new(layout::PADDING));

        container(content)
            .width(Fill)
            .height(Fill)
            .style(theme::main_container)
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, status, _window| match event {
            iced::Event::Keyboard(kb_event) => {
                if matches!(status, event::Status::Ignored) {
                    Some(Message::KeyEvent(kb_event))
                } else {
                    // The text input captures Escape; the dropdown still needs it
                    match &kb_event {
                        keyboard::Event::KeyPressed {
                            key: keyboard::Key::Named(keyboard::key::Named::Escape),
                            ..
                        } => Some(Message::KeyEvent(kb_event)),
                        _ => None,
                    }
                }
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                Some(Message::CursorMoved(position))
            }
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                Some(Message::PointerPressed)
            }
            iced::Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
            _ => None,
        })
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    // ---- Component plumbing ----

    fn dispatch(&mut self, event: Event) -> Task<Message> {
        let action = self.picker.update(event);
        self.perform(action)
    }

    /// Turn a picker action into the async work it asks for
    fn perform(&mut self, action: Action) -> Task<Message> {
        match action {
            Action::None => Task::none(),
            Action::Schedule(handle) => {
                let (task, abort) = Task::perform(tokio::time::sleep(handle.delay()), move |_| {
                    Message::Picker(Event::DebounceElapsed(handle))
                })
                .abortable();
                // Replacing the old handle aborts the superseded sleep
                self.pending_timer = Some(abort.abort_on_drop());
                task
            }
            Action::Lookup(request) => {
                let id = request.id;
                let lookup = self.search.search(&request.query);
                let (task, abort) = Task::perform(
                    async move { lookup.await.map_err(Arc::new) },
                    move |result| Message::Picker(Event::LookupFinished { request: id, result }),
                )
                .abortable();
                self.pending_lookup = Some(abort.abort_on_drop());
                task
            }
            Action::LoadThumbnails {
                request,
                thumbnails,
            } => {
                let tasks: Vec<Task<Message>> = thumbnails
                    .into_iter()
                    .map(|(card_id, url)| {
                        let fetch = self.search.fetch_image(&url);
                        Task::perform(async move { fetch.await.map_err(Arc::new) }, move |result| {
                            Message::ThumbnailFetched {
                                request,
                                card_id: card_id.clone(),
                                result,
                            }
                        })
                    })
                    .collect();
                Task::batch(tasks)
            }
            Action::Committed(selection) => {
                self.on_commander_selected(selection);
                Task::none()
            }
        }
    }

    fn on_commander_selected(&mut self, selection: Selection) {
        tracing::info!(
            "Commander selected: {} ({})",
            selection.name,
            colors_label(&selection.color_identity)
        );
        self.selection = Some(selection);
    }

    /// Release finished tasks and refresh the hit-test bounds
    fn sync_picker(&mut self) {
        if !self.picker.timer_pending() {
            self.pending_timer = None;
        }
        if !self.picker.is_loading() {
            self.pending_lookup = None;
        }
        self.picker_bounds
            .set(layout::picker_bounds(self.window_size, &self.picker.dropdown()));
    }
}

impl Drop for State {
    fn drop(&mut self) {
        self.picker.dispose();
    }
}

/// Display form of an emitted color identity string
pub fn colors_label(color_identity: &str) -> &str {
    if color_identity.is_empty() {
        "Colorless"
    } else {
        color_identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identity_reads_colorless() {
        assert_eq!(colors_label(""), "Colorless");
        assert_eq!(colors_label("WUBG"), "WUBG");
    }
}
