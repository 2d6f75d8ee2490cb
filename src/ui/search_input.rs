use iced::widget::{row, text, text_input};
use iced::{Alignment, Element, Fill};

use crate::app::Message;
use crate::autocomplete::{Event, NavKey};
use crate::ui::theme;

/// The search input ID for focus management
pub const SEARCH_INPUT_ID: &str = "commander-search-input";

/// Build the search input widget, with a loading marker while a lookup runs
pub fn view<'a>(query: &'a str, placeholder: &'a str, loading: bool) -> Element<'a, Message> {
    let input = text_input(placeholder, query)
        .on_input(|value| Message::Picker(Event::InputChanged(value)))
        .on_submit(Message::Picker(Event::Key(NavKey::Enter)))
        .id(SEARCH_INPUT_ID)
        .padding(10)
        .size(16)
        .width(Fill)
        .style(theme::search_input);

    let indicator = text(if loading { "…" } else { " " })
        .size(16)
        .color(theme::TEXT_SECONDARY);

    row![input, indicator]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
}
