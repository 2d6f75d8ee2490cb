use iced::widget::{column, container, image, mouse_area, row, scrollable, text, Column};
use iced::{Alignment, Element, Fill, Padding};

use crate::app::Message;
use crate::autocomplete::{Autocomplete, Dropdown, Event};
use crate::ui::{layout, theme};

/// Build the dropdown area: suggestions, the "no results" notice, or nothing.
pub fn view(picker: &Autocomplete) -> Element<'_, Message> {
    match picker.dropdown() {
        Dropdown::Hidden => column![].into(),
        Dropdown::NoResults => container(
            text("No commanders found")
                .size(13)
                .color(theme::TEXT_SECONDARY),
        )
        .padding(Padding::from([10, 12]))
        .width(Fill)
        .style(theme::dropdown)
        .into(),
        Dropdown::Suggestions {
            candidates,
            selected,
        } => {
            let mut rows = Column::new().spacing(2);
            for (i, candidate) in candidates.iter().enumerate() {
                let style = if selected == Some(i) {
                    theme::result_row_selected as fn(&iced::Theme) -> container::Style
                } else {
                    theme::result_row
                };

                let name = text(&candidate.name).size(15).color(theme::TEXT_PRIMARY);
                let colors = text(format!("Colors: {}", candidate.color_identity.label()))
                    .size(12)
                    .color(theme::TEXT_SECONDARY);
                let text_column = column![name, colors].spacing(2);

                let row_content: Element<'_, Message> = match picker.thumbnail(&candidate.id) {
                    Some(handle) => row![
                        image(handle.clone())
                            .width(layout::THUMB_WIDTH)
                            .height(layout::THUMB_HEIGHT),
                        text_column
                    ]
                    .spacing(8)
                    .align_y(Alignment::Center)
                    .into(),
                    None => text_column.into(),
                };

                let row = container(row_content)
                    .padding(Padding::from([6, 12]))
                    .width(Fill)
                    .style(style);

                rows = rows.push(
                    mouse_area(row).on_press(Message::Picker(Event::CandidatePressed(i))),
                );
            }

            container(scrollable(rows).height(layout::dropdown_height(candidates.len())))
                .width(Fill)
                .style(theme::dropdown)
                .into()
        }
    }
}
