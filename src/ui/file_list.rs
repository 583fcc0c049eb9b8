//! Selected files with a per-file format picker
use iced::widget::{column, container, pick_list, row, text, Column};
use iced::{Alignment, Element, Length};

use image_converter::stats::format_file_size;
use image_converter::{Selection, TargetFormat};

use crate::Message;

/// One row per selected file: name, size and target format
pub fn view<'a>(selection: &'a Selection, locked: bool) -> Element<'a, Message> {
    let rows = selection
        .files()
        .iter()
        .zip(selection.formats())
        .enumerate()
        .map(|(index, (file, format))| -> Element<'a, Message> {
            // Formats can't change mid-batch
            let picker: Element<'a, Message> = if locked {
                text(format.to_string()).size(14).into()
            } else {
                pick_list(TargetFormat::ALL, Some(*format), move |f| {
                    Message::FormatChanged(index, f)
                })
                .width(Length::Fixed(110.0))
                .into()
            };

            row![
                column![
                    text(file.name()).size(15),
                    text(format_file_size(file.size())).size(12),
                ]
                .width(Length::Fill),
                text("→").size(15),
                picker,
            ]
            .spacing(12)
            .align_y(Alignment::Center)
            .into()
        });

    let header = text(format!(
        "Selected Files ({}) · {}",
        selection.len(),
        format_file_size(selection.total_size())
    ))
    .size(20);

    container(column![header, Column::with_children(rows).spacing(8)].spacing(12))
        .width(Length::Fill)
        .padding(12)
        .into()
}
