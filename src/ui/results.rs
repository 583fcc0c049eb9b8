//! Converted files, size statistics and download actions
use iced::widget::{button, column, container, row, text, Column};
use iced::{Alignment, Element, Length};

use image_converter::stats::{aggregate_savings, format_file_size, format_percent};
use image_converter::ConversionResult;

use crate::Message;

/// Aggregate savings, a bulk download button and one row per result
pub fn view<'a>(results: &'a [ConversionResult]) -> Element<'a, Message> {
    let summary = text(format!(
        "Average size reduction: {}",
        format_percent(aggregate_savings(results))
    ))
    .size(16);

    let download_label = if results.len() == 1 {
        "Download".to_string()
    } else {
        format!("Download ZIP ({} files)", results.len())
    };
    let download_all = button(text(download_label))
        .on_press(Message::DownloadAll)
        .padding(10);

    // A lone result is already covered by the bulk button
    let show_item_buttons = results.len() > 1;

    let rows = results.iter().enumerate().map(|(index, result)| -> Element<'a, Message> {
        let mut line = row![
            column![
                text(&result.name).size(15),
                text(format!(
                    "{} → {} · {} → {}",
                    result.original_format,
                    result.output_format.spec().label,
                    format_file_size(result.original_size),
                    format_file_size(result.converted_size),
                ))
                .size(12),
            ]
            .width(Length::Fill),
            text(format_percent(result.savings_percent())).size(14),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        if show_item_buttons {
            line = line.push(button(text("Save")).on_press(Message::Download(index)));
        }
        line.into()
    });

    container(
        column![
            text(format!("Converted Images ({})", results.len())).size(20),
            summary,
            download_all,
            Column::with_children(rows).spacing(8),
        ]
        .spacing(12),
    )
    .width(Length::Fill)
    .padding(12)
    .into()
}
