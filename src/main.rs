use iced::widget::{button, column, container, progress_bar, row, scrollable, text, Column};
use iced::{event, window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use image_converter::convert::{pipeline, ConversionReport, Converter, PipelineEvent};
use image_converter::settings::{Settings, DEFAULT_LOG_FILTER};
use image_converter::{archive, files, DownloadArtifact, Selection, SourceFile, TargetFormat};

mod ui;

/// Extensions offered by the file picker (mirrors the MIME allow-list)
const PICKER_EXTENSIONS: [&str; 9] = ["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "svg"];

/// Main application state
struct ImageConverter {
    settings: Settings,
    converter: Converter,
    /// Selected files, their target formats and the last results
    selection: Selection,
    /// Outcome of the last batch (for the "X of N converted" line)
    report: Option<ConversionReport>,
    is_converting: bool,
    /// 0-100, rounded
    progress: u8,
    /// Files are being dragged over the window
    drag_over: bool,
    /// Bumped whenever a new selection starts; stale drop loads are ignored
    drop_generation: u64,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Select Images"
    PickFiles,
    /// User clicked "Add Folder"
    PickFolder,
    /// Picked files finished loading
    FilesLoaded(Vec<SourceFile>),
    FileHovered,
    FilesHoveredLeft,
    /// One file of a drag-and-drop gesture
    FileDropped(PathBuf),
    /// A dropped path finished loading
    DropLoaded {
        generation: u64,
        sources: Vec<SourceFile>,
    },
    FormatChanged(usize, TargetFormat),
    ConvertAll,
    Pipeline(PipelineEvent),
    /// Save a single result by index
    Download(usize),
    /// Save the only result, or all of them as one ZIP
    DownloadAll,
    Saved(Result<PathBuf, String>),
}

impl ImageConverter {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::default();
        info!("🎨 Image Converter ready (default format: {})", settings.default_format);

        (
            ImageConverter {
                converter: Converter::from_settings(&settings),
                selection: Selection::new(settings.default_format),
                settings,
                report: None,
                is_converting: false,
                progress: 0,
                drag_over: false,
                drop_generation: 0,
                status: "Select images or drop them into this window.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFiles => {
                if self.is_converting {
                    return Task::none();
                }

                let picked = FileDialog::new()
                    .set_title("Select Images")
                    .add_filter("Images", &PICKER_EXTENSIONS)
                    .pick_files();

                match picked {
                    Some(paths) => {
                        self.status = format!("Loading {} files...", paths.len());
                        Task::perform(files::load_sources(paths), Message::FilesLoaded)
                    }
                    None => Task::none(),
                }
            }
            Message::PickFolder => {
                if self.is_converting {
                    return Task::none();
                }

                match FileDialog::new().set_title("Select Folder with Images").pick_folder() {
                    Some(folder) => {
                        self.status = format!("Scanning {}...", folder.display());
                        Task::perform(files::load_sources(vec![folder]), Message::FilesLoaded)
                    }
                    None => Task::none(),
                }
            }
            Message::FilesLoaded(sources) => {
                if self.is_converting {
                    warn!("⚠️  Ignoring {} loaded files: conversion in progress", sources.len());
                    return Task::none();
                }

                self.drop_generation += 1;
                let accepted = self.selection.replace(sources);
                self.report = None;
                self.progress = 0;
                self.status = format!("{} images selected.", accepted);
                Task::none()
            }
            Message::FileHovered => {
                self.drag_over = true;
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.drag_over = false;
                Task::none()
            }
            Message::FileDropped(path) => {
                // The first file of a gesture starts a new selection
                let starts_batch = std::mem::take(&mut self.drag_over);
                if self.is_converting {
                    return Task::none();
                }

                if starts_batch {
                    self.drop_generation += 1;
                    self.selection.replace(Vec::new());
                    self.report = None;
                    self.progress = 0;
                }

                self.status = format!("Loading {}...", path.display());
                let generation = self.drop_generation;
                Task::perform(files::load_sources(vec![path]), move |sources| {
                    Message::DropLoaded { generation, sources }
                })
            }
            Message::DropLoaded { generation, sources } => {
                if self.is_converting || generation != self.drop_generation {
                    debug!(generation, current = self.drop_generation, "Discarding stale drop");
                    return Task::none();
                }

                self.selection.extend(sources);
                self.report = None;
                self.progress = 0;
                self.status = format!("{} images selected.", self.selection.len());
                Task::none()
            }
            Message::FormatChanged(index, format) => {
                if !self.is_converting {
                    self.selection.set_format(index, format);
                }
                Task::none()
            }
            Message::ConvertAll => {
                if self.is_converting || self.selection.is_empty() {
                    return Task::none();
                }

                self.is_converting = true;
                self.progress = 0;
                self.report = None;
                self.status = format!("Converting {} images...", self.selection.len());

                let requests = self.selection.requests();
                Task::run(pipeline::run(requests, self.converter), Message::Pipeline)
            }
            Message::Pipeline(PipelineEvent::Progress(progress)) => {
                self.progress = progress.percent();
                Task::none()
            }
            Message::Pipeline(PipelineEvent::Finished(mut report)) => {
                self.is_converting = false;
                self.status = format!("✅ Converted {} of {} images.", report.succeeded(), report.total);
                self.selection.set_results(std::mem::take(&mut report.results));
                self.report = Some(report);
                Task::none()
            }
            Message::Download(index) => {
                let Some(result) = self.selection.results().get(index) else {
                    return Task::none();
                };
                let artifact = DownloadArtifact::single(result);
                self.save(artifact)
            }
            Message::DownloadAll => {
                match archive::package(self.selection.results(), &self.settings.archive_name) {
                    Ok(Some(artifact)) => self.save(artifact),
                    Ok(None) => Task::none(),
                    Err(e) => {
                        warn!("⚠️  Failed to build archive: {}", e);
                        self.status = format!("Failed to build archive: {}", e);
                        Task::none()
                    }
                }
            }
            Message::Saved(Ok(path)) => {
                self.status = format!("💾 Saved {}", path.display());
                Task::none()
            }
            Message::Saved(Err(e)) => {
                warn!("⚠️  {}", e);
                self.status = e;
                Task::none()
            }
        }
    }

    /// Ask where to save an artifact, then write it in the background
    fn save(&mut self, artifact: DownloadArtifact) -> Task<Message> {
        let mut dialog = FileDialog::new()
            .set_title("Save As")
            .set_file_name(artifact.file_name.as_str());
        if let Some(dir) = &self.settings.save_dir {
            dialog = dialog.set_directory(dir);
        }

        match dialog.save_file() {
            Some(path) => {
                self.status = format!("Saving {}...", artifact.file_name);
                Task::perform(files::save_artifact(artifact, path), Message::Saved)
            }
            None => Task::none(),
        }
    }

    /// Drag-and-drop events from the window
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let idle = !self.is_converting;

        let pickers = row![
            button("Select Images")
                .on_press_maybe(idle.then_some(Message::PickFiles))
                .padding(10),
            button("Add Folder")
                .on_press_maybe(idle.then_some(Message::PickFolder))
                .padding(10),
        ]
        .spacing(12);

        let drop_hint = if self.drag_over {
            "Release to select these files"
        } else {
            "Supports PNG, JPEG, GIF, BMP, WebP, TIFF and SVG"
        };

        let mut content: Column<Message> = column![
            text("Image Converter").size(40),
            pickers,
            text(drop_hint).size(14),
        ]
        .spacing(16)
        .padding(32)
        .align_x(Alignment::Center);

        if !self.selection.is_empty() {
            content = content.push(ui::file_list::view(&self.selection, self.is_converting));

            let label = if self.is_converting { "Converting..." } else { "Convert All" };
            content = content.push(
                button(label)
                    .on_press_maybe(idle.then_some(Message::ConvertAll))
                    .padding(10),
            );
        }

        if self.is_converting {
            content = content.push(
                column![
                    text(format!("{}%", self.progress)).size(16),
                    progress_bar(0.0..=100.0, f32::from(self.progress)),
                ]
                .spacing(6),
            );
        }

        if !self.selection.results().is_empty() {
            content = content.push(ui::results::view(self.selection.results()));
        }

        if let Some(report) = &self.report {
            if !report.failures.is_empty() {
                let failed = report
                    .failures
                    .iter()
                    .map(|f| f.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                content = content.push(text(format!("Could not convert: {}", failed)).size(14));
            }
        }

        content = content.push(text(&self.status).size(14));

        container(scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Log to stderr, honoring `RUST_LOG`
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> iced::Result {
    init_logging();

    iced::application("Image Converter", ImageConverter::update, ImageConverter::view)
        .subscription(ImageConverter::subscription)
        .theme(ImageConverter::theme)
        .centered()
        .run_with(ImageConverter::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(names: &[&str]) -> Vec<SourceFile> {
        names.iter().map(|n| SourceFile::new(*n, vec![0u8; 4])).collect()
    }

    fn names(app: &ImageConverter) -> Vec<&str> {
        app.selection.files().iter().map(SourceFile::name).collect()
    }

    #[test]
    fn test_loaded_files_ignored_while_converting() {
        let (mut app, _) = ImageConverter::new();
        let _ = app.update(Message::FilesLoaded(sources(&["a.png", "b.png"])));
        let _ = app.update(Message::ConvertAll);
        assert!(app.is_converting);

        let _ = app.update(Message::FilesLoaded(sources(&["c.png"])));
        assert_eq!(names(&app), vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_drop_gesture_replaces_then_extends() {
        let (mut app, _) = ImageConverter::new();
        let _ = app.update(Message::FilesLoaded(sources(&["old.png"])));

        let _ = app.update(Message::FileHovered);
        let _ = app.update(Message::FileDropped(PathBuf::from("a.png")));
        assert!(app.selection.is_empty());
        let generation = app.drop_generation;

        let _ = app.update(Message::FileDropped(PathBuf::from("b.png")));
        assert_eq!(app.drop_generation, generation);

        let _ = app.update(Message::DropLoaded { generation, sources: sources(&["a.png"]) });
        let _ = app.update(Message::DropLoaded { generation, sources: sources(&["b.png"]) });
        assert_eq!(names(&app), vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_stale_drop_discarded() {
        let (mut app, _) = ImageConverter::new();
        let _ = app.update(Message::FileHovered);
        let _ = app.update(Message::FileDropped(PathBuf::from("a.png")));
        let stale = app.drop_generation;

        let _ = app.update(Message::FilesLoaded(sources(&["picked.png"])));
        let _ = app.update(Message::DropLoaded { generation: stale, sources: sources(&["a.png"]) });

        assert_eq!(names(&app), vec!["picked.png"]);
    }
}
