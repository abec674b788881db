mod config;
mod ollama;
mod select;
mod transcript;

use iced::{
    alignment, time,
    widget::{button, column, container, row, scrollable, text, text_editor},
    window, Color, Element, Font, Length, Subscription, Task, Theme,
};
use std::time::Duration;

use crate::ollama::{OllamaCli, RunOutcome};
use crate::transcript::{Speaker, Transcript};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

fn main() -> iced::Result {
    let config = config::Config::load();
    let cli = OllamaCli::new(config.ollama.binary.clone());

    // Model selection happens on the console before any window exists;
    // an empty listing exits the process inside select_model.
    let models = cli.list_models();
    let model = select::select_model(&models);

    iced::application("Ollama Chat", App::update, App::view)
        .theme(App::theme)
        .subscription(App::subscription)
        .window(window::Settings {
            size: iced::Size::new(config.window.width as f32, config.window.height as f32),
            position: window::Position::Centered,
            ..Default::default()
        })
        .default_font(Font::MONOSPACE)
        .run_with(move || App::new(cli, model))
}

#[derive(Debug, Clone)]
enum Message {
    InputEdited(text_editor::Action),
    Submit,
    TurnFinished(RunOutcome),
    Tick,
}

struct App {
    model: String,
    cli: OllamaCli,
    transcript: Transcript,
    input: text_editor::Content,
    busy: bool,
    spinner_frame: usize,
}

impl App {
    fn new(cli: OllamaCli, model: String) -> (Self, Task<Message>) {
        let app = App {
            model,
            cli,
            transcript: Transcript::default(),
            input: text_editor::Content::new(),
            busy: false,
            spinner_frame: 0,
        };

        (app, iced::widget::focus_next())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::InputEdited(action) => {
                self.input.perform(action);
                Task::none()
            }
            Message::Submit => {
                let prompt = self.input.text().trim().to_string();
                if prompt.is_empty() || self.busy {
                    return Task::none();
                }

                self.transcript.push(Speaker::User, prompt.clone());
                self.input = text_editor::Content::new();
                self.busy = true;

                let cli = self.cli.clone();
                let model = self.model.clone();

                Task::future(async move {
                    Message::TurnFinished(cli.run(&model, &prompt).await)
                })
            }
            Message::TurnFinished(outcome) => {
                // Classification follows the displayed text, not the outcome
                // variant: an entry is an error notice exactly when its text
                // contains "Error".
                let reply = outcome.display_text();
                let speaker = if reply.contains("Error") {
                    Speaker::Error
                } else {
                    Speaker::Model
                };
                self.transcript.push(speaker, reply);
                self.busy = false;
                Task::none()
            }
            Message::Tick => {
                if self.busy {
                    self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
                }
                Task::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.busy {
            time::every(Duration::from_millis(80)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn view(&self) -> Element<Message> {
        let entries = self.transcript.entries().iter().map(|entry| {
            let label = match entry.speaker {
                Speaker::User => "You",
                Speaker::Model | Speaker::Error => self.model.as_str(),
            };
            text(format!("{}: {}", label, entry.text))
                .size(15)
                .color(speaker_color(entry.speaker))
                .into()
        });

        let transcript_pane = scrollable(
            container(column(entries).spacing(10))
                .padding(15)
                .width(Length::Fill),
        )
        .height(Length::Fill)
        .anchor_bottom();

        let status: Element<Message> = if self.busy {
            text(format!(
                "{} waiting for {}...",
                SPINNER_FRAMES[self.spinner_frame], self.model
            ))
            .size(14)
            .into()
        } else {
            text("").size(14).into()
        };

        let input = text_editor(&self.input)
            .placeholder("Type your message...")
            .on_action(Message::InputEdited)
            .padding(10)
            .size(15)
            .height(Length::Fixed(90.0));

        let send = button(text("Send").size(15))
            .padding(10)
            .on_press_maybe((!self.busy).then_some(Message::Submit));

        let input_row = row![input, send]
            .spacing(10)
            .align_y(alignment::Vertical::Bottom);

        container(
            column![transcript_pane, status, input_row]
                .spacing(10)
                .padding(10),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn theme(&self) -> Theme {
        Theme::TokyoNight
    }
}

fn speaker_color(speaker: Speaker) -> Color {
    match speaker {
        Speaker::User => Color::from_rgb(0.88, 0.35, 0.35),
        Speaker::Model => Color::from_rgb(0.36, 0.78, 0.42),
        Speaker::Error => Color::from_rgb(0.95, 0.65, 0.25),
    }
}
