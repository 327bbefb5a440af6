//! Dashboard window for `dash`.
//!
//! Owns the Iced application loop and wires together all background tasks:
//! - HTTP sample poller (1-second cadence by default)
//! - Config file watcher (live reload on change)

use dash_config::{default_path, load as load_config, ConfigWatcher, DashConfig};
use dash_core::{event::Message as AppMessage, AppState, SensorField, SeriesWindow};
use dash_poller::{HttpSource, PollOutcome};
use dash_theme::{Theme, ThemeMode};
use dash_widgets::{SensorCard, SensorChart};
use futures::channel::mpsc::Sender;
use iced::{
    widget::{button, column, container, row, scrollable, space::horizontal as horizontal_space, text},
    Alignment, Border, Element, Length, Size, Subscription, Task,
};
use std::time::Duration;
use tracing::{debug, info, warn};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Open the dashboard window.  Returns when the window is closed.
pub fn run() -> iced::Result {
    let config = load_config(default_path()).unwrap_or_default();
    let size = Size::new(config.global.width, config.global.height);

    iced::application(Dashboard::new, Dashboard::update, Dashboard::view)
        .title(Dashboard::title)
        .subscription(Dashboard::subscription)
        .style(Dashboard::style)
        .window_size(size)
        .run()
}

// ── Message ───────────────────────────────────────────────────────────────────

/// Top-level application messages.
#[derive(Debug, Clone)]
pub enum Message {
    /// Propagate a core event-bus message.
    App(AppMessage),
}

// ── State ─────────────────────────────────────────────────────────────────────

struct Dashboard {
    state:  AppState,
    config: DashConfig,
    theme:  Theme,
    cards:  Vec<SensorCard>,
    charts: Vec<SensorChart>,
}

impl Dashboard {
    fn new() -> (Self, Task<Message>) {
        let config = load_config(default_path()).unwrap_or_default();
        let mode = ThemeMode::from_config(&config.theme.mode);
        let theme = Theme::from_config(&config.theme, mode);

        let state = AppState {
            window: SeriesWindow::new(config.window.capacity),
            ..AppState::default()
        };

        let dashboard = Self {
            state,
            config,
            theme,
            cards:  SensorField::ALL.map(SensorCard::new).into_iter().collect(),
            charts: SensorField::ALL.map(SensorChart::new).into_iter().collect(),
        };

        (dashboard, Task::none())
    }

    fn title(&self) -> String {
        self.config.global.title.clone()
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::App(msg) => self.handle_app(msg),
        }
    }

    fn handle_app(&mut self, msg: AppMessage) -> Task<Message> {
        match msg {
            AppMessage::SampleReceived(sample) => {
                self.state.record_sample(sample);
            }
            AppMessage::PollFailed(reason) => {
                // Already logged at warn by the poller; keep the display stale.
                debug!("displaying stale data: {reason}");
                self.state.record_failure();
            }
            AppMessage::ThemeToggled => {
                let mode = self.theme.mode.toggle();
                self.theme = Theme::from_config(&self.config.theme, mode);
            }
            AppMessage::ConfigReloaded => match load_config(default_path()) {
                Ok(cfg) => {
                    info!("Config reloaded");
                    if cfg.source.url != self.config.source.url
                        || cfg.source.interval_ms != self.config.source.interval_ms
                    {
                        warn!("[source] changed — restart to apply the new endpoint");
                    }
                    self.state.window.set_capacity(cfg.window.capacity);
                    // Keep the user's current dark/light choice across reloads.
                    self.theme = Theme::from_config(&cfg.theme, self.theme.mode);
                    self.config = cfg;
                }
                Err(e) => warn!("Config reload failed: {e}"),
            },
        }
        Task::none()
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let fs = self.theme.font_size;

        let body: Element<'_, Message> = if self.state.is_loading() {
            container(
                text("Loading sensor data…")
                    .size(fs * 1.6)
                    .color(self.theme.text_dim.to_iced()),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
        } else {
            let cards = row(self
                .cards
                .iter()
                .filter_map(|card| card.view(&self.state, &self.theme))
                .map(|card| {
                    container(card.map(Message::App))
                        .width(Length::FillPortion(1))
                        .into()
                }))
            .spacing(fs);

            let charts = column(
                self.charts
                    .iter()
                    .map(|chart| chart.view(&self.state, &self.theme).map(Message::App)),
            )
            .spacing(fs);

            scrollable(column![cards, charts].spacing(fs))
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        };

        container(column![self.view_header(), body].spacing(fs))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(fs * 1.4)
            .into()
    }

    fn view_header(&self) -> Element<'_, Message> {
        let fs = self.theme.font_size;
        let accent = self.theme.rpm;

        let toggle_icon = match self.theme.mode {
            ThemeMode::Dark => "☀",
            ThemeMode::Light => "☾",
        };
        let toggle = button(text(toggle_icon).size(fs + 2.0))
            .on_press(Message::App(AppMessage::ThemeToggled))
            .style(move |_, _| button::Style {
                background: Some(accent.with_alpha(0.12).to_iced().into()),
                text_color: accent.to_iced(),
                border: Border {
                    radius: 8.0.into(),
                    ..Border::default()
                },
                ..button::Style::default()
            });

        let mut header = row![
            text(&self.config.global.title)
                .size(fs * 1.8)
                .color(self.theme.text.to_iced()),
            horizontal_space(),
        ]
        .spacing(fs)
        .align_y(Alignment::Center);

        if self.state.is_stale() {
            header = header.push(
                text(format!("stale ×{}", self.state.failed_polls))
                    .size(fs)
                    .color(self.theme.temperature.to_iced()),
            );
        }

        header.push(toggle).into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            Subscription::run(sample_stream),
            Subscription::run(config_stream),
        ])
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: self.theme.background.to_iced(),
            text_color: self.theme.text.to_iced(),
        }
    }
}

// ── Subscription streams ──────────────────────────────────────────────────────
//
// Each free function acts as both the stream builder AND the unique identity
// key for `Subscription::run(fn_ptr)`.  Iced uses the function pointer address
// to deduplicate subscriptions across redraws.

/// Polls the configured endpoint and forwards each tick's outcome.
///
/// Dropping this stream (window teardown) drops the outcome receiver,
/// which stops the poll task — no further fetches fire afterwards.
fn sample_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(8, |mut sender: Sender<Message>| async move {
        let config = load_config(default_path()).unwrap_or_default();
        info!(
            "Polling {} every {} ms",
            config.source.url, config.source.interval_ms
        );

        let source = HttpSource::new(config.source.url);
        let (_poller, mut rx) = dash_poller::spawn(source, config.source.interval_ms);

        while let Some(outcome) = rx.recv().await {
            let msg = match outcome {
                PollOutcome::Sample(sample) => AppMessage::SampleReceived(sample),
                PollOutcome::Failed(reason) => AppMessage::PollFailed(reason),
            };
            let _ = sender.try_send(Message::App(msg));
        }

        // Poll task exited — shouldn't happen; stall rather than crash.
        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

/// Watches the config file for writes and sends `ConfigReloaded`.
fn config_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (_watcher, mut rx) = ConfigWatcher::spawn(default_path());

        while rx.recv().await.is_some() {
            let _ = sender.try_send(Message::App(AppMessage::ConfigReloaded));
        }

        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}
