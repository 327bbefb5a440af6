use crate::fmt;
use chrono::{DateTime, Local};
use dash_core::{event::Message, state::AppState, SensorField, SeriesWindow};
use dash_theme::{ChartStyle, Theme};
use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path, Stroke};
use iced::widget::{column, container, row, text};
use iced::widget::space::horizontal as horizontal_space;
use iced::{mouse, Alignment, Border, Element, Length, Point, Rectangle, Renderer};

/// At most this many x-axis time labels before thinning.
const MAX_X_LABELS: usize = 6;
/// Horizontal gridline count (plus the zero baseline).
const Y_TICKS: usize = 4;
/// Plot margins; the left one reserves room for y tick labels.
const MARGIN_LEFT: f32 = 58.0;
const MARGIN_RIGHT: f32 = 14.0;
const MARGIN_TOP: f32 = 10.0;
const MARGIN_BOTTOM: f32 = 26.0;
/// Plot height in logical pixels.
const PLOT_HEIGHT: f32 = 240.0;

/// Line chart of one channel over the full sample window.
///
/// Header shows the channel name and the latest reading; the canvas below
/// draws the trace with an area fill, zero-based y axis and a hover
/// crosshair with a unit-aware readout.
#[derive(Debug)]
pub struct SensorChart {
    field: SensorField,
}

impl SensorChart {
    pub fn new(field: SensorField) -> Self {
        Self { field }
    }

    pub fn view<'a>(&'a self, state: &'a AppState, theme: &'a Theme) -> Element<'a, Message> {
        let style = theme.chart_style(self.field);
        let fs = theme.font_size;

        let latest = state
            .window
            .latest()
            .map(|s| fmt::tick_label(self.field, s.value(self.field)))
            .unwrap_or_else(|| "—".to_string());

        let header = row![
            text(self.field.label())
                .size(fs + 2.0)
                .color(style.accent.to_iced()),
            horizontal_space(),
            text(latest).size(fs * 1.7).color(theme.text.to_iced()),
        ]
        .align_y(Alignment::Center);

        let plot = Canvas::new(ChartProgram {
            field: self.field,
            window: &state.window,
            style,
            time_format: &theme.time_format,
            font_size: fs,
        })
        .width(Length::Fill)
        .height(Length::Fixed(PLOT_HEIGHT));

        container(column![header, plot].spacing(fs * 0.8))
            .width(Length::Fill)
            .padding(fs * 1.2)
            .style(move |_| container::Style {
                background: Some(style.background.to_iced().into()),
                border: Border {
                    radius: 10.0.into(),
                    ..Border::default()
                },
                ..container::Style::default()
            })
            .into()
    }
}

struct ChartProgram<'a> {
    field: SensorField,
    window: &'a SeriesWindow,
    style: ChartStyle,
    time_format: &'a str,
    font_size: f32,
}

impl ChartProgram<'_> {
    fn label_text(&self, content: String, position: Point) -> canvas::Text {
        canvas::Text {
            content,
            position,
            color: self.style.labels.to_iced(),
            size: (self.font_size - 3.0).into(),
            ..canvas::Text::default()
        }
    }
}

impl canvas::Program<Message> for ChartProgram<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        let values: Vec<f64> = self.window.values(self.field).collect();
        let timestamps: Vec<DateTime<Local>> = self.window.timestamps().collect();
        if values.is_empty() {
            return vec![frame.into_geometry()];
        }

        let plot = Rectangle {
            x: MARGIN_LEFT,
            y: MARGIN_TOP,
            width: (frame.width() - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (frame.height() - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        };

        // Zero-based y axis with 10% headroom over the window maximum.
        let peak = values.iter().copied().fold(0.0_f64, f64::max);
        let y_max = if peak > 0.0 { peak * 1.1 } else { 1.0 };

        let n = values.len();
        let dx = if n > 1 {
            plot.width / (n - 1) as f32
        } else {
            0.0
        };
        let x_at = |i: usize| plot.x + dx * i as f32;
        let y_at = |v: f64| plot.y + plot.height * (1.0 - (v / y_max) as f32);
        let baseline = plot.y + plot.height;

        // ── Grid + y tick labels ──────────────────────────────────────────────
        for k in 0..=Y_TICKS {
            let value = y_max * k as f64 / Y_TICKS as f64;
            let y = y_at(value);
            frame.stroke(
                &Path::line(Point::new(plot.x, y), Point::new(plot.x + plot.width, y)),
                Stroke::default()
                    .with_width(1.0)
                    .with_color(self.style.grid.to_iced()),
            );
            frame.fill_text(canvas::Text {
                align_x: iced::widget::text::Alignment::Right,
                align_y: iced::alignment::Vertical::Center,
                ..self.label_text(
                    fmt::tick_label(self.field, value),
                    Point::new(plot.x - 8.0, y),
                )
            });
        }

        // ── X time labels (thinned to at most MAX_X_LABELS) ───────────────────
        let step = n.div_ceil(MAX_X_LABELS).max(1);
        for i in (0..n).step_by(step) {
            frame.fill_text(canvas::Text {
                align_x: iced::widget::text::Alignment::Center,
                align_y: iced::alignment::Vertical::Top,
                ..self.label_text(
                    timestamps[i].format(self.time_format).to_string(),
                    Point::new(x_at(i), baseline + 8.0),
                )
            });
        }

        // ── Area fill + trace ─────────────────────────────────────────────────
        if n > 1 {
            let area = Path::new(|b| {
                b.move_to(Point::new(x_at(0), baseline));
                for (i, v) in values.iter().enumerate() {
                    b.line_to(Point::new(x_at(i), y_at(*v)));
                }
                b.line_to(Point::new(x_at(n - 1), baseline));
                b.close();
            });
            frame.fill(&area, self.style.fill.to_iced());

            let trace = Path::new(|b| {
                b.move_to(Point::new(x_at(0), y_at(values[0])));
                for (i, v) in values.iter().enumerate().skip(1) {
                    b.line_to(Point::new(x_at(i), y_at(*v)));
                }
            });
            frame.stroke(
                &trace,
                Stroke::default()
                    .with_width(2.5)
                    .with_color(self.style.accent.to_iced()),
            );
        } else {
            frame.fill(
                &Path::circle(Point::new(x_at(0), y_at(values[0])), 3.0),
                self.style.accent.to_iced(),
            );
        }

        // ── Hover crosshair + readout ─────────────────────────────────────────
        if let Some(pos) = cursor.position_in(bounds) {
            if pos.x >= plot.x && pos.x <= plot.x + plot.width {
                let i = if n > 1 {
                    (((pos.x - plot.x) / dx).round() as usize).min(n - 1)
                } else {
                    0
                };
                let px = x_at(i);

                frame.stroke(
                    &Path::line(Point::new(px, plot.y), Point::new(px, baseline)),
                    Stroke::default()
                        .with_width(1.0)
                        .with_color(self.style.labels.with_alpha(0.5).to_iced()),
                );
                frame.fill(
                    &Path::circle(Point::new(px, y_at(values[i])), 4.0),
                    self.style.accent.to_iced(),
                );

                let readout = format!(
                    "{}  ·  {}",
                    fmt::hover_label(self.field, values[i]),
                    timestamps[i].format(self.time_format),
                );
                let on_left = px > plot.x + plot.width / 2.0;
                frame.fill_text(canvas::Text {
                    align_x: if on_left {
                        iced::widget::text::Alignment::Right
                    } else {
                        iced::widget::text::Alignment::Left
                    },
                    align_y: iced::alignment::Vertical::Top,
                    ..self.label_text(
                        readout,
                        Point::new(if on_left { px - 10.0 } else { px + 10.0 }, plot.y + 2.0),
                    )
                });
            }
        }

        vec![frame.into_geometry()]
    }
}
