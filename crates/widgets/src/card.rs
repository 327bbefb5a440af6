use crate::fmt;
use dash_core::{event::Message, state::AppState, SensorField};
use dash_theme::Theme;
use iced::{
    widget::{column, container, text},
    Alignment, Border, Element, Length,
};

/// Summary card showing the latest value of one sensor channel.
///
/// Returns `None` before the first sample — callers show a loading panel
/// instead of empty cards.
#[derive(Debug)]
pub struct SensorCard {
    field: SensorField,
}

impl SensorCard {
    pub fn new(field: SensorField) -> Self {
        Self { field }
    }

    pub fn view<'a>(
        &'a self,
        state: &'a AppState,
        theme: &'a Theme,
    ) -> Option<Element<'a, Message>> {
        let sample = state.window.latest()?;
        let style = theme.card_style(self.field);
        let fs = theme.font_size;

        let content = column![
            text(self.field.label())
                .size(fs + 2.0)
                .color(style.accent.to_iced()),
            text(fmt::card_value(sample.value(self.field)))
                .size(fs * 2.6)
                .color(style.accent.to_iced()),
            text(fmt::card_unit(self.field))
                .size(fs)
                .color(style.accent.with_alpha(0.6).to_iced()),
        ]
        .spacing(fs * 0.5)
        .align_x(Alignment::Center);

        Some(
            container(content)
                .width(Length::Fill)
                .center_x(Length::Fill)
                .padding(fs * 1.6)
                .style(move |_| container::Style {
                    background: Some(style.background.to_iced().into()),
                    border: Border {
                        color: style.border.to_iced(),
                        width: 1.0,
                        radius: 10.0.into(),
                    },
                    ..container::Style::default()
                })
                .into(),
        )
    }
}
