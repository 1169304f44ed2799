use cosmic::iced::Length;
use cosmic::widget::{column, container, flex_row, text};
use cosmic::{Element, theme};

use crate::core::stats::TaskStats;
use crate::fl;
use crate::message::Message;

const CARD_WIDTH: f32 = 150.0;

fn stat_card(label: String, value: usize) -> Element<'static, Message> {
    container(
        column()
            .spacing(4)
            .push(text::caption(label))
            .push(text::title3(value.to_string())),
    )
    .padding(12)
    .width(Length::Fixed(CARD_WIDTH))
    .class(theme::Container::Card)
    .into()
}

/// The five dashboard counters.
pub fn stat_cards(stats: &TaskStats) -> Element<'static, Message> {
    let cards = vec![
        stat_card(fl!("stat-total"), stats.total),
        stat_card(fl!("stat-pending"), stats.pending),
        stat_card(fl!("stat-in-progress"), stats.in_progress),
        stat_card(fl!("stat-completed"), stats.completed),
        stat_card(fl!("stat-overdue"), stats.overdue),
    ];
    flex_row(cards).row_spacing(8).column_spacing(8).into()
}
