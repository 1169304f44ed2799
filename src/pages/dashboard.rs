use chrono::NaiveDate;

use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, scrollable, text};
use cosmic::Element;

use crate::components::stat_card::stat_cards;
use crate::components::task_row::task_list;
use crate::fl;
use crate::message::Message;
use crate::route::Route;
use crate::state::dashboard::DashboardState;

pub fn dashboard_view(state: &DashboardState, email: &str, today: NaiveDate) -> Element<'static, Message> {
    if state.loading {
        return container(text::body(fl!("loading")))
            .padding(32)
            .center_x(Length::Fill)
            .width(Length::Fill)
            .into();
    }

    let mut content = column()
        .spacing(16)
        .push(text::title3(fl!("dashboard-title")))
        .push(text::caption(fl!("dashboard-welcome", email = email.to_string())))
        .push(stat_cards(&state.stats));

    let recent_header = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(text::title4(fl!("dashboard-recent")).width(Length::Fill))
        .push(button::text(fl!("dashboard-view-all")).on_press(Message::Navigate(Route::Tasks)));
    content = content.push(recent_header);

    if state.recent.is_empty() {
        content = content.push(
            container(
                column()
                    .spacing(8)
                    .align_x(Alignment::Center)
                    .push(text::body(fl!("dashboard-empty")))
                    .push(
                        button::suggested(fl!("dashboard-create"))
                            .on_press(Message::Navigate(Route::NewTask)),
                    ),
            )
            .padding(32)
            .center_x(Length::Fill),
        );
    } else {
        content = content.push(task_list(state.recent.iter(), today));
    }

    container(scrollable(container(content).padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
