use chrono::NaiveDate;

use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, dropdown, row, scrollable, text, text_input};
use cosmic::Element;

use crate::components::task_row::{task_cards, task_list};
use crate::core::filter::Choice;
use crate::core::task::{Priority, TaskStatus};
use crate::fl;
use crate::message::Message;
use crate::route::Route;
use crate::state::task_list::{EmptyState, TaskListState, ViewMode};

fn status_dropdown(current: Choice<TaskStatus>) -> Element<'static, Message> {
    let mut labels = vec![fl!("tasks-filter-all-statuses")];
    labels.extend(TaskStatus::ALL.iter().map(|s| s.label().to_string()));
    let selected = match current {
        Choice::All => 0,
        Choice::Only(s) => TaskStatus::ALL.iter().position(|x| *x == s).map_or(0, |i| i + 1),
    };
    dropdown(labels, Some(selected), |idx| {
        let choice = match idx.checked_sub(1).and_then(|i| TaskStatus::ALL.get(i)) {
            Some(status) => Choice::Only(*status),
            None => Choice::All,
        };
        Message::StatusFilter(choice)
    })
    .width(Length::Shrink)
    .into()
}

fn priority_dropdown(current: Choice<Priority>) -> Element<'static, Message> {
    let mut labels = vec![fl!("tasks-filter-all-priorities")];
    labels.extend(Priority::ALL.iter().map(|p| p.label().to_string()));
    let selected = match current {
        Choice::All => 0,
        Choice::Only(p) => Priority::ALL.iter().position(|x| *x == p).map_or(0, |i| i + 1),
    };
    dropdown(labels, Some(selected), |idx| {
        let choice = match idx.checked_sub(1).and_then(|i| Priority::ALL.get(i)) {
            Some(priority) => Choice::Only(*priority),
            None => Choice::All,
        };
        Message::PriorityFilter(choice)
    })
    .width(Length::Shrink)
    .into()
}

fn view_toggle(current: ViewMode) -> Element<'static, Message> {
    let list = if current == ViewMode::List {
        button::suggested(fl!("tasks-view-list"))
    } else {
        button::standard(fl!("tasks-view-list"))
    }
    .on_press(Message::SetViewMode(ViewMode::List));

    let grid = if current == ViewMode::Grid {
        button::suggested(fl!("tasks-view-grid"))
    } else {
        button::standard(fl!("tasks-view-grid"))
    }
    .on_press(Message::SetViewMode(ViewMode::Grid));

    row().spacing(4).push(list).push(grid).into()
}

pub fn tasks_view(state: &TaskListState, today: NaiveDate) -> Element<'static, Message> {
    let header = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(text::title3(fl!("tasks-title")).width(Length::Fill))
        .push(
            button::suggested(fl!("nav-new-task"))
                .on_press(Message::Navigate(Route::NewTask)),
        );

    let filters = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(
            text_input::text_input(fl!("tasks-search"), state.criteria.search_query.clone())
                .on_input(Message::SearchChanged)
                .width(Length::Fill),
        )
        .push(status_dropdown(state.criteria.status))
        .push(priority_dropdown(state.criteria.priority))
        .push(view_toggle(state.view_mode));

    let mut content = column().spacing(12).push(header).push(filters);

    if state.loading {
        content = content.push(
            container(text::body(fl!("loading")))
                .padding(32)
                .center_x(Length::Fill),
        );
    } else {
        let visible = state.visible();
        match state.empty_state(&visible) {
            Some(EmptyState::NoTasks) => {
                content = content.push(
                    container(
                        column()
                            .spacing(8)
                            .align_x(Alignment::Center)
                            .push(text::body(fl!("tasks-empty")))
                            .push(
                                button::suggested(fl!("dashboard-create"))
                                    .on_press(Message::Navigate(Route::NewTask)),
                            ),
                    )
                    .padding(32)
                    .center_x(Length::Fill),
                );
            }
            Some(EmptyState::NoMatches) => {
                content = content.push(
                    container(text::body(fl!("tasks-no-matches")))
                        .padding(32)
                        .center_x(Length::Fill),
                );
            }
            None => {
                let list = match state.view_mode {
                    ViewMode::List => task_list(visible.iter(), today),
                    ViewMode::Grid => task_cards(visible.iter(), today),
                };
                content = content.push(list);
            }
        }
    }

    container(scrollable(container(content).padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
