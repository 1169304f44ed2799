use chrono::NaiveDate;

use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, flex_row, row, text};
use cosmic::{Element, theme};

use crate::core::task::{DATE_FORMAT, Priority, Task, TaskStatus};
use crate::fl;
use crate::message::Message;
use crate::route::Route;

// Column widths for the list layout
const COL_STATUS: f32 = 96.0;
const COL_PRI: f32 = 72.0;
const COL_DATE: f32 = 120.0;
const CARD_WIDTH: f32 = 260.0;

fn col(width: f32, content: impl Into<Element<'static, Message>>) -> Element<'static, Message> {
    container(content).width(Length::Fixed(width)).into()
}

fn priority_badge(priority: Priority) -> Element<'static, Message> {
    let class = match priority {
        Priority::High => theme::Button::Destructive,
        Priority::Medium => theme::Button::Standard,
        Priority::Low => theme::Button::Text,
    };
    button::custom(text::caption(priority.label()))
        .padding([2, 8])
        .class(class)
        .into()
}

fn status_text(status: TaskStatus) -> Element<'static, Message> {
    let label = if status.is_completed() {
        format!("\u{2713} {}", status.label())
    } else {
        status.label().to_string()
    };
    text::caption(label).into()
}

fn due_text(task: &Task, today: NaiveDate) -> Element<'static, Message> {
    match task.due_date {
        Some(due) => {
            let label = fl!("task-due", date = due.format(DATE_FORMAT).to_string());
            if task.is_overdue(today) {
                text::caption(format!("{} \u{26A0}", label)).into()
            } else {
                text::caption(label).into()
            }
        }
        None => text::caption(fl!("task-no-due")).into(),
    }
}

/// Title that opens the edit screen.
fn title_link(task: &Task) -> Element<'static, Message> {
    button::custom(text::body(task.title.clone()))
        .padding([0, 0])
        .class(theme::Button::Text)
        .on_press(Message::Navigate(Route::EditTask(task.id)))
        .into()
}

/// One line per task: title, status, priority, due date.
pub fn task_row(task: &Task, today: NaiveDate) -> Element<'static, Message> {
    let mut title_col = column().spacing(2).push(title_link(task));
    let description = task.description_text();
    if !description.is_empty() {
        title_col = title_col.push(text::caption(description.to_string()));
    }

    row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(container(title_col).width(Length::Fill))
        .push(col(COL_STATUS, status_text(task.status)))
        .push(col(COL_PRI, priority_badge(task.priority)))
        .push(col(COL_DATE, due_text(task, today)))
        .into()
}

pub fn task_list<'a>(tasks: impl Iterator<Item = &'a Task>, today: NaiveDate) -> Element<'static, Message> {
    let mut content = column().spacing(8).width(Length::Fill);
    for task in tasks {
        content = content.push(task_row(task, today));
    }
    content.into()
}

fn task_card(task: &Task, today: NaiveDate) -> Element<'static, Message> {
    let mut body = column()
        .spacing(6)
        .push(title_link(task))
        .push(
            row()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(priority_badge(task.priority))
                .push(status_text(task.status)),
        );
    let description = task.description_text();
    if !description.is_empty() {
        body = body.push(text::caption(description.to_string()));
    }
    body = body.push(due_text(task, today));

    container(body)
        .padding(12)
        .width(Length::Fixed(CARD_WIDTH))
        .class(theme::Container::Card)
        .into()
}

/// Wrapping cards, for the grid view.
pub fn task_cards<'a>(tasks: impl Iterator<Item = &'a Task>, today: NaiveDate) -> Element<'static, Message> {
    let cards: Vec<Element<'static, Message>> = tasks.map(|t| task_card(t, today)).collect();
    flex_row(cards).row_spacing(8).column_spacing(8).into()
}
