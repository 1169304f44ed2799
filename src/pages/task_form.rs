use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, dropdown, row, scrollable, text, text_input};
use cosmic::{Element, theme};

use crate::core::task::{Priority, TaskStatus};
use crate::core::validate::Field;
use crate::fl;
use crate::message::Message;
use crate::pages::field_error;
use crate::route::Route;
use crate::state::task_editor::{EditorMode, EditorPhase, TaskEditor};

const FORM_WIDTH: f32 = 520.0;

fn priority_dropdown(current: Priority, enabled: bool) -> Element<'static, Message> {
    let labels: Vec<String> = Priority::ALL.iter().map(|p| p.label().to_string()).collect();
    let selected = Priority::ALL.iter().position(|p| *p == current);
    if !enabled {
        return text::body(current.label()).into();
    }
    dropdown(labels, selected, |idx| {
        Message::FormPriority(Priority::ALL.get(idx).copied().unwrap_or_default())
    })
    .width(Length::Fill)
    .into()
}

fn status_dropdown(current: TaskStatus, enabled: bool) -> Element<'static, Message> {
    let labels: Vec<String> = TaskStatus::ALL.iter().map(|s| s.label().to_string()).collect();
    let selected = TaskStatus::ALL.iter().position(|s| *s == current);
    if !enabled {
        return text::body(current.label()).into();
    }
    dropdown(labels, selected, |idx| {
        Message::FormStatus(TaskStatus::ALL.get(idx).copied().unwrap_or_default())
    })
    .width(Length::Fill)
    .into()
}

fn delete_controls(editor: &TaskEditor) -> Option<Element<'static, Message>> {
    editor.task_id()?;

    let controls: Element<'static, Message> = match editor.phase() {
        EditorPhase::ConfirmDelete => row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body(fl!("task-delete-confirm")).width(Length::Fill))
            .push(button::standard(fl!("task-cancel")).on_press(Message::CancelDelete))
            .push(button::destructive(fl!("task-delete")).on_press(Message::ConfirmDelete))
            .into(),
        EditorPhase::Deleting => button::destructive(fl!("task-deleting")).into(),
        EditorPhase::Editing => button::destructive(fl!("task-delete"))
            .on_press(Message::RequestDelete)
            .into(),
        _ => button::destructive(fl!("task-delete")).into(),
    };
    Some(controls)
}

/// Create and edit share this form; edit adds the delete controls.
pub fn task_form_view(editor: &TaskEditor) -> Element<'_, Message> {
    if editor.is_loading() {
        return container(text::body(fl!("loading")))
            .padding(32)
            .center_x(Length::Fill)
            .width(Length::Fill)
            .into();
    }

    let editable = editor.phase() == EditorPhase::Editing;
    let form = &editor.form;
    let creating = editor.mode() == EditorMode::Create;

    let mut content = column().spacing(8).width(Length::Fixed(FORM_WIDTH));
    content = content.push(text::title3(if creating {
        fl!("task-new-title")
    } else {
        fl!("task-edit-title")
    }));

    // Title
    content = content.push(text::body(fl!("task-field-title")));
    let mut title = text_input::text_input(fl!("task-title-placeholder"), &form.title).width(Length::Fill);
    if editable {
        title = title.on_input(Message::FormTitle).on_submit(|_| Message::FormSubmit);
    }
    content = content.push(title);
    if let Some(err) = field_error(&editor.errors, Field::Title) {
        content = content.push(err);
    }

    // Description
    content = content.push(text::body(fl!("task-field-description")));
    let mut description =
        text_input::text_input(fl!("task-description-placeholder"), &form.description).width(Length::Fill);
    if editable {
        description = description.on_input(Message::FormDescription);
    }
    content = content.push(description);

    // Priority and status side by side
    content = content.push(
        row()
            .spacing(16)
            .push(
                column()
                    .spacing(4)
                    .width(Length::Fill)
                    .push(text::body(fl!("task-field-priority")))
                    .push(priority_dropdown(form.priority, editable)),
            )
            .push(
                column()
                    .spacing(4)
                    .width(Length::Fill)
                    .push(text::body(fl!("task-field-status")))
                    .push(status_dropdown(form.status, editable)),
            ),
    );

    // Due date
    content = content.push(text::body(fl!("task-field-due-date")));
    let mut due = text_input::text_input("YYYY-MM-DD", &form.due_date).width(Length::Fill);
    if editable {
        due = due.on_input(Message::FormDueDate).on_submit(|_| Message::FormSubmit);
    }
    content = content.push(due);
    if let Some(err) = field_error(&editor.errors, Field::DueDate) {
        content = content.push(err);
    }

    // Actions
    let submit_label = match (creating, editor.phase() == EditorPhase::Saving) {
        (true, false) => fl!("task-create"),
        (true, true) => fl!("task-creating"),
        (false, false) => fl!("task-save"),
        (false, true) => fl!("task-saving"),
    };
    let mut submit = button::suggested(submit_label);
    if editable {
        submit = submit.on_press(Message::FormSubmit);
    }
    let mut cancel = button::standard(fl!("task-cancel"));
    if !editor.is_busy() {
        cancel = cancel.on_press(Message::Navigate(Route::Tasks));
    }
    content = content.push(row().spacing(8).push(submit).push(cancel));

    if let Some(controls) = delete_controls(editor) {
        content = content.push(
            container(controls)
                .padding(12)
                .width(Length::Fill)
                .class(theme::Container::Card),
        );
    }

    container(scrollable(
        container(content).padding(16).center_x(Length::Fill).width(Length::Fill),
    ))
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
