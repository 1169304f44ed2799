use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, text};
use cosmic::{Element, theme};

use crate::message::Message;
use crate::state::toast::{ToastKind, Toasts};

/// Stack of active notifications, newest at the bottom.
pub fn toast_stack(toasts: &Toasts) -> Option<Element<'static, Message>> {
    if toasts.is_empty() {
        return None;
    }

    let mut stack = column().spacing(4).width(Length::Fill);
    for toast in toasts.iter() {
        let marker = match toast.kind {
            ToastKind::Success => "\u{2713}",
            ToastKind::Error => "\u{2717}",
            ToastKind::Info => "\u{2139}",
        };
        let line = row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body(format!("{} {}", marker, toast.text)).width(Length::Fill))
            .push(
                button::icon(icon::from_name("window-close-symbolic"))
                    .on_press(Message::DismissToast(toast.id)),
            );
        stack = stack.push(
            container(line)
                .padding([6, 12])
                .class(theme::Container::Card),
        );
    }
    Some(stack.into())
}
