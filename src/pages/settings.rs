use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, scrollable, text, text_input};
use cosmic::Element;

use crate::config::TaskFlowConfig;
use crate::fl;
use crate::message::Message;
use crate::route::Route;
use crate::session::AppContext;

const FORM_WIDTH: f32 = 520.0;

pub fn settings_view<'a>(
    config: &'a TaskFlowConfig,
    context: &'a AppContext,
    url_input: &'a str,
    anon_key_input: &'a str,
) -> Element<'a, Message> {
    let mut content = column().spacing(12).width(Length::Fixed(FORM_WIDTH));

    content = content.push(text::title3(fl!("settings-title")));

    // --- Backend ---
    content = content.push(text::title4(fl!("settings-backend")));
    content = content.push(
        text_input::text_input(fl!("settings-backend-url"), url_input)
            .on_input(Message::SettingsUrlChanged)
            .width(Length::Fill),
    );
    content = content.push(
        text_input::secure_input(
            fl!("settings-anon-key"),
            anon_key_input.to_string(),
            None::<Message>,
            true,
        )
        .on_input(Message::SettingsAnonKeyChanged)
        .on_submit(|_| Message::SaveBackendSettings)
        .width(Length::Fill),
    );
    content = content.push(
        button::suggested(fl!("settings-save")).on_press(Message::SaveBackendSettings),
    );

    // --- Appearance ---
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body(fl!("settings-theme-dark")).width(Length::Fill))
            .push(
                cosmic::widget::toggler(context.theme().is_dark())
                    .on_toggle(|_| Message::ToggleTheme),
            ),
    );

    // --- Debug logging ---
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body(fl!("settings-debug-logging")).width(Length::Fill))
            .push(
                cosmic::widget::toggler(config.debug_logging)
                    .on_toggle(|_| Message::ToggleDebugLogging),
            ),
    );

    // --- Account ---
    let back = match context.session() {
        Some(session) => {
            content = content.push(text::caption(fl!(
                "settings-signed-in-as",
                email = session.email().to_string()
            )));
            Route::Dashboard
        }
        None => Route::Login,
    };
    content = content.push(button::standard(fl!("settings-back")).on_press(Message::Navigate(back)));

    container(scrollable(
        container(content).padding(16).center_x(Length::Fill).width(Length::Fill),
    ))
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
