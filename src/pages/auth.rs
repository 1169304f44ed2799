use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, text, text_input};
use cosmic::Element;

use crate::core::validate::Field;
use crate::fl;
use crate::message::Message;
use crate::pages::field_error;
use crate::route::Route;
use crate::state::auth_form::{AuthForm, AuthMode};

const FORM_WIDTH: f32 = 360.0;

/// Sign-in and registration share one layout; the mode decides the extras.
pub fn auth_view(form: &AuthForm) -> Element<'_, Message> {
    let sign_up = form.mode == AuthMode::SignUp;
    let mut content = column().spacing(8).width(Length::Fixed(FORM_WIDTH));

    content = content.push(text::title3(if sign_up {
        fl!("register-title")
    } else {
        fl!("login-title")
    }));

    content = content.push(text::body(fl!("field-email")));
    let mut email = text_input::text_input("you@example.com", &form.email).width(Length::Fill);
    if !form.submitting {
        email = email
            .on_input(Message::AuthEmailChanged)
            .on_submit(|_| Message::AuthSubmit);
    }
    content = content.push(email);
    if let Some(err) = field_error(&form.errors, Field::Email) {
        content = content.push(err);
    }

    content = content.push(text::body(fl!("field-password")));
    let mut password = text_input::secure_input("", form.password.clone(), None::<Message>, true)
        .width(Length::Fill);
    if !form.submitting {
        password = password
            .on_input(Message::AuthPasswordChanged)
            .on_submit(|_| Message::AuthSubmit);
    }
    content = content.push(password);
    if let Some(err) = field_error(&form.errors, Field::Password) {
        content = content.push(err);
    }

    if sign_up {
        content = content.push(text::body(fl!("field-confirm-password")));
        let mut confirm =
            text_input::secure_input("", form.confirm_password.clone(), None::<Message>, true)
                .width(Length::Fill);
        if !form.submitting {
            confirm = confirm
                .on_input(Message::AuthConfirmChanged)
                .on_submit(|_| Message::AuthSubmit);
        }
        content = content.push(confirm);
        if let Some(err) = field_error(&form.errors, Field::ConfirmPassword) {
            content = content.push(err);
        }
    }

    let label = match (sign_up, form.submitting) {
        (false, false) => fl!("login-submit"),
        (false, true) => fl!("login-submitting"),
        (true, false) => fl!("register-submit"),
        (true, true) => fl!("register-submitting"),
    };
    let mut submit = button::suggested(label).width(Length::Fill);
    if !form.submitting {
        submit = submit.on_press(Message::AuthSubmit);
    }
    content = content.push(submit);

    let (switch_label, switch_route) = if sign_up {
        (fl!("register-to-login"), Route::Login)
    } else {
        (fl!("login-to-register"), Route::Register)
    };
    content = content.push(
        button::text(switch_label).on_press(Message::Navigate(switch_route)),
    );

    container(content.align_x(Alignment::Start))
        .padding(32)
        .center_x(Length::Fill)
        .width(Length::Fill)
        .into()
}
