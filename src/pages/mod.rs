pub mod auth;
pub mod dashboard;
pub mod settings;
pub mod task_form;
pub mod tasks;

use cosmic::Element;
use cosmic::widget::text;

use crate::core::validate::{Field, FieldErrors};
use crate::message::Message;

/// Inline message under a form field, if it has one.
pub fn field_error(errors: &FieldErrors, field: Field) -> Option<Element<'static, Message>> {
    errors
        .get(field)
        .map(|msg| text::caption(format!("\u{26A0} {}", msg)).into())
}
