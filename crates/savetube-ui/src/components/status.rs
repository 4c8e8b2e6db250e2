use crate::core::download::{StatusKind, StatusMessage};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct StatusLineProps {
    pub status: Option<StatusMessage>,
}

#[function_component(StatusLine)]
pub(crate) fn status_line(props: &StatusLineProps) -> Html {
    let Some(status) = props.status.as_ref() else {
        return html! { <p id="message" class="status-message hidden" aria-live="polite" /> };
    };
    let tone = match status.kind {
        StatusKind::Success => "text-emerald-600",
        StatusKind::Error => "text-red-600",
    };
    let role = if status.is_error() { "alert" } else { "status" };

    html! {
        <p id="message" class={classes!("status-message", tone)} role={role} aria-live="polite">
            {status.text.clone()}
        </p>
    }
}
