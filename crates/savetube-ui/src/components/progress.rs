//! Download progress indicator.

use crate::core::progress::ProgressView;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ProgressBarProps {
    pub view: ProgressView,
}

#[function_component(ProgressBar)]
pub(crate) fn progress_bar(props: &ProgressBarProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let view = &props.view;

    html! {
        <div id="progressWrap" class={classes!("progress-wrap", (!view.visible).then_some("hidden"))}>
            <div
                class="progress-track"
                role="progressbar"
                aria-label={bundle.text("progress.label")}
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow={view.width.to_string()}
            >
                <div id="progressBar" class="progress-fill" style={format!("width: {}%", view.width)} />
            </div>
            <span id="progressPct" class="progress-label">{view.label.clone()}</span>
        </div>
    }
}
