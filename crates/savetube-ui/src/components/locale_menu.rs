//! Language switcher shown in the header.
//!
//! # Design
//! - Keep presentation focused on UI; selection state is managed by the caller.
//! - Avoid side effects inside the component; emit the selected locale via callback.

use crate::i18n::{DEFAULT_LOCALE, LocaleCode, TranslationBundle};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct LocaleMenuProps {
    pub locale: LocaleCode,
    pub on_select: Callback<LocaleCode>,
}

#[function_component(LocaleMenu)]
pub(crate) fn locale_menu(props: &LocaleMenuProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));

    html! {
        <div class="locale-menu" role="group" aria-label={bundle.text("nav.language")}>
            {for LocaleCode::all().iter().map(|lc| {
                let next = *lc;
                let active = next == props.locale;
                let on_select = props.on_select.clone();
                let onclick = Callback::from(move |_| on_select.emit(next));
                html! {
                    <button
                        type="button"
                        class={classes!("locale-option", active.then_some("active"))}
                        aria-pressed={active.to_string()}
                        lang={next.code()}
                        onclick={onclick}
                    >
                        {next.short_label()}
                    </button>
                }
            })}
        </div>
    }
}
