use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;

#[function_component(Terms)]
pub(crate) fn terms() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));

    html! {
        <div class="terms">
            <h2 class="section-title">{bundle.text("terms.title")}</h2>
            <ol class="terms-list">
                {for (1..=3).map(|clause| html! {
                    <li>{bundle.text(&format!("terms.{clause}"))}</li>
                })}
            </ol>
        </div>
    }
}
