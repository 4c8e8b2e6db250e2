use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;

#[function_component(HowToCards)]
pub(crate) fn how_to_cards() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));

    html! {
        <div class="how-to">
            <h2 class="section-title">{bundle.text("cards.title")}</h2>
            <div class="card-grid">
                {for (1..=3).map(|step| html! {
                    <article class="card">
                        <span class="card-step">{step.to_string()}</span>
                        <h3 class="card-title">{bundle.text(&format!("cards.{step}.title"))}</h3>
                        <p class="card-body">{bundle.text(&format!("cards.{step}.desc"))}</p>
                    </article>
                })}
            </div>
        </div>
    }
}
