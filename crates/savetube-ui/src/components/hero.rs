//! Hero banner with a rotating headline.

use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use gloo_timers::callback::Interval;
use yew::prelude::*;

const SEQUENCE_KEYS: [&str; 3] = ["hero.sequence.0", "hero.sequence.1", "hero.sequence.2"];

#[derive(Properties, PartialEq)]
pub(crate) struct HeroProps {
    pub rotate_ms: u32,
}

#[function_component(Hero)]
pub(crate) fn hero(props: &HeroProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let index = use_state(|| 0usize);
    {
        let index = index.clone();
        use_effect_with_deps(
            move |rotate_ms| {
                let mut current = *index;
                let handle = Interval::new(*rotate_ms, move || {
                    current = (current + 1) % SEQUENCE_KEYS.len();
                    index.set(current);
                });
                move || drop(handle)
            },
            props.rotate_ms,
        );
    }
    let headline = bundle.text(SEQUENCE_KEYS[*index % SEQUENCE_KEYS.len()]);

    html! {
        <header class="hero">
            <h1 class="hero-title" aria-live="polite">{headline}</h1>
            <p class="hero-subtitle">{bundle.text("hero.subtitle")}</p>
        </header>
    }
}
