//! Sticky site header with section links, language switch and mobile toggler.

use crate::components::locale_menu::LocaleMenu;
use crate::core::nav::NavState;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode, TranslationBundle};
use yew::prelude::*;

const LINK_KEYS: [&str; 3] = ["nav.home", "nav.how", "nav.terms"];

#[derive(Properties, PartialEq)]
pub(crate) struct SiteNavbarProps {
    pub nav: NavState,
    pub section_ids: &'static [&'static str],
    pub locale: LocaleCode,
    pub on_locale: Callback<LocaleCode>,
    pub on_toggle: Callback<()>,
    /// Scrolls to a section id; returns `false` when the target is missing.
    pub on_navigate: Callback<String, bool>,
}

#[function_component(SiteNavbar)]
pub(crate) fn site_navbar(props: &SiteNavbarProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let on_toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_| on_toggle.emit(()))
    };

    html! {
        <nav class={classes!("navbar", props.nav.sticky.then_some("is-sticky"))}>
            <a class="navbar-brand" href={format!("#{}", props.section_ids[0])}>{"SaveTube"}</a>
            <button
                type="button"
                class="navbar-toggler"
                aria-controls="navbarNav"
                aria-expanded={props.nav.menu_open.to_string()}
                aria-label={t("nav.menu")}
                onclick={on_toggle}
            >
                <span class="navbar-toggler-icon" />
            </button>
            <div id="navbarNav" class={classes!("navbar-collapse", (!props.nav.menu_open).then_some("hidden"))}>
                <ul class="navbar-nav">
                    {for props.section_ids.iter().zip(LINK_KEYS).enumerate().map(|(index, (id, key))| {
                        let active = props.nav.is_active(index);
                        let target = (*id).to_string();
                        let on_navigate = props.on_navigate.clone();
                        let onclick = Callback::from(move |event: MouseEvent| {
                            if on_navigate.emit(target.clone()) {
                                event.prevent_default();
                            }
                        });
                        html! {
                            <li class="nav-item">
                                <a
                                    class={classes!("nav-link", "click-scroll", if active { "active" } else { "inactive" })}
                                    href={format!("#{id}")}
                                    aria-current={active.then_some("true")}
                                    onclick={onclick}
                                >
                                    {t(key)}
                                </a>
                            </li>
                        }
                    })}
                </ul>
                <LocaleMenu locale={props.locale} on_select={props.on_locale.clone()} />
            </div>
        </nav>
    }
}
