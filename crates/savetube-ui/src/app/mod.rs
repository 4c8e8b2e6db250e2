//! App shell: mounts the page, owns the download flow and the scroll bindings.
//!
//! # Design
//! - One progress hub and one orchestrator per boot; the orchestrator is rebuilt only when
//!   the language changes so status texts follow the active bundle.
//! - Components stay presentational and report intent through callbacks.

use crate::components::cards::HowToCards;
use crate::components::download_form::DownloadForm;
use crate::components::footer::SiteFooter;
use crate::components::hero::Hero;
use crate::components::navbar::SiteNavbar;
use crate::components::preview_modal::PreviewModal;
use crate::components::progress::ProgressBar;
use crate::components::status::StatusLine;
use crate::components::terms::Terms;
use crate::components::timeline::RevealTimeline;
use crate::config::UiConfig;
use crate::core::download::{DownloadOrchestrator, FileType, StatusTexts};
use crate::core::store::AppStore;
use crate::i18n::{LanguageState, LocaleCode, TranslationBundle};
use crate::telemetry::{LoggingConfig, init_logging};
use env::BrowserEnv;
use gloo::console;
use gloo::utils::document;
use preferences::{LocalPreferences, api_base_override, apply_document_lang};
use progress::ProgressHub;
use std::rc::Rc;
use tracing::{debug, info};
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

mod api;
mod env;
mod preferences;
mod progress;
mod save;
pub(crate) mod scroll;

#[derive(Properties, PartialEq)]
pub(crate) struct AppProps {
    pub config: UiConfig,
}

#[function_component(SaveTubeApp)]
pub(crate) fn savetube_app(props: &AppProps) -> Html {
    let dispatch = Dispatch::<AppStore>::new();
    let config = use_memo(|config: &UiConfig| config.clone(), props.config.clone());
    let locale = use_selector(|store: &AppStore| store.language.locale());
    let bundle = use_selector(|store: &AppStore| store.language.bundle().clone());
    let nav = use_selector(|store: &AppStore| store.nav.clone());
    let download = use_selector(|store: &AppStore| store.download.clone());

    let hub = use_memo(
        |url: &String| ProgressHub::new(url, Dispatch::<AppStore>::new()),
        props.config.progress_url(),
    );
    let orchestrator = {
        let hub = (*hub).clone();
        let config = Rc::clone(&config);
        use_memo(
            move |bundle: &TranslationBundle| {
                DownloadOrchestrator::new(
                    BrowserEnv::new(hub, Dispatch::<AppStore>::new()),
                    &config,
                    StatusTexts::from_bundle(bundle),
                )
            },
            (*bundle).clone(),
        )
    };

    use_effect_with_deps(
        move |locale| {
            apply_document_lang(*locale);
            || ()
        },
        *locale,
    );
    {
        let dispatch = dispatch.clone();
        let config = Rc::clone(&config);
        use_effect_with_deps(
            move |_| {
                let handler: Rc<dyn Fn()> = {
                    let config = Rc::clone(&config);
                    Rc::new(move || refresh_nav(&dispatch, &config))
                };
                handler();
                let subscription = scroll::ThrottledScroll::new(config.scroll_throttle_ms, handler);
                move || drop(subscription)
            },
            (),
        );
    }
    {
        let hub = (*hub).clone();
        use_effect_with_deps(move |_| move || hub.close(), ());
    }

    let on_locale = {
        let dispatch = dispatch.clone();
        Callback::from(move |next: LocaleCode| {
            dispatch.reduce_mut(|store| store.language.set(next, &mut LocalPreferences));
        })
    };
    let on_toggle_menu = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| dispatch.reduce_mut(|store| store.nav.toggle_menu()))
    };
    let on_navigate = {
        let dispatch = dispatch.clone();
        let config = Rc::clone(&config);
        Callback::from(move |id: String| -> bool {
            dispatch.reduce_mut(|store| store.nav.close_menu());
            scroll::scroll_to_section(&id, &config)
        })
    };
    let on_submit = {
        let orchestrator = Rc::clone(&orchestrator);
        Callback::from(move |(url, file_type): (String, String)| {
            let orchestrator = Rc::clone(&orchestrator);
            let dispatch = Dispatch::<AppStore>::new();
            dispatch.reduce_mut(|store| store.download.begin());
            yew::platform::spawn_local(async move {
                // Failures were already rendered in the status area.
                if let Err(err) = orchestrator.start_download(&url, &file_type).await {
                    debug!(error = %err, "download attempt settled with an error");
                }
                dispatch.reduce_mut(|store| store.download.finish());
            });
        })
    };
    let on_search = {
        let orchestrator = Rc::clone(&orchestrator);
        Callback::from(move |url: String| {
            let orchestrator = Rc::clone(&orchestrator);
            let dispatch = Dispatch::<AppStore>::new();
            dispatch.reduce_mut(|store| store.download.begin_search());
            yew::platform::spawn_local(async move {
                let result = orchestrator.preview(&url).await;
                dispatch.reduce_mut(|store| {
                    store.download.finish_search();
                    match result {
                        Ok(metadata) => store.download.open_preview(&url, metadata),
                        Err(err) => debug!(error = %err, "preview lookup settled with an error"),
                    }
                });
            });
        })
    };
    let on_choose = {
        let orchestrator = Rc::clone(&orchestrator);
        Callback::from(move |(file_type, quality): (FileType, u32)| {
            let dispatch = Dispatch::<AppStore>::new();
            let Some(url) = dispatch.get().download.preview.as_ref().map(|p| p.url.clone()) else {
                return;
            };
            let orchestrator = Rc::clone(&orchestrator);
            dispatch.reduce_mut(|store| {
                store.download.close_preview();
                store.download.begin();
            });
            yew::platform::spawn_local(async move {
                if let Err(err) = orchestrator
                    .start_download_with(&url, file_type.wire(), Some(quality))
                    .await
                {
                    debug!(error = %err, "download attempt settled with an error");
                }
                dispatch.reduce_mut(|store| store.download.finish());
            });
        })
    };
    let on_close_preview = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| dispatch.reduce_mut(|store| store.download.close_preview()))
    };

    let section_ids = config.section_ids;
    html! {
        <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
            <SiteNavbar
                nav={(*nav).clone()}
                section_ids={section_ids}
                locale={*locale}
                on_locale={on_locale}
                on_toggle={on_toggle_menu}
                on_navigate={on_navigate.clone()}
            />
            <main>
                <section id={section_ids[0]} class="hero-section">
                    <Hero rotate_ms={config.hero_rotate_ms} />
                    <DownloadForm
                        busy={download.busy}
                        searching={download.searching}
                        terms_anchor={section_ids[2]}
                        on_submit={on_submit}
                        on_search={on_search}
                        on_navigate={on_navigate}
                    />
                    <ProgressBar view={download.progress.clone()} />
                    <StatusLine status={download.status.clone()} />
                </section>
                <section id={section_ids[1]} class="how-section">
                    <HowToCards />
                    <RevealTimeline
                        throttle_ms={config.scroll_throttle_ms}
                        threshold={config.reveal_threshold}
                    />
                </section>
                <section id={section_ids[2]} class="terms-section">
                    <Terms />
                </section>
            </main>
            <SiteFooter />
            {for download.preview.clone().map(|preview| html! {
                <PreviewModal
                    preview={preview}
                    busy={download.busy}
                    on_choose={on_choose}
                    on_close={on_close_preview}
                />
            })}
        </ContextProvider<TranslationBundle>>
    }
}

fn refresh_nav(dispatch: &Dispatch<AppStore>, config: &UiConfig) {
    let y = scroll::scroll_y();
    let tops = scroll::section_tops(config.section_ids);
    dispatch.reduce_mut(|store| {
        store.nav.update_sticky(y);
        store
            .nav
            .refresh_active_by_scroll(y, &tops, config.header_offset_px);
    });
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Err(err) = init_logging(&LoggingConfig::default()) {
        console::error!("logging init failed", format!("{err:#}"));
    }
    let language = LanguageState::load(&LocalPreferences);
    Dispatch::<AppStore>::new().reduce_mut(|store| store.language = language);

    if let Some(root) = document().get_element_by_id("app") {
        let config = UiConfig::from_root_dataset(api_base_override(&root));
        info!(api_base = %config.api_base, "mounting savetube ui");
        yew::Renderer::<SaveTubeApp>::with_root_and_props(root, AppProps { config }).render();
    } else {
        info!("mount node #app missing; rendering into body");
        yew::Renderer::<SaveTubeApp>::with_props(AppProps {
            config: UiConfig::default(),
        })
        .render();
    }
}
