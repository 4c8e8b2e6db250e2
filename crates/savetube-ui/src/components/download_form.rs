//! URL form: link input, format choice, terms acceptance, preview search and submit.
//!
//! # Design
//! - Local state holds what the user typed; the caller runs the download or the lookup.
//! - A blank URL is still submitted so the flow can report it.
//! - Submit downloads right away in the selected format; Search opens the quality dialog.

use crate::core::download::FileType;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct DownloadFormProps {
    pub busy: bool,
    pub searching: bool,
    pub terms_anchor: &'static str,
    /// Emits `(url, file_type)` as typed.
    pub on_submit: Callback<(String, String)>,
    /// Emits the URL as typed.
    pub on_search: Callback<String>,
    pub on_navigate: Callback<String, bool>,
}

#[function_component(DownloadForm)]
pub(crate) fn download_form(props: &DownloadFormProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let url = use_state(String::new);
    let file_type = use_state(FileType::default);
    let accepted = use_state(|| false);

    let on_url = {
        let url = url.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                url.set(input.value());
            }
        })
    };
    let on_accept = {
        let accepted = accepted.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                accepted.set(input.checked());
            }
        })
    };
    let on_submit = {
        let url = url.clone();
        let file_type = file_type.clone();
        let accepted = accepted.clone();
        let busy = props.busy;
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if busy || !*accepted {
                return;
            }
            on_submit.emit(((*url).clone(), file_type.wire().to_string()));
        })
    };
    let on_search = {
        let url = url.clone();
        let accepted = accepted.clone();
        let searching = props.searching;
        let on_search = props.on_search.clone();
        Callback::from(move |_: MouseEvent| {
            if searching || !*accepted {
                return;
            }
            on_search.emit((*url).clone());
        })
    };
    let on_terms = {
        let on_navigate = props.on_navigate.clone();
        let target = props.terms_anchor.to_string();
        Callback::from(move |event: MouseEvent| {
            if on_navigate.emit(target.clone()) {
                event.prevent_default();
            }
        })
    };
    let format_option = |value: FileType, label_key: &str| {
        let checked = *file_type == value;
        let file_type = file_type.clone();
        let onchange = Callback::from(move |_: Event| file_type.set(value));
        html! {
            <label class="format-option">
                <input
                    type="radio"
                    name="file_type"
                    value={value.wire()}
                    checked={checked}
                    onchange={onchange}
                />
                <span>{t(label_key)}</span>
            </label>
        }
    };

    html! {
        <form id="downloadForm" class="download-form" onsubmit={on_submit}>
            <label class="sr-only" for="url">{t("form.urlLabel")}</label>
            <input
                id="url"
                type="text"
                name="url"
                inputmode="url"
                autocomplete="off"
                placeholder={t("form.placeholder")}
                value={(*url).clone()}
                oninput={on_url}
            />
            <div class="format-options" role="radiogroup">
                {format_option(FileType::Audio, "form.audio")}
                {format_option(FileType::Video, "form.video")}
            </div>
            <label class="terms-accept">
                <input type="checkbox" checked={*accepted} onchange={on_accept} />
                <span>
                    {t("form.acceptPrefix")}{" "}
                    <a href={format!("#{}", props.terms_anchor)} onclick={on_terms}>{t("form.termsLink")}</a>
                </span>
            </label>
            <div class="form-actions">
                <button
                    type="button"
                    class="btn-search"
                    disabled={props.searching || !*accepted}
                    onclick={on_search}
                >
                    {if props.searching { t("form.searching") } else { t("form.search") }}
                </button>
                <button type="submit" class="btn-download" disabled={props.busy || !*accepted}>
                    {if props.busy { t("form.downloading") } else { t("form.download") }}
                </button>
            </div>
        </form>
    }
}
