//! Preview dialog: video details plus a format/quality table with one download action per row.

use crate::core::download::FileType;
use crate::core::store::PreviewState;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct PreviewModalProps {
    pub preview: PreviewState,
    pub busy: bool,
    /// Emits the chosen format and quality value.
    pub on_choose: Callback<(FileType, u32)>,
    pub on_close: Callback<()>,
}

#[function_component(PreviewModal)]
pub(crate) fn preview_modal(props: &PreviewModalProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let tab = use_state(FileType::default);

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let tab_button = |value: FileType, label_key: &str| {
        let selected = *tab == value;
        let tab = tab.clone();
        let onclick = Callback::from(move |_: MouseEvent| tab.set(value));
        html! {
            <button
                type="button"
                role="tab"
                class={classes!("tab", selected.then_some("tab-active"))}
                aria-selected={selected.to_string()}
                onclick={onclick}
            >
                {t(label_key)}
            </button>
        }
    };
    let type_label = t(match *tab {
        FileType::Audio => "modal.audioTab",
        FileType::Video => "modal.videoTab",
    });
    let rows = (*tab).quality_options().iter().map(|&quality| {
        let file_type = *tab;
        let on_choose = props.on_choose.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_choose.emit((file_type, quality)));
        html! {
            <tr key={quality.to_string()}>
                <td>{type_label.clone()}</td>
                <td>{file_type.quality_label(quality)}</td>
                <td>
                    <button
                        type="button"
                        class="btn-download btn-sm"
                        disabled={props.busy}
                        onclick={onclick}
                    >
                        {t("action.download")}
                    </button>
                </td>
            </tr>
        }
    });

    let metadata = &props.preview.metadata;
    let heading = metadata
        .title()
        .map_or_else(|| t("modal.preview"), ToString::to_string);

    html! {
        <div class="modal modal-open" role="dialog" aria-modal="true" aria-labelledby="previewTitle">
            <div class="modal-box">
                <div class="modal-header">
                    <h2 id="previewTitle" class="modal-title">{t("modal.title")}</h2>
                    <button type="button" class="btn-close" aria-label={t("action.close")} onclick={on_close.clone()}>
                        {"×"}
                    </button>
                </div>
                <div class="modal-preview">
                    {for metadata.thumbnail().map(|src| html! {
                        <img class="preview-thumb" src={src.to_string()} alt={t("modal.preview")} />
                    })}
                    <div class="preview-info">
                        <h3 class="preview-title">{heading}</h3>
                        {for metadata.duration_label().map(|label| html! {
                            <p class="preview-duration">{format!("{}: {label}", t("modal.duration"))}</p>
                        })}
                    </div>
                </div>
                <div class="tabs" role="tablist">
                    {tab_button(FileType::Audio, "modal.audioTab")}
                    {tab_button(FileType::Video, "modal.videoTab")}
                </div>
                <table class="quality-table">
                    <thead>
                        <tr>
                            <th>{t("modal.col.type")}</th>
                            <th>{t("modal.col.format")}</th>
                            <th>{t("modal.col.action")}</th>
                        </tr>
                    </thead>
                    <tbody>{for rows}</tbody>
                </table>
                {if *tab == FileType::Video {
                    html! { <p class="modal-footnote">{t("modal.footnote")}</p> }
                } else {
                    html! {}
                }}
            </div>
            <button type="button" class="modal-backdrop" aria-label={t("action.close")} onclick={on_close}></button>
        </div>
    }
}
