use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;

#[function_component(SiteFooter)]
pub(crate) fn site_footer() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));

    html! {
        <footer class="site-footer">
            <p>{bundle.text("footer.made")}</p>
            <p class="brand">{"SaveTube"}</p>
        </footer>
    }
}
