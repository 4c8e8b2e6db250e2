pub(crate) mod cards;
pub(crate) mod download_form;
pub(crate) mod footer;
pub(crate) mod hero;
pub(crate) mod locale_menu;
pub(crate) mod navbar;
pub(crate) mod preview_modal;
pub(crate) mod progress;
pub(crate) mod status;
pub(crate) mod terms;
pub(crate) mod timeline;
