// src/app/loading_view.rs
//! ローディング画面 (プログレスバーとステータス文字)。

use log::error;

use crate::app::init_handler::Elements;
use crate::loader::LoadProgress;

pub(crate) fn show_progress(elements: &Elements, progress: &LoadProgress) {
    if let Some(bar) = &elements.loading_progress_bar {
        if let Err(e) = bar.style().set_property("width", &format!("{}%", progress.percent)) {
            error!("App::Loading: failed to set progress width: {:?}", e);
        }
    }
    set_status(elements, &progress.message);
}

/// バーはそのままで文字だけ変える
pub(crate) fn set_status(elements: &Elements, message: &str) {
    if let Some(status) = &elements.loading_status_text {
        status.set_text_content(Some(message));
    }
}

pub(crate) fn hide_overlay(elements: &Elements) {
    if let Some(overlay) = &elements.loading_overlay {
        if let Err(e) = overlay.class_list().add_1("hidden") {
            error!("App::Loading: failed to hide overlay: {:?}", e);
        }
    }
}
