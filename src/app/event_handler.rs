// src/app/event_handler.rs
//! クリックなどのユーザー操作を GameSession / DiceController に流すロジック。

use std::sync::{Arc, PoisonError};

use log::{debug, error, info};
use wasm_bindgen::JsCast;
use web_sys::{Event, Node, TransitionEvent};

use crate::app::browser_event_manager;
use crate::app::game_app::AppContext;
use crate::app::renderer::{self, FishModalMode};
use crate::config::constants::COLLECT_ANIMATION_MS;

/// 魚の山札をクリック → 1枚引いてモーダルに出す
pub(crate) fn draw_fish(ctx: &AppContext) {
    let drawn = ctx.with_session(|session| session.draw_fish(&mut rand::thread_rng()).cloned());
    let Some(fish) = drawn else {
        debug!("App::Event: fish deck is empty");
        return;
    };
    if let Err(e) = renderer::show_fish(ctx, &fish, FishModalMode::Drawn) {
        error!("App::Event: failed to show fish card: {:?}", e);
    }
}

/// 運命の山札をクリック
pub(crate) fn draw_fate(ctx: &AppContext) {
    let drawn = ctx.with_session(|session| session.draw_fate(&mut rand::thread_rng()).cloned());
    let Some(card) = drawn else {
        debug!("App::Event: fate deck is empty");
        return;
    };
    if let Err(e) = renderer::show_fate(ctx, &card) {
        error!("App::Event: failed to show fate card: {:?}", e);
    }
}

/// モーダルの背景クリック。ボタンやサイコロの上なら閉じない。
pub(crate) fn handle_modal_click(ctx: &AppContext, event: &Event) {
    let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
    let elements = &ctx.elements;

    let on_button = target.as_ref().is_some_and(|node| {
        elements.collect_btn.contains(Some(node)) || elements.delete_btn.contains(Some(node))
    });
    let on_dice = match (elements.document.query_selector(".dice-section"), target.as_ref()) {
        (Ok(Some(section)), Some(node)) => section.contains(Some(node)),
        _ => false,
    };
    if on_button || on_dice {
        return;
    }
    close_modal(ctx);
}

pub(crate) fn close_modal(ctx: &AppContext) {
    ctx.with_session(|session| {
        session.close();
        Some(())
    });
    if let Err(e) = renderer::hide_modal(ctx) {
        error!("App::Event: failed to hide modal: {:?}", e);
    }
}

/// 「集める」ボタン。アニメーションが終わったらギャラリーに追加してモーダルを閉じる。
pub(crate) fn collect_current(ctx: &Arc<AppContext>, event: &Event) {
    event.stop_propagation();

    let collected = ctx.with_session(|session| {
        let index = session.collect_current()?;
        session.collected().get(index).cloned().map(|fish| (index, fish))
    });
    let Some((index, fish)) = collected else {
        return;
    };

    if let Err(e) = renderer::set_collecting(ctx, true) {
        error!("App::Event: failed to start collecting animation: {:?}", e);
    }

    let later_ctx = Arc::clone(ctx);
    let scheduled = browser_event_manager::set_timeout(COLLECT_ANIMATION_MS, move || {
        let finished = renderer::add_card_to_collection(&later_ctx, &fish, index)
            .and_then(|_| renderer::hide_modal(&later_ctx))
            .and_then(|_| renderer::set_collecting(&later_ctx, false));
        if let Err(e) = finished {
            error!("App::Event: failed to finish collecting: {:?}", e);
        }
    });
    if let Err(e) = scheduled {
        error!("App::Event: failed to schedule collecting: {:?}", e);
    }
}

/// ギャラリーのサムネイルをクリック
pub(crate) fn view_collected(ctx: &AppContext, index: usize) {
    let Some(fish) = ctx.with_session(|session| session.view_collected(index).cloned()) else {
        return;
    };
    if let Err(e) = renderer::show_fish(ctx, &fish, FishModalMode::Collected) {
        error!("App::Event: failed to show collected card: {:?}", e);
    }
}

/// 「削除」ボタン
pub(crate) fn delete_current(ctx: &Arc<AppContext>, event: &Event) {
    event.stop_propagation();

    if ctx.with_session(|session| session.delete_current()).is_none() {
        return;
    }
    let redrawn = renderer::render_collection(ctx).and_then(|_| renderer::hide_modal(ctx));
    if let Err(e) = redrawn {
        error!("App::Event: failed to redraw gallery: {:?}", e);
    }
}

/// サイコロを振る。転がっている最中なら無視される。
pub(crate) fn roll_dice(ctx: &AppContext) -> Option<u8> {
    let mut dice = ctx.dice.lock().unwrap_or_else(PoisonError::into_inner);
    dice.roll(&mut rand::thread_rng())
}

/// サイコロの transitionend
pub(crate) fn handle_dice_transition_end(ctx: &AppContext, event: &Event) {
    let Some(transition) = event.dyn_ref::<TransitionEvent>() else {
        return;
    };
    let mut dice = ctx.dice.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(result) = dice.on_transition_end(&transition.property_name()) {
        info!("App::Event: dice settled on {}", result);
    }
}
