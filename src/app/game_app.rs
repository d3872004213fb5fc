// src/app/game_app.rs
//! JS から使う `GameApp` と、イベントハンドラ同士で共有する `AppContext`。

use std::sync::{Arc, Mutex, PoisonError};

use futures::{future, StreamExt};
use log::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::browser_event_manager::{self, listen, new_closure_store, ClosureStore};
use crate::app::dice_view::DomDiceView;
use crate::app::init_handler::{self, Elements};
use crate::app::{drag_handler, event_handler, help_manual, loading_view};
use crate::components::GameSession;
use crate::config::constants::LOADING_OVERLAY_HIDE_DELAY_MS;
use crate::config::LoaderConfig;
use crate::loader::{BrowserDataSource, DataLoader, ProgressReporter};
use crate::logic::dice::DiceController;
use crate::render::sort_fish_cards;

/// イベントハンドラに渡して回す共有状態
pub(crate) struct AppContext {
    pub elements: Elements,
    /// データの読み込みが終わるまでは `None`
    pub session: Mutex<Option<GameSession>>,
    pub dice: Mutex<DiceController<DomDiceView>>,
    /// ずっと付けっぱなしのリスナー
    pub closures: ClosureStore,
    /// ギャラリーのサムネイル用。作り直す時にまとめて捨てる。
    pub gallery_closures: ClosureStore,
}

impl AppContext {
    /// セッションがあれば `f` を呼ぶ。まだ無ければ `None`。
    pub(crate) fn with_session<T>(&self, f: impl FnOnce(&mut GameSession) -> Option<T>) -> Option<T> {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        session.as_mut().and_then(f)
    }
}

#[wasm_bindgen]
pub struct GameApp {
    context: Arc<AppContext>,
    loader: Arc<DataLoader<BrowserDataSource>>,
}

#[wasm_bindgen]
impl GameApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<GameApp, JsValue> {
        info!("GameApp: initializing...");
        let elements = init_handler::initialize_elements()?;

        let dice_view = DomDiceView::new(
            elements.dice.clone(),
            elements.dice_result.clone(),
            elements.dice_button.clone(),
        );

        let context = Arc::new(AppContext {
            elements,
            session: Mutex::new(None),
            dice: Mutex::new(DiceController::new(dice_view)),
            closures: new_closure_store(),
            gallery_closures: new_closure_store(),
        });
        let loader = Arc::new(DataLoader::new(BrowserDataSource::new(), LoaderConfig::default()));

        info!("GameApp: initialization complete.");
        Ok(GameApp { context, loader })
    }

    /// データを読み込んで、終わったら画面にリスナーを付ける。
    /// 読み込みは非同期で進むので、この関数はすぐ返るよ。
    pub fn start(&self) {
        let ctx = Arc::clone(&self.context);
        let loader = Arc::clone(&self.loader);
        spawn_local(async move {
            let started_at = js_sys::Date::now();
            let (reporter, receiver) = ProgressReporter::channel();
            // reporter が drop されると受信側の for_each も終わる
            let load = async move { loader.load_all(&reporter).await };
            let show = receiver.for_each(|progress| {
                loading_view::show_progress(&ctx.elements, &progress);
                future::ready(())
            });
            let (loaded, ()) = future::join(load, show).await;

            let data = match loaded {
                Ok(data) => data,
                Err(e) => {
                    error!("GameApp: failed to load game data: {}", e);
                    return;
                }
            };

            *ctx.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(GameSession::new(data.fish, data.fate));
            loading_view::set_status(&ctx.elements, "正在初始化遊戲元件");

            if let Err(e) = attach_listeners(&ctx) {
                error!("GameApp: failed to attach listeners: {:?}", e);
                return;
            }

            loading_view::set_status(&ctx.elements, "載入完成！");
            let hide_ctx = Arc::clone(&ctx);
            let scheduled = browser_event_manager::set_timeout(LOADING_OVERLAY_HIDE_DELAY_MS, move || {
                loading_view::hide_overlay(&hide_ctx.elements);
            });
            if let Err(e) = scheduled {
                error!("GameApp: failed to schedule overlay hide: {:?}", e);
            }
            info!("GameApp: ready in {:.0}ms 🎣", js_sys::Date::now() - started_at);
        });
    }

    /// JS からサイコロを振る。転がっている最中なら `undefined`。
    pub fn roll_dice(&self) -> Option<u8> {
        event_handler::roll_dice(&self.context)
    }

    /// 魚カードを強さ順 (ランク昇順、同ランクはスート強い順) に並べた JSON
    pub fn sorted_fish_json(&self) -> Result<String, JsValue> {
        let sorted = self
            .context
            .with_session(|session| Some(sort_fish_cards(session.fish_deck())))
            .ok_or_else(|| JsValue::from_str("game data is not loaded yet"))?;
        serde_json::to_string(&sorted).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn collected_count(&self) -> usize {
        self.context.with_session(|session| Some(session.collected().len())).unwrap_or(0)
    }

    /// 読み込みキャッシュを捨てる (今のセッションはそのまま)
    pub fn clear_cache(&self) {
        self.loader.clear();
    }
}

fn attach_listeners(ctx: &Arc<AppContext>) -> Result<(), JsValue> {
    let elements = &ctx.elements;
    let store = &ctx.closures;

    drag_handler::attach_avatar_drag(&elements.document, store)?;

    let fish_ctx = Arc::clone(ctx);
    listen(&elements.fish_deck, "click", store, move |_event| {
        event_handler::draw_fish(&fish_ctx);
    })?;

    let fate_ctx = Arc::clone(ctx);
    listen(&elements.fate_deck, "click", store, move |_event| {
        event_handler::draw_fate(&fate_ctx);
    })?;

    let modal_ctx = Arc::clone(ctx);
    listen(&elements.modal_overlay, "click", store, move |event| {
        event_handler::handle_modal_click(&modal_ctx, &event);
    })?;

    let collect_ctx = Arc::clone(ctx);
    listen(&elements.collect_btn, "click", store, move |event| {
        event_handler::collect_current(&collect_ctx, &event);
    })?;

    let delete_ctx = Arc::clone(ctx);
    listen(&elements.delete_btn, "click", store, move |event| {
        event_handler::delete_current(&delete_ctx, &event);
    })?;

    if let Some(layer) = &elements.dice_click_layer {
        let dice_ctx = Arc::clone(ctx);
        listen(layer, "click", store, move |event| {
            event.stop_propagation();
            event_handler::roll_dice(&dice_ctx);
        })?;
    }
    if let Some(button) = &elements.dice_button {
        let dice_ctx = Arc::clone(ctx);
        listen(button, "click", store, move |event| {
            event.stop_propagation();
            event_handler::roll_dice(&dice_ctx);
        })?;
    }
    if let Some(dice) = &elements.dice {
        let dice_ctx = Arc::clone(ctx);
        listen(dice, "transitionend", store, move |event| {
            event_handler::handle_dice_transition_end(&dice_ctx, &event);
        })?;
    }

    help_manual::attach_help_manual(elements, store)
}
