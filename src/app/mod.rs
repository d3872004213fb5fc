// src/app/mod.rs
//! GameApp の内部ロジックを役割ごとに分割して置くモジュールだよ！

pub(crate) mod browser_event_manager;
pub(crate) mod dice_view;
pub(crate) mod drag_handler;
pub(crate) mod event_handler;
pub mod game_app;
pub(crate) mod help_manual;
pub(crate) mod init_handler;
pub(crate) mod loading_view;
pub(crate) mod renderer;

#[cfg(all(test, target_arch = "wasm32"))]
mod dom_tests;
