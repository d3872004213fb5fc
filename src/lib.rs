// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod config;
pub mod loader;
pub mod logic;
pub mod logger;
pub mod render;

pub use app::game_app::GameApp;

// JavaScript の console.log を Rust から呼び出すための準備 (extern ブロック)。
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);
}

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
#[wasm_bindgen(start)]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
    if logger::init(log::LevelFilter::Info).is_err() {
        log("Logger was already set, keeping the existing one.");
    }
    log("Panic hook set!");
}
