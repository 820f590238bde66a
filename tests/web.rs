//! Browser-side checks of the JavaScript bindings.
//!
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]

use reversi_engine::wasm::{WasmGame, init_logging, wasm_ready};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn config(opponent: &str) -> JsValue {
    let config = js_sys::Object::new();
    js_sys::Reflect::set(&config, &"opponent".into(), &opponent.into()).unwrap();
    config.into()
}

fn array_len(value: JsValue) -> u32 {
    js_sys::Array::from(&value).length()
}

#[wasm_bindgen_test]
fn module_reports_ready() {
    init_logging("debug");
    assert!(wasm_ready());
}

#[wasm_bindgen_test]
fn undefined_config_uses_defaults() {
    let mut game = WasmGame::new(JsValue::UNDEFINED).unwrap();
    game.start(true).unwrap();

    assert_eq!(array_len(game.legal_moves().unwrap()), 4);
}

#[wasm_bindgen_test]
fn opening_move_is_reported_through_events() {
    let mut game = WasmGame::new(config("human")).unwrap();
    game.start(true).unwrap();
    game.drain_events().unwrap();

    game.choose_move(2, 3).unwrap();

    // MoveApplied for black, then MoveOffered for white.
    assert_eq!(array_len(game.drain_events().unwrap()), 2);
    assert_eq!(array_len(game.drain_events().unwrap()), 0);
}

#[wasm_bindgen_test]
fn illegal_and_off_board_moves_are_errors() {
    let mut game = WasmGame::new(config("beginner")).unwrap();
    game.start(true).unwrap();

    assert!(game.choose_move(0, 0).is_err());
    assert!(game.choose_move(9, 9).is_err());
    assert!(game.undo().is_err());
}

#[wasm_bindgen_test]
fn unknown_opponent_name_is_rejected() {
    let mut game = WasmGame::new(JsValue::UNDEFINED).unwrap();

    assert!(game.set_opponent("grandmaster").is_err());
    assert!(game.set_opponent("professional").is_ok());
}
