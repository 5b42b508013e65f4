#![cfg(target_arch = "wasm32")]

use sandworks_engine::Sandbox;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn sandbox_runs_in_the_browser() {
    let mut sandbox = Sandbox::new().unwrap();
    sandbox.init(8, 8);
    assert!(sandbox.paint(3, 0, "sand").unwrap());
    assert!(sandbox.paint(3, 0, "lava").is_err());
    sandbox.step();

    let snapshot = sandbox.snapshot();
    assert_eq!(snapshot.rows(), 8);
    assert_eq!(snapshot.kinds().length(), 64);
    assert_eq!(snapshot.kinds().get_index(3 + 8), 1);
}

#[wasm_bindgen_test]
fn json_messages_round_trip() {
    let mut sandbox = Sandbox::new().unwrap();
    let out = sandbox.handle_message(r#"{"type":"setTickRate","rate":-1}"#);
    assert!(out.contains("invalid_rate"));
    assert!(sandbox.content_manifest_json().contains("\"co2\""));
}
