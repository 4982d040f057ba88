//! Browser entry points for the attractor effect.
//!
//! The runner lives in a `thread_local!` because wasm-bindgen cannot export
//! a stateful struct with the pointer-based buffer protocol the JS side uses.

pub mod runner;

pub use runner::SimRunner;

use std::cell::RefCell;

use attractor_engine::{ControlEvent, EngineConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. Returns `None` (and logs) before `sim_init`.
fn with_runner<R>(f: impl FnOnce(&mut SimRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::error!("simulation not initialized; call sim_init() first");
                None
            }
        }
    })
}

/// Create the runner from a JSON config (empty string for defaults).
/// The RNG is seeded from the clock unless the config pins a seed.
#[wasm_bindgen]
pub fn sim_init(config_json: &str) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        EngineConfig {
            seed: js_sys::Date::now() as u64,
            ..EngineConfig::default()
        }
    } else {
        match EngineConfig::from_json(config_json) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                return false;
            }
        }
    };

    log::info!(
        "attractor: initialized ({} dots, path length {}, {:?} trails)",
        config.params.target_count,
        config.params.path_length,
        config.trail_policy
    );
    let runner = SimRunner::new(config);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    true
}

#[wasm_bindgen]
pub fn sim_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Control surface ----

#[wasm_bindgen]
pub fn set_target_count(count: u32) {
    with_runner(|r| r.push_control(ControlEvent::SetTargetCount(count)));
}

#[wasm_bindgen]
pub fn set_gravity(gravity: f32) {
    with_runner(|r| r.push_control(ControlEvent::SetGravity(gravity)));
}

#[wasm_bindgen]
pub fn set_path_length(length: u32) {
    with_runner(|r| r.push_control(ControlEvent::SetPathLength(length)));
}

#[wasm_bindgen]
pub fn move_attractor(x: f32, y: f32) {
    with_runner(|r| r.push_control(ControlEvent::MoveAttractor { x, y }));
}

#[wasm_bindgen]
pub fn set_attractor_radius(radius: f32) {
    with_runner(|r| r.push_control(ControlEvent::SetAttractorRadius(radius)));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_dots_ptr() -> *const f32 {
    with_runner(|r| r.dots_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_dot_instance_count() -> u32 {
    with_runner(|r| r.dot_instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_lines_ptr() -> *const f32 {
    with_runner(|r| r.lines_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_line_vertex_count() -> u32 {
    with_runner(|r| r.line_vertex_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height()).unwrap_or(0.0)
}

// ---- HUD ----

#[wasm_bindgen]
pub fn get_dot_count() -> u32 {
    with_runner(|r| r.dot_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_target_count() -> u32 {
    with_runner(|r| r.target_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_path_length() -> u32 {
    with_runner(|r| r.path_length()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_gravity_multiplier() -> f32 {
    with_runner(|r| r.gravity_multiplier()).unwrap_or(0.0)
}
