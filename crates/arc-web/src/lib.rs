pub mod runner;

pub use runner::TweenRunner;

use std::cell::RefCell;

use arc_tween::{TransformSnapshot, TweenId, PROTOCOL_VERSION};
use glam::{Quat, Vec3};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<TweenRunner> = RefCell::new(TweenRunner::new());
}

fn with_runner<R>(f: impl FnOnce(&mut TweenRunner) -> R) -> R {
    RUNNER.with(|cell| f(&mut cell.borrow_mut()))
}

/// Install logging and the panic hook. Call once before anything else.
#[wasm_bindgen]
pub fn tween_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("arc-web: initialized (protocol {})", PROTOCOL_VERSION);
}

/// Create a tween from a JSON config. Returns its id, or -1 if the JSON does not parse.
/// A config that parses but fails validation is still created; it reports issues when evaluated.
#[wasm_bindgen]
pub fn tween_create(config_json: &str) -> i32 {
    with_runner(|r| match r.create(config_json) {
        Ok(id) => id.0 as i32,
        Err(err) => {
            log::error!("tween_create: {}", err);
            -1
        }
    })
}

#[wasm_bindgen]
pub fn tween_destroy(id: u32) -> bool {
    with_runner(|r| r.destroy(TweenId(id)))
}

/// Transforms cross the boundary as 7 floats: position xyz, rotation xyzw.
const TRANSFORM_FLOATS: usize = 7;

fn snapshot(floats: &[f32]) -> Option<TransformSnapshot> {
    match *floats {
        [px, py, pz, qx, qy, qz, qw] => Some(TransformSnapshot::new(
            Vec3::new(px, py, pz),
            Quat::from_xyzw(qx, qy, qz, qw),
        )),
        _ => None,
    }
}

/// Capture anchors for the segment that just became active.
///
/// `start`, `end` and `current` are 7-float transforms. Pass an empty `start`
/// when the clip has no start location; the object's `current` transform is
/// used instead.
#[wasm_bindgen]
pub fn tween_prepare(id: u32, start: &[f32], end: &[f32], current: &[f32]) -> bool {
    let (Some(end), Some(current)) = (snapshot(end), snapshot(current)) else {
        log::warn!("tween_prepare: end and current need {} floats each", TRANSFORM_FLOATS);
        return false;
    };
    let start = if start.is_empty() {
        None
    } else {
        match snapshot(start) {
            Some(start) => Some(start),
            None => {
                log::warn!("tween_prepare: start needs 0 or {} floats", TRANSFORM_FLOATS);
                return false;
            }
        }
    };
    with_runner(|r| r.prepare(TweenId(id), start, end, current))
}

#[wasm_bindgen]
pub fn tween_begin_frame() {
    with_runner(|r| r.begin_frame());
}

/// Evaluate a tween at progress `t`. Returns the record slot, or -1 for an unknown id.
#[wasm_bindgen]
pub fn tween_evaluate(id: u32, t: f32, duration: f32) -> i32 {
    with_runner(|r| r.evaluate(TweenId(id), t, duration).map_or(-1, |slot| slot as i32))
}

/// Evaluate a tween `local_time` seconds into a clip lasting `duration`.
#[wasm_bindgen]
pub fn tween_evaluate_at(id: u32, local_time: f32, duration: f32) -> i32 {
    with_runner(|r| r.evaluate_at(TweenId(id), local_time, duration).map_or(-1, |slot| slot as i32))
}

/// Messages for the issues a tween raised since the last call.
/// An issue raised on several frames appears once, suffixed with its count.
#[wasm_bindgen]
pub fn tween_drain_issues(id: u32) -> js_sys::Array {
    with_runner(|r| {
        r.drain_issues(TweenId(id))
            .iter()
            .map(|pending| match pending.repeats {
                1 => JsValue::from_str(&pending.issue.to_string()),
                n => JsValue::from_str(&format!("{} (x{})", pending.issue, n)),
            })
            .collect()
    })
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_samples_ptr() -> *const f32 {
    with_runner(|r| r.samples_ptr())
}

#[wasm_bindgen]
pub fn get_sample_count() -> u32 {
    with_runner(|r| r.sample_count())
}

/// Copy of one record, for hosts that do not read wasm memory directly.
#[wasm_bindgen]
pub fn get_sample(slot: u32) -> js_sys::Float32Array {
    with_runner(|r| match r.record(slot as usize) {
        Some(record) => js_sys::Float32Array::from(record.as_floats()),
        None => js_sys::Float32Array::new_with_length(0),
    })
}

#[wasm_bindgen]
pub fn get_tween_count() -> u32 {
    with_runner(|r| r.tween_count())
}

#[wasm_bindgen]
pub fn get_protocol_version() -> f32 {
    PROTOCOL_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reads_seven_floats() {
        let s = snapshot(&[1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
        assert_eq!(s.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(s.rotation, Quat::IDENTITY);
        assert!(snapshot(&[]).is_none());
        assert!(snapshot(&[0.0; 6]).is_none());
    }
}
