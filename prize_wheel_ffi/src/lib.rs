#![allow(clippy::missing_safety_doc)]

use std::ffi::c_void;
use std::ptr;

use log::warn;
use prize_wheel_core::{RngSource, SectorInput, WheelCfg, WheelError};
use prize_wheel_widget::{
    FrameTicket, SectorLayout, SpinAnimation, SpinResult, WheelOptions, WheelSurface, WheelWidget,
    DEFAULT_BTN_TEXT, DEFAULT_COLOR_EVEN, DEFAULT_COLOR_ODD, DEFAULT_COLOR_THIRD, DEFAULT_EASING,
};
use rand::rngs::StdRng;

/// FFI ABI version for prize_wheel_ffi.
///
/// Bump this when any `#[repr(C)]` struct layout or exported function signature changes.
pub const PW_FFI_VERSION: u32 = 1;

#[no_mangle]
pub extern "C" fn pw_ffi_version() -> u32 {
    PW_FFI_VERSION
}

// Return codes.
pub const PW_OK: i32 = 0;
pub const PW_ERR_NULL: i32 = -1;
pub const PW_ERR_NO_SECTORS: i32 = -2;
pub const PW_ERR_STALE_TICKET: i32 = -3;
pub const PW_ERR_OPTIONS: i32 = -4;

fn rc_for(e: &WheelError) -> i32 {
    match e {
        WheelError::NoSectors => PW_ERR_NO_SECTORS,
        WheelError::StaleTicket { .. } => PW_ERR_STALE_TICKET,
        WheelError::InvalidOptions(_) => PW_ERR_OPTIONS,
    }
}

/// FFI string view (UTF-8 bytes). Borrowed for the duration of a call.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct PwStr {
    pub ptr: *const u8,
    pub len: usize,
}

impl PwStr {
    fn null() -> Self {
        PwStr { ptr: ptr::null(), len: 0 }
    }

    fn borrowed(s: &str) -> Self {
        PwStr { ptr: s.as_ptr(), len: s.len() }
    }

    fn as_str(&self) -> Option<&str> {
        if self.ptr.is_null() {
            return None;
        }
        let bytes = unsafe { std::slice::from_raw_parts(self.ptr, self.len) };
        std::str::from_utf8(bytes).ok()
    }

    /// Optional JSON argument: null reads as empty, invalid UTF-8 is `None`.
    fn json_arg(&self) -> Option<&str> {
        if self.ptr.is_null() {
            return Some("");
        }
        self.as_str()
    }
}

/// Spin transition the host must run, then report with `pw_wheel_spin_finished`.
#[repr(C)]
pub struct PwSpinAnimation {
    pub ticket: u64,
    pub from_deg: f64,
    pub to_deg: f64,
    pub duration_ms: u32,
    pub easing: PwStr,
}

/// One sector of the wheel face, sent once at mount.
#[repr(C)]
pub struct PwSectorPaint {
    pub index: u32,
    pub color: PwStr,
    pub start_deg: f64,
    pub end_deg: f64,
    pub text_angle: f64,
    pub label: PwStr,
    /// Value for the sector's `data-sector` attribute.
    pub data_sector: PwStr,
}

/// Host callback table. `ctx` is the mount target; a null `ctx` means the
/// target is missing and no wheel is built.
///
/// Every callback is optional. Strings are only valid during the call.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct PwBackend {
    pub ctx: *mut c_void,
    pub render_sector: Option<extern "C" fn(*mut c_void, *const PwSectorPaint)>,
    pub set_background: Option<extern "C" fn(*mut c_void, PwStr)>,
    pub set_button_text: Option<extern "C" fn(*mut c_void, PwStr)>,
    pub set_rotation: Option<extern "C" fn(*mut c_void, f64)>,
    pub request_frame: Option<extern "C" fn(*mut c_void, u64)>,
    pub cancel_frame: Option<extern "C" fn(*mut c_void, u64)>,
    pub animate_rotation: Option<extern "C" fn(*mut c_void, *const PwSpinAnimation)>,
    pub set_spin_enabled: Option<extern "C" fn(*mut c_void, u8)>,
    pub set_result_attr: Option<extern "C" fn(*mut c_void, PwStr)>,
    pub alert: Option<extern "C" fn(*mut c_void, PwStr)>,
    /// Result callback `(ctx, value, label)`. When null, results go to `alert`.
    pub on_result: Option<extern "C" fn(*mut c_void, PwStr, PwStr)>,
}

/// `WheelSurface` over the host callback table.
struct BackendSurface {
    b: PwBackend,
}

impl WheelSurface for BackendSurface {
    fn render_sectors(&mut self, layout: &SectorLayout, button_text: &str) {
        if let Some(f) = self.b.set_background {
            let css = layout.conic_gradient();
            f(self.b.ctx, PwStr::borrowed(&css));
        }
        if let Some(f) = self.b.render_sector {
            for p in &layout.paints {
                let paint = PwSectorPaint {
                    index: p.index as u32,
                    color: PwStr::borrowed(&p.color),
                    start_deg: p.start_deg,
                    end_deg: p.end_deg,
                    text_angle: p.text_angle,
                    label: PwStr::borrowed(&p.label),
                    data_sector: PwStr::borrowed(&p.data_sector),
                };
                f(self.b.ctx, &paint as *const PwSectorPaint);
            }
        }
        if let Some(f) = self.b.set_button_text {
            f(self.b.ctx, PwStr::borrowed(button_text));
        }
    }

    fn set_rotation(&mut self, displayed_deg: f64) {
        if let Some(f) = self.b.set_rotation {
            f(self.b.ctx, displayed_deg);
        }
    }

    fn request_frame(&mut self, ticket: FrameTicket) {
        if let Some(f) = self.b.request_frame {
            f(self.b.ctx, ticket.0);
        }
    }

    fn cancel_frame(&mut self, ticket: FrameTicket) {
        if let Some(f) = self.b.cancel_frame {
            f(self.b.ctx, ticket.0);
        }
    }

    fn animate_rotation(&mut self, animation: &SpinAnimation) {
        if let Some(f) = self.b.animate_rotation {
            let a = PwSpinAnimation {
                ticket: animation.ticket,
                from_deg: animation.from,
                to_deg: animation.to,
                duration_ms: animation.duration_ms,
                easing: PwStr::borrowed(&animation.easing),
            };
            f(self.b.ctx, &a as *const PwSpinAnimation);
        }
    }

    fn set_spin_enabled(&mut self, enabled: bool) {
        if let Some(f) = self.b.set_spin_enabled {
            f(self.b.ctx, enabled as u8);
        }
    }

    fn set_result_attr(&mut self, value: &str) {
        if let Some(f) = self.b.set_result_attr {
            f(self.b.ctx, PwStr::borrowed(value));
        }
    }

    fn alert(&mut self, text: &str) {
        if let Some(f) = self.b.alert {
            f(self.b.ctx, PwStr::borrowed(text));
        }
    }
}

/// Opaque handle exposed over FFI.
pub struct PwWheel {
    inner: WheelWidget<BackendSurface, RngSource<StdRng>>,
}

/// Numeric defaults, for hosts that want to show or tweak them.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct PwCfg {
    pub idle_velocity: f64,
    pub spin_duration_ms: u32,
    pub min_spins: u32,
    pub max_spins: u32,
}

#[no_mangle]
pub extern "C" fn pw_cfg_default() -> PwCfg {
    let d = WheelCfg::default();
    PwCfg {
        idle_velocity: d.idle_velocity,
        spin_duration_ms: d.spin_duration_ms,
        min_spins: d.min_spins,
        max_spins: d.max_spins,
    }
}

/// Full widget option defaults. Strings are static and never freed.
#[repr(C)]
pub struct PwOptions {
    pub idle_velocity: f64,
    pub spin_duration_ms: u32,
    pub min_spins: u32,
    pub max_spins: u32,
    pub easing: PwStr,
    pub color_even: PwStr,
    pub color_odd: PwStr,
    pub color_third: PwStr,
    pub btn_text: PwStr,
}

#[no_mangle]
pub extern "C" fn pw_options_default() -> PwOptions {
    let d = WheelOptions::default();
    PwOptions {
        idle_velocity: d.idle_velocity,
        spin_duration_ms: d.spin_duration,
        min_spins: d.min_spins,
        max_spins: d.max_spins,
        easing: PwStr::borrowed(DEFAULT_EASING),
        color_even: PwStr::borrowed(DEFAULT_COLOR_EVEN),
        color_odd: PwStr::borrowed(DEFAULT_COLOR_ODD),
        color_third: PwStr::borrowed(DEFAULT_COLOR_THIRD),
        btn_text: PwStr::borrowed(DEFAULT_BTN_TEXT),
    }
}

/// Rotation state snapshot.
#[repr(C)]
pub struct PwState {
    pub sector_count: u32,
    pub angular_width: f64,
    pub current_rotation: f64,
    pub spinning: u8,
}

/// Outcome of a finished spin. Value and label went through the result callback.
#[repr(C)]
pub struct PwOutcome {
    pub winning_index: u32,
    pub rotation: f64,
}

fn parse_items(raw: &str) -> Result<Vec<SectorInput>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

/// Create a wheel and start idle rotation.
///
/// - `items_json`: `[{"label": .., "value": .., "chance"?: ..}, ...]`; null means no sectors
/// - `options_json`: widget options object, may be empty or null
/// - `seed`: 0 seeds from entropy; anything else gives a reproducible wheel
///
/// Returns null when `backend.ctx` is null, a string is not UTF-8, the JSON
/// does not parse, or the options fail validation.
#[no_mangle]
pub unsafe extern "C" fn pw_wheel_new(
    items_json: PwStr,
    options_json: PwStr,
    backend: PwBackend,
    seed: u64,
    now_ms: f64,
) -> *mut PwWheel {
    let target = if backend.ctx.is_null() {
        None
    } else {
        Some(BackendSurface { b: backend })
    };

    let Some(items_raw) = items_json.json_arg() else {
        warn!("pw_wheel_new: sector list is not valid UTF-8");
        return ptr::null_mut();
    };
    let Some(options_raw) = options_json.json_arg() else {
        warn!("pw_wheel_new: options are not valid UTF-8");
        return ptr::null_mut();
    };

    let items = match parse_items(items_raw) {
        Ok(v) => v,
        Err(e) => {
            warn!("pw_wheel_new: bad sector list: {e}");
            return ptr::null_mut();
        }
    };
    let options = match WheelOptions::from_json(options_raw) {
        Ok(o) => o,
        Err(e) => {
            warn!("pw_wheel_new: {e}");
            return ptr::null_mut();
        }
    };
    let rng = if seed == 0 { RngSource::from_entropy() } else { RngSource::seeded(seed) };

    let Some(mut inner) = WheelWidget::mount(target, &items, options, rng) else {
        return ptr::null_mut();
    };

    if let Some(cb) = backend.on_result {
        let ctx = backend.ctx;
        inner.on_result(move |r: &SpinResult| {
            cb(ctx, PwStr::borrowed(&r.value), PwStr::borrowed(&r.label));
        });
    }
    inner.start(now_ms);

    Box::into_raw(Box::new(PwWheel { inner }))
}

#[no_mangle]
pub unsafe extern "C" fn pw_wheel_free(h: *mut PwWheel) {
    if !h.is_null() {
        drop(Box::from_raw(h));
    }
}

/// Deliver a frame requested through `request_frame`. Returns 1 while idle
/// rotation continues, 0 otherwise.
#[no_mangle]
pub unsafe extern "C" fn pw_wheel_frame(h: *mut PwWheel, ticket: u64, now_ms: f64) -> u8 {
    if h.is_null() {
        return 0;
    }
    let handle = &mut *h;
    handle.inner.on_frame(FrameTicket(ticket), now_ms) as u8
}

/// Trigger a spin.
///
/// Returns the spin ticket (> 0) when a spin started, 0 when one is already
/// running, or a negative error code.
#[no_mangle]
pub unsafe extern "C" fn pw_wheel_spin(h: *mut PwWheel) -> i64 {
    if h.is_null() {
        return PW_ERR_NULL as i64;
    }
    let handle = &mut *h;
    match handle.inner.spin() {
        // completion future is not usable across the ABI; the callbacks carry the result
        Ok(Some((ticket, _done))) => ticket.id() as i64,
        Ok(None) => 0,
        Err(e) => rc_for(&e) as i64,
    }
}

/// Report that the spin animation for `ticket` finished.
#[no_mangle]
pub unsafe extern "C" fn pw_wheel_spin_finished(
    h: *mut PwWheel,
    ticket: u64,
    now_ms: f64,
    out: *mut PwOutcome,
) -> i32 {
    if h.is_null() {
        return PW_ERR_NULL;
    }
    let handle = &mut *h;
    match handle.inner.finish_spin_id(ticket, now_ms) {
        Ok(outcome) => {
            if !out.is_null() {
                *out = PwOutcome {
                    winning_index: outcome.winning_index as u32,
                    rotation: handle.inner.state().current_rotation,
                };
            }
            PW_OK
        }
        Err(e) => rc_for(&e),
    }
}

#[no_mangle]
pub unsafe extern "C" fn pw_wheel_state(h: *const PwWheel) -> PwState {
    if h.is_null() {
        return PwState { sector_count: 0, angular_width: 0.0, current_rotation: 0.0, spinning: 0 };
    }
    let s = (*h).inner.state();
    PwState {
        sector_count: s.sector_count as u32,
        angular_width: s.angular_width,
        current_rotation: s.current_rotation,
        spinning: s.spinning as u8,
    }
}

/// Last winning value (`data-result`). Points into the handle; valid until
/// the next completed spin or `pw_wheel_free`.
#[no_mangle]
pub unsafe extern "C" fn pw_wheel_last_result(h: *const PwWheel) -> PwStr {
    if h.is_null() {
        return PwStr::null();
    }
    match (*h).inner.last_result() {
        Some(r) => PwStr::borrowed(&r.value),
        None => PwStr::null(),
    }
}
