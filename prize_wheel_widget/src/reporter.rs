use prize_wheel_core::SpinOutcome;
use serde::{Deserialize, Serialize};

use crate::surface::WheelSurface;

/// Payload handed to the result callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinResult {
    pub value: String,
    pub label: String,
}

impl From<&SpinOutcome> for SpinResult {
    fn from(o: &SpinOutcome) -> Self {
        Self {
            value: o.value.clone(),
            label: o.label.clone(),
        }
    }
}

pub type ResultCallback = Box<dyn FnMut(&SpinResult)>;

/// Surfaces every outcome: `data-result` always, then the callback or,
/// without one, the surface's blocking prompt.
#[derive(Default)]
pub struct ResultReporter {
    on_result: Option<ResultCallback>,
}

impl std::fmt::Debug for ResultReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultReporter")
            .field("has_callback", &self.on_result.is_some())
            .finish()
    }
}

impl ResultReporter {
    pub fn set_callback(&mut self, cb: ResultCallback) {
        self.on_result = Some(cb);
    }

    pub fn clear_callback(&mut self) {
        self.on_result = None;
    }

    pub fn report<S: WheelSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        outcome: &SpinOutcome,
    ) -> SpinResult {
        let result = SpinResult::from(outcome);
        surface.set_result_attr(&result.value);
        match self.on_result.as_mut() {
            Some(cb) => cb(&result),
            None => surface.alert(&result.label),
        }
        result
    }
}
