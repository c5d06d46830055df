//! `window.setInterval` / `setTimeout` behind the session's [`Timers`] seam.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;
use yew::Callback;

use crate::error::TimerError;
use crate::state::{TimerId, TimerKind, Timers};

struct Armed {
    kind: TimerKind,
    closure: Closure<dyn FnMut()>,
}

/// Each fire is reported through `on_fire` with the id the session holds.
///
/// A cancelled timer's closure may be the one currently executing (the
/// countdown cancels itself on its last tick), so cancelled closures are
/// parked in `retired` and only dropped by [`BrowserTimers::reap`], which the
/// host calls on entry before driving the session.
pub struct BrowserTimers {
    window: Window,
    on_fire: Callback<TimerId>,
    armed: HashMap<TimerId, Armed>,
    retired: Vec<Closure<dyn FnMut()>>,
}

impl BrowserTimers {
    pub fn new(on_fire: Callback<TimerId>) -> Result<Self, TimerError> {
        let window = web_sys::window().ok_or(TimerError::NoWindow)?;
        Ok(Self {
            window,
            on_fire,
            armed: HashMap::new(),
            retired: Vec::new(),
        })
    }

    pub fn reap(&mut self) {
        self.retired.clear();
    }

    fn clear(&self, id: TimerId, kind: TimerKind) {
        match kind {
            TimerKind::Countdown { .. } => self.window.clear_interval_with_handle(id.0),
            TimerKind::Restart { .. } => self.window.clear_timeout_with_handle(id.0),
        }
    }
}

fn millis(d: Duration) -> i32 {
    i32::try_from(d.as_millis()).unwrap_or(i32::MAX)
}

impl Timers for BrowserTimers {
    fn schedule(&mut self, kind: TimerKind) -> Result<TimerId, TimerError> {
        // The handle only exists after arming, so the closure reads it from a cell.
        let slot: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));
        let closure = {
            let slot = slot.clone();
            let on_fire = self.on_fire.clone();
            Closure::wrap(Box::new(move || {
                if let Some(id) = slot.get() {
                    on_fire.emit(id);
                }
            }) as Box<dyn FnMut()>)
        };
        let handler: &js_sys::Function = closure.as_ref().unchecked_ref();
        let armed = match kind {
            TimerKind::Countdown { every } => self
                .window
                .set_interval_with_callback_and_timeout_and_arguments_0(handler, millis(every)),
            TimerKind::Restart { after } => self
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(handler, millis(after)),
        };
        let handle = armed.map_err(|err| TimerError::Schedule {
            kind: kind.label(),
            reason: format!("{err:?}"),
        })?;
        let id = TimerId(handle);
        slot.set(Some(id));
        self.armed.insert(id, Armed { kind, closure });
        tracing::debug!(?id, kind = kind.label(), "timer armed");
        Ok(id)
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(armed) = self.armed.remove(&id) {
            self.clear(id, armed.kind);
            self.retired.push(armed.closure);
        }
    }
}

impl Drop for BrowserTimers {
    fn drop(&mut self) {
        for (id, armed) in self.armed.drain() {
            match armed.kind {
                TimerKind::Countdown { .. } => self.window.clear_interval_with_handle(id.0),
                TimerKind::Restart { .. } => self.window.clear_timeout_with_handle(id.0),
            }
        }
    }
}
