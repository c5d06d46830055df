use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use web_sys::TouchEvent;
use yew::prelude::*;

use super::{countdown_display::CountdownDisplay, debug_line::DebugLine};
use crate::browser::BrowserTimers;
use crate::config::SessionConfig;
use crate::error::TimerError;
use crate::model::Mode;
use crate::state::{Circle, RenderSnapshot, TimerId, TouchSession, changed_points};
use crate::util::browser_seed;

type Session = TouchSession<StdRng>;

#[derive(Properties, PartialEq, Clone)]
pub struct TouchViewProps {
    pub mode: Mode,
    pub config: Rc<SessionConfig>,
    pub to_menu: Callback<()>,
}

/// Runs one transition against the live timers and publishes the new snapshot.
fn drive(
    session: &RefCell<Session>,
    timers: &RefCell<Option<BrowserTimers>>,
    snapshot: &UseStateHandle<RenderSnapshot>,
    step: impl FnOnce(&mut Session, &mut BrowserTimers) -> Result<(), TimerError>,
) {
    let mut timers = timers.borrow_mut();
    let Some(timers) = timers.as_mut() else {
        tracing::warn!("touch screen has no timers, event dropped");
        return;
    };
    timers.reap();
    let mut session = session.borrow_mut();
    if let Err(err) = step(&mut *session, timers) {
        tracing::error!(%err, "session transition failed");
    }
    snapshot.set(session.snapshot());
}

fn circle_style(c: &Circle) -> String {
    let border = match &c.border {
        Some(b) => format!("border:{}px solid {};", b.width, b.color),
        None => String::new(),
    };
    format!(
        "position:absolute; left:{}px; top:{}px; width:{}px; height:{}px; border-radius:50%; opacity:0.9; background:{}; box-sizing:border-box; pointer-events:none; {}",
        c.x - c.radius,
        c.y - c.radius,
        c.radius * 2.0,
        c.radius * 2.0,
        c.fill,
        border
    )
}

#[function_component(TouchView)]
pub fn touch_view(props: &TouchViewProps) -> Html {
    let session = {
        let mode = props.mode;
        let config = (*props.config).clone();
        use_mut_ref(move || TouchSession::new(mode, config, StdRng::seed_from_u64(browser_seed())))
    };
    let timers = use_mut_ref(|| None::<BrowserTimers>);
    let snapshot = {
        let session = session.clone();
        use_state(move || session.borrow().snapshot())
    };

    // Mount: arm the timer host. Unmount: cancel whatever is still pending.
    {
        let session = session.clone();
        let timers = timers.clone();
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            let on_fire = {
                let session = session.clone();
                let timers = timers.clone();
                let snapshot = snapshot.clone();
                Callback::from(move |id: TimerId| {
                    drive(&session, &timers, &snapshot, |s, t| s.on_timer(id, t));
                })
            };
            match BrowserTimers::new(on_fire) {
                Ok(host) => *timers.borrow_mut() = Some(host),
                Err(err) => tracing::error!(%err, "timers unavailable"),
            }
            tracing::info!(mode = %session.borrow().mode(), "touch screen mounted");
            move || {
                // Taking the host out also breaks the callback -> timers cycle.
                let host = timers.borrow_mut().take();
                if let Some(mut host) = host {
                    session.borrow_mut().teardown(&mut host);
                }
            }
        });
    }

    let on_start = {
        let (session, timers, snapshot) = (session.clone(), timers.clone(), snapshot.clone());
        // Yew listens to touchstart/touchmove passively; `touch-action:none`
        // on the surface is what stops the page from scrolling.
        Callback::from(move |e: TouchEvent| {
            let points = changed_points(&e);
            drive(&session, &timers, &snapshot, |s, t| s.touch_start(&points, t));
        })
    };
    let on_move = {
        let (session, timers, snapshot) = (session.clone(), timers.clone(), snapshot.clone());
        Callback::from(move |e: TouchEvent| {
            let points = changed_points(&e);
            drive(&session, &timers, &snapshot, |s, _| {
                s.touch_move(&points);
                Ok(())
            });
        })
    };
    let on_end = {
        let (session, timers, snapshot) = (session.clone(), timers.clone(), snapshot.clone());
        Callback::from(move |e: TouchEvent| {
            e.prevent_default();
            let points = changed_points(&e);
            drive(&session, &timers, &snapshot, |s, t| {
                s.touch_end(&points, t);
                Ok(())
            });
        })
    };
    let on_cancel = {
        let (session, timers, snapshot) = (session.clone(), timers.clone(), snapshot.clone());
        Callback::from(move |e: TouchEvent| {
            let points = changed_points(&e);
            drive(&session, &timers, &snapshot, |s, t| {
                s.touch_cancel(&points, t);
                Ok(())
            });
        })
    };

    // Keep taps on the menu button from registering as a finger.
    let shield = Callback::from(|e: TouchEvent| e.stop_propagation());
    let menu_cb = {
        let cb = props.to_menu.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <div
            style="position:fixed; inset:0; background:#000; overflow:hidden; touch-action:none; user-select:none;"
            ontouchstart={on_start}
            ontouchmove={on_move}
            ontouchend={on_end}
            ontouchcancel={on_cancel}
        >
            <CountdownDisplay value={snapshot.countdown} />
            { for snapshot.circles.iter().map(|c| html! {
                <div key={c.id.to_string()} style={circle_style(c)} />
            }) }
            <DebugLine text={snapshot.debug.clone()} />
            <button
                style="position:absolute; top:12px; left:12px; padding:6px 12px; font-size:12px;"
                ontouchstart={shield.clone()}
                ontouchend={shield}
                onclick={menu_cb}
            >{"Menu"}</button>
        </div>
    }
}
