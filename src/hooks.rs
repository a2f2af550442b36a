use crate::animation::FrameLoop;
use crate::config::{CANCEL_KEY, OUTSIDE_CLICK_EVENT};
use crate::dom::{self, BrowserFrames};
use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement, KeyboardEvent, Node};
use yew::prelude::*;

/// Value shown before the first target arrives; metrics count up from here.
const INITIAL_DISPLAY_VALUE: f64 = 0.0;

/// Tween towards `target` over `duration_ms`, returning the value to display
/// on this render.
///
/// A change of `target` or `duration_ms` mid-flight cancels the pending frame
/// and restarts from the value currently on screen. Unmounting cancels too.
#[hook]
pub fn use_animated_value(target: f64, duration_ms: f64) -> f64 {
    let displayed = use_state(|| INITIAL_DISPLAY_VALUE);
    let frames = {
        let displayed = displayed.clone();
        use_memo((), move |_| {
            FrameLoop::new(BrowserFrames, INITIAL_DISPLAY_VALUE, move |v| displayed.set(v))
        })
    };

    use_effect_with((target, duration_ms), move |&(target, duration_ms)| {
        frames.retarget(target, duration_ms, dom::now_ms());
        move || frames.cancel()
    });

    *displayed
}

/// Call `on_outside` for presses outside `node` while `active` is true.
///
/// The document listener exists only while active.
#[hook]
pub fn use_outside_click(node: NodeRef, active: bool, on_outside: Callback<()>) {
    use_effect_with(active, move |&active| {
        let listener = if active {
            dom::document().map(|doc| {
                EventListener::new(&doc, OUTSIDE_CLICK_EVENT, move |event: &Event| {
                    let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
                    let inside = match (node.cast::<Node>(), target) {
                        (Some(panel), Some(target)) => panel.contains(Some(&target)),
                        _ => false,
                    };
                    if !inside {
                        on_outside.emit(());
                    }
                })
            })
        } else {
            None
        };

        move || drop(listener)
    });
}

/// Call `on_cancel` when the cancel key is pressed while `active` is true.
#[hook]
pub fn use_cancel_key(active: bool, on_cancel: Callback<()>) {
    use_effect_with(active, move |&active| {
        let listener = if active {
            dom::document().map(|doc| {
                EventListener::new(&doc, "keydown", move |event: &Event| {
                    let is_cancel = event
                        .dyn_ref::<KeyboardEvent>()
                        .map(|e| e.key() == CANCEL_KEY)
                        .unwrap_or(false);
                    if is_cancel {
                        on_cancel.emit(());
                    }
                })
            })
        } else {
            None
        };

        move || drop(listener)
    });
}

/// Focus the input behind `node` whenever `active` becomes true.
#[hook]
pub fn use_focus_on(node: NodeRef, active: bool) {
    use_effect_with(active, move |&active| {
        if active {
            if let Some(input) = node.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        }
    });
}
