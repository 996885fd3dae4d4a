use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Element, Node};
use yew::prelude::*;

/// Emit `on_outside` for pointer presses outside `node` while `active`.
///
/// The document listener exists only while `active` is true; it is dropped
/// when `active` turns false or the component unmounts.
#[hook]
pub fn use_click_outside(node: NodeRef, active: bool, on_outside: Callback<()>) {
    use_effect_with((node, active), move |(node, active)| {
        let listener = active.then(|| {
            let node = node.clone();
            EventListener::new(&gloo::utils::document(), "mousedown", move |event| {
                let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
                let inside = node
                    .cast::<Element>()
                    .is_some_and(|element| element.contains(target.as_ref()));
                if !inside {
                    on_outside.emit(());
                }
            })
        });
        move || drop(listener)
    });
}
