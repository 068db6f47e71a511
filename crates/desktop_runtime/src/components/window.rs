use super::*;
use crate::model::WindowId;
use desktop_app_contract::ContentMountContext;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let Some(initial) = state.with_untracked(|desktop| desktop.window(&window_id).cloned()) else {
        return ().into_view();
    };
    let id = store_value(window_id);

    let window = Signal::derive(move || id.with_value(|id| state.with(|s| s.window(id).cloned())));
    let focused = Signal::derive(move || {
        id.with_value(|id| state.with(|s| s.focused_window_id() == Some(id)))
    });

    let focus = move |_: web_sys::PointerEvent| {
        runtime.dispatch_action(DesktopAction::FocusWindow {
            window_id: id.get_value(),
        });
    };
    let minimize = move || {
        runtime.dispatch_action(DesktopAction::MinimizeWindow {
            window_id: id.get_value(),
        })
    };
    let toggle_maximize = move || {
        runtime.dispatch_action(DesktopAction::ToggleMaximize {
            window_id: id.get_value(),
        })
    };
    let close = move || {
        runtime.dispatch_action(DesktopAction::CloseWindow {
            window_id: id.get_value(),
        })
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id: id.get_value(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let begin_resize = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id: id.get_value(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let swallow_pointer = move |ev: web_sys::PointerEvent| {
        ev.prevent_default();
        ev.stop_propagation();
    };

    let body = initial.content.mount(ContentMountContext {
        window_id: initial.id.clone(),
        window_title: initial.title.clone(),
    });

    view! {
        <section
            class=move || {
                window
                    .get()
                    .map(|win| window_class(&win, focused.get()))
                    .unwrap_or_default()
            }
            style=move || {
                window
                    .get()
                    .map(|win| state.with(|desktop| window_style(&win, &desktop.theme)))
                    .unwrap_or_default()
            }
            on:pointerdown=focus
            role="dialog"
            aria-label=initial.title.clone()
        >
            <header
                class="titlebar"
                on:pointerdown=begin_move
                on:dblclick=move |ev| {
                    stop_mouse_event(&ev);
                    toggle_maximize();
                }
            >
                <img class="titlebar-icon" src=initial.icon.clone() alt="" draggable="false" />
                <span class="titlebar-title">{initial.title.clone()}</span>
                <div class="titlebar-controls">
                    <button
                        aria-label="Minimize window"
                        on:pointerdown=swallow_pointer
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            minimize();
                        }
                    >
                        "_"
                    </button>
                    <button
                        aria-label=move || {
                            if window.get().is_some_and(|win| win.maximized) {
                                "Restore window"
                            } else {
                                "Maximize window"
                            }
                        }
                        on:pointerdown=swallow_pointer
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            toggle_maximize();
                        }
                    >
                        "□"
                    </button>
                    <button
                        aria-label="Close window"
                        on:pointerdown=swallow_pointer
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            close();
                        }
                    >
                        "×"
                    </button>
                </div>
            </header>
            <div class="window-body">{body}</div>
            <Show
                when=move || window.get().is_some_and(|win| !win.maximized)
                fallback=|| ()
            >
                <div
                    class="window-resize-handle"
                    aria-hidden="true"
                    on:pointerdown=begin_resize
                />
            </Show>
        </section>
    }
    .into_view()
}
