//! Desktop shell UI composition and interaction surfaces.

mod menus;
mod taskbar;
mod window;

use std::time::Duration;

use desktop_app_contract::AppItem;
use leptos::*;

use self::{menus::TaskbarContextMenu, taskbar::Taskbar, window::DesktopWindow};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
use crate::{
    catalog,
    config::ThemeSettings,
    model::{PointerPosition, WindowRecord},
    reducer::DesktopAction,
};

#[component]
/// Renders the full desktop shell: icons, windows, the taskbar, and its menus.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    // Gestures keep tracking once the pointer leaves the window that started them.
    let pointer_move_listener = window_event_listener(ev::pointermove, move |ev| {
        if runtime.interaction.get_untracked().is_idle() {
            return;
        }
        runtime.dispatch_action(DesktopAction::PointerMove {
            pointer: pointer_from_pointer_event(&ev),
        });
    });
    on_cleanup(move || pointer_move_listener.remove());

    let pointer_up_listener =
        window_event_listener(ev::pointerup, move |_| end_active_pointer_interaction(runtime));
    on_cleanup(move || pointer_up_listener.remove());

    let pointer_cancel_listener = window_event_listener(ev::pointercancel, move |_| {
        end_active_pointer_interaction(runtime)
    });
    on_cleanup(move || pointer_cancel_listener.remove());

    let resize_listener = window_event_listener(ev::resize, move |_| {
        let canvas = runtime.host.with_value(|host| host.desktop_canvas());
        runtime.dispatch_action(DesktopAction::ResizeCanvas { canvas });
    });
    on_cleanup(move || resize_listener.remove());

    let outside_click_listener = window_event_listener(ev::mousedown, move |_| {
        let (start_open, taskbar_menu_open) = state.with_untracked(|desktop| {
            (desktop.start_menu.open, desktop.taskbar_menu.is_some())
        });
        if start_open {
            runtime.dispatch_action(DesktopAction::CloseStartMenu);
        }
        if taskbar_menu_open {
            runtime.dispatch_action(DesktopAction::CloseTaskbarMenu);
        }
    });
    on_cleanup(move || outside_click_listener.remove());

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            class=("gesture-active", move || !runtime.interaction.with(|ui| ui.is_idle()))
            class=("icon-shadow", move || state.with(|desktop| desktop.theme.icon_shadow))
            style=move || state.with(|desktop| desktop_style(&desktop.theme))
        >
            <DesktopIconGrid />

            <div class="desktop-window-layer">
                <For
                    each=move || state.get().windows
                    key=|win| win.id.clone()
                    let:win
                >
                    <DesktopWindow window_id=win.id />
                </For>
            </div>

            <TaskbarContextMenu />
            <Taskbar />
        </div>
    }
}

#[component]
fn DesktopIconGrid() -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <ul class="desktop-icons" role="list">
            {catalog::desktop_icons()
                .into_iter()
                .map(|item| {
                    let label = item.label.clone();
                    let icon = item.icon.clone();
                    let item = store_value(item);
                    view! {
                        <li
                            class="desktop-icon"
                            title=label.clone()
                            on:dblclick=move |ev| {
                                stop_mouse_event(&ev);
                                open_item(runtime, item.get_value());
                            }
                        >
                            <img src=icon alt="" draggable="false" />
                            <span>{label}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}

fn open_item(runtime: DesktopRuntimeContext, item: AppItem) {
    runtime.dispatch_action(DesktopAction::OpenWindow { item });
}

const TEXT_SHADOW: &str = "0 1px 3px rgba(0,0,0,0.6)";

fn desktop_style(theme: &ThemeSettings) -> String {
    let shadow = if theme.text_shadow { TEXT_SHADOW } else { "none" };
    format!(
        "background-color:{};color:{};text-shadow:{shadow};",
        theme.background_color, theme.text_color
    )
}

fn window_style(win: &WindowRecord, theme: &ThemeSettings) -> String {
    let display = if win.minimized { "display:none;" } else { "" };
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};\
         background-color:{};color:{};text-shadow:none;{display}",
        win.rect.x,
        win.rect.y,
        win.rect.w,
        win.rect.h,
        win.z_order,
        theme.window_bg_color,
        theme.window_text_color
    )
}

fn taskbar_style(height: i32, theme: &ThemeSettings) -> String {
    format!(
        "height:{height}px;background-color:{};color:{};",
        theme.taskbar_bg_color, theme.taskbar_text_color
    )
}

fn start_button_style(theme: &ThemeSettings) -> String {
    format!(
        "background-color:{};color:{};",
        theme.start_button_bg_color, theme.start_button_text_color
    )
}

fn window_class(win: &WindowRecord, focused: bool) -> String {
    let mut class = String::from("desktop-window");
    if focused {
        class.push_str(" focused");
    }
    if win.minimized {
        class.push_str(" minimized");
    }
    if win.maximized {
        class.push_str(" maximized");
    }
    class
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn pointer_from_mouse_event(ev: &web_sys::MouseEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    if !runtime.interaction.get_untracked().is_idle() {
        runtime.dispatch_action(DesktopAction::PointerUp);
    }
}
