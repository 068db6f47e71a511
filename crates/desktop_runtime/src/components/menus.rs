use super::*;
use crate::model::WindowId;

#[component]
pub(super) fn TaskbarContextMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    view! {
        <Show when=move || state.with(|desktop| desktop.taskbar_menu.is_some()) fallback=|| ()>
            {move || {
                let Some((menu, win)) = state.with(|desktop| {
                    let menu = desktop.taskbar_menu.clone()?;
                    let win = desktop.window(&menu.window_id).cloned()?;
                    Some((menu, win))
                }) else {
                    return ().into_view();
                };
                let menu_style = format!("left:{}px;top:{}px;", menu.x, menu.y);
                let id = store_value(menu.window_id);

                view! {
                    <div
                        id="taskbar-window-context-menu"
                        class="taskbar-menu"
                        role="menu"
                        aria-label=format!("{} window menu", win.title)
                        style=menu_style
                        on:mousedown=move |ev| ev.stop_propagation()
                        on:contextmenu=move |ev| stop_mouse_event(&ev)
                    >
                        <button
                            role="menuitem"
                            class="taskbar-menu-item"
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                run_menu_action(
                                    runtime,
                                    DesktopAction::ToggleMinimize {
                                        window_id: id.get_value(),
                                    },
                                );
                            }
                        >
                            {if win.minimized { "Restore" } else { "Minimize" }}
                        </button>
                        <button
                            role="menuitem"
                            class="taskbar-menu-item"
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                run_menu_action(
                                    runtime,
                                    DesktopAction::ToggleMaximize {
                                        window_id: id.get_value(),
                                    },
                                );
                            }
                        >
                            {if win.maximized { "Restore size" } else { "Maximize" }}
                        </button>
                        <button
                            role="menuitem"
                            class="taskbar-menu-item"
                            on:click=move |ev| {
                                stop_mouse_event(&ev);
                                close_from_menu(runtime, id.get_value());
                            }
                        >
                            "Close"
                        </button>
                    </div>
                }
                    .into_view()
            }}
        </Show>
    }
}

fn run_menu_action(runtime: DesktopRuntimeContext, action: DesktopAction) {
    runtime.dispatch_action(action);
    runtime.dispatch_action(DesktopAction::CloseTaskbarMenu);
}

// Closing the target window also clears the menu.
fn close_from_menu(runtime: DesktopRuntimeContext, window_id: WindowId) {
    runtime.dispatch_action(DesktopAction::CloseWindow { window_id });
}
