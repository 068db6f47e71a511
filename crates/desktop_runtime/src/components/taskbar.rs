use super::*;
use crate::model::WindowId;
use platform_host::ClockReading;

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let clock_now = create_rw_signal(ClockReading::now());
    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(ClockReading::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }
    let clock_text = move || {
        let settings = state.with(|desktop| desktop.clock);
        clock_now
            .get()
            .format(settings.twelve_hour, settings.show_seconds)
    };

    view! {
        <footer
            class="taskbar"
            style=move || {
                state.with(|desktop| taskbar_style(desktop.metrics.taskbar_height, &desktop.theme))
            }
        >
            <button
                class="taskbar-start"
                class:active=move || state.with(|desktop| desktop.start_menu.open)
                style=move || state.with(|desktop| start_button_style(&desktop.theme))
                aria-haspopup="menu"
                on:mousedown=move |ev| ev.stop_propagation()
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_action(DesktopAction::ToggleStartMenu);
                }
            >
                "Start"
            </button>
            <StartMenu />

            <div class="taskbar-windows" role="toolbar">
                <For
                    each=move || state.get().windows
                    key=|win| win.id.clone()
                    let:win
                >
                    <TaskbarEntry window_id=win.id title=win.title icon=win.icon />
                </For>
            </div>

            <div class="taskbar-tray">
                <button
                    class="taskbar-settings"
                    aria-label="Desktop settings"
                    on:click=move |ev| {
                        stop_mouse_event(&ev);
                        open_item(runtime, catalog::settings_item());
                    }
                >
                    "⚙"
                </button>
                <time class="taskbar-clock">{clock_text}</time>
            </div>
        </footer>
    }
}

#[component]
fn TaskbarEntry(window_id: WindowId, title: String, icon: String) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let id = store_value(window_id);

    let focused = move || id.with_value(|id| state.with(|s| s.focused_window_id() == Some(id)));
    let minimized = move || {
        id.with_value(|id| state.with(|s| s.window(id).is_some_and(|win| win.minimized)))
    };

    view! {
        <button
            class="taskbar-window"
            class:active=focused
            class:minimized=minimized
            title=title.clone()
            on:click=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(DesktopAction::ToggleMinimize {
                    window_id: id.get_value(),
                });
            }
            on:contextmenu=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(DesktopAction::OpenTaskbarMenu {
                    window_id: id.get_value(),
                    pointer: pointer_from_mouse_event(&ev),
                });
            }
        >
            <img src=icon alt="" draggable="false" />
            <span>{title}</span>
        </button>
    }
}

#[component]
fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let items = store_value(catalog::start_menu_items());

    view! {
        <Show when=move || state.with(|desktop| desktop.start_menu.open) fallback=|| ()>
            <nav
                class="start-menu"
                role="menu"
                aria-label="Start menu"
                on:mousedown=move |ev| ev.stop_propagation()
            >
                <ul>
                    {move || {
                        items
                            .get_value()
                            .into_iter()
                            .map(|item| view! { <StartMenuEntry item=item /> })
                            .collect_view()
                    }}
                </ul>
                <button
                    class="start-menu-logout"
                    role="menuitem"
                    on:click=move |ev| {
                        stop_mouse_event(&ev);
                        runtime.dispatch_action(DesktopAction::Logout);
                    }
                >
                    "Log out"
                </button>
            </nav>
        </Show>
    }
}

#[component]
fn StartMenuEntry(item: AppItem) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let is_group = item.is_group();
    let label = item.label.clone();
    let icon = item.icon.clone();
    let children = store_value(item.children.clone());
    let item_id = store_value(item.id.clone());
    let entry = store_value(item);

    let expanded = Signal::derive(move || {
        item_id.with_value(|id| state.with(|s| s.start_menu.active_submenu.as_ref() == Some(id)))
    });

    view! {
        <li class="start-menu-entry" class:group=is_group class:expanded=expanded>
            <button
                role="menuitem"
                aria-haspopup=is_group.then_some("menu")
                aria-expanded=move || is_group.then(|| expanded.get().to_string())
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_action(DesktopAction::SelectMenuItem {
                        item: entry.get_value(),
                    });
                }
            >
                <img src=icon alt="" draggable="false" />
                <span>{label}</span>
            </button>
            <Show when=move || expanded.get() fallback=|| ()>
                <ul class="start-submenu" role="menu">
                    {move || {
                        children
                            .get_value()
                            .into_iter()
                            .map(|child| view! { <SubmenuEntry item=child /> })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </li>
    }
}

#[component]
fn SubmenuEntry(item: AppItem) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let label = item.label.clone();
    let icon = item.icon.clone();
    let entry = store_value(item);

    view! {
        <li class="start-menu-entry">
            <button
                role="menuitem"
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_action(DesktopAction::SelectMenuItem {
                        item: entry.get_value(),
                    });
                }
            >
                <img src=icon alt="" draggable="false" />
                <span>{label}</span>
            </button>
        </li>
    }
}
