//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use desktop_app_contract::{AppItem, ItemId};
use thiserror::Error;

use crate::{
    model::{
        DesktopCanvas, DesktopState, DragSession, InteractionState, PointerPosition,
        ResizeSession, TaskbarMenu, WindowId, WindowRecord,
    },
    window_manager::{
        cascade_rect, clamp_drag_origin, focus_window_internal, maximized_rect, next_z_order,
        refit_maximized_windows, resize_extent,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a window for `item`, or focus the one already open for it.
    OpenWindow {
        /// Catalog item to launch.
        item: AppItem,
    },
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Raise a window above all others.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Taskbar click: restore and raise a minimized window, minimize otherwise.
    ToggleMinimize {
        /// Window associated with the taskbar entry.
        window_id: WindowId,
    },
    /// Maximize to the canvas, or restore the pre-maximize rectangle.
    ToggleMaximize {
        /// Window to toggle.
        window_id: WindowId,
    },
    /// Begin dragging a window by its title bar.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Begin resizing a window from its bottom-right handle.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Pointer moved anywhere on the canvas.
    PointerMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// Pointer released anywhere; ends any gesture.
    PointerUp,
    /// The desktop canvas changed size.
    ResizeCanvas {
        /// New canvas size.
        canvas: DesktopCanvas,
    },
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu and any expanded submenu.
    CloseStartMenu,
    /// Activate a start menu entry (group or leaf).
    SelectMenuItem {
        /// Selected entry.
        item: AppItem,
    },
    /// Open the context menu of a taskbar entry.
    OpenTaskbarMenu {
        /// Window whose entry was right-clicked.
        window_id: WindowId,
        /// Click position used to place the menu.
        pointer: PointerPosition,
    },
    /// Close the taskbar context menu.
    CloseTaskbarMenu,
    /// End the user session. Windows are left untouched.
    Logout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Publish a close notification for this window on the launch bus.
    WindowClosed(WindowId),
    /// Clear the session and leave the desktop.
    EndSession,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Lookup misses reported by [`reduce_desktop`]. State is never modified when one is returned.
pub enum ReducerError {
    /// The target window id was not found in the current state.
    #[error("window `{0}` not found")]
    WindowNotFound(WindowId),
    /// The item has no content to host (for example a submenu group).
    #[error("item `{0}` has no content to open")]
    NotLaunchable(ItemId),
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError`] when an action targets a window that is not open or an item that
/// cannot be launched. Callers treat both as no-ops.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow { item } => open_window(state, item)?,
        DesktopAction::CloseWindow { window_id } => {
            let index = window_index(state, &window_id)?;
            state.windows.remove(index);
            if interaction
                .dragging
                .as_ref()
                .is_some_and(|session| session.window_id == window_id)
            {
                interaction.dragging = None;
            }
            if interaction
                .resizing
                .as_ref()
                .is_some_and(|session| session.window_id == window_id)
            {
                interaction.resizing = None;
            }
            if state
                .taskbar_menu
                .as_ref()
                .is_some_and(|menu| menu.window_id == window_id)
            {
                state.taskbar_menu = None;
            }
            effects.push(RuntimeEffect::WindowClosed(window_id));
        }
        DesktopAction::FocusWindow { window_id } => {
            window_index(state, &window_id)?;
            focus_window_internal(state, &window_id);
        }
        DesktopAction::MinimizeWindow { window_id } => {
            find_window_mut(state, &window_id)?.minimized = true;
        }
        DesktopAction::ToggleMinimize { window_id } => {
            let window = find_window_mut(state, &window_id)?;
            if window.minimized {
                window.minimized = false;
                focus_window_internal(state, &window_id);
            } else {
                window.minimized = true;
            }
        }
        DesktopAction::ToggleMaximize { window_id } => {
            let full = maximized_rect(&state.metrics, state.canvas);
            let window = find_window_mut(state, &window_id)?;
            if window.maximized {
                window.rect = window.restore_rect;
                window.maximized = false;
            } else {
                window.restore_rect = window.rect;
                window.rect = full;
                window.maximized = true;
            }
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let window = find_window_mut(state, &window_id)?;
            let (maximized, rect_start) = (window.maximized, window.rect);
            // A title-bar press always raises; only the drag is skipped.
            focus_window_internal(state, &window_id);
            if maximized || interaction.resizing.is_some() {
                return Ok(effects);
            }
            interaction.dragging = Some(DragSession {
                window_id,
                pointer_start: pointer,
                rect_start,
            });
        }
        DesktopAction::BeginResize { window_id, pointer } => {
            let window = find_window_mut(state, &window_id)?;
            if window.maximized {
                return Ok(effects);
            }
            interaction.dragging = None;
            interaction.resizing = Some(ResizeSession {
                window_id,
                pointer_start: pointer,
                rect_start: window.rect,
            });
        }
        DesktopAction::PointerMove { pointer } => {
            if let Some(session) = interaction.dragging.as_ref() {
                let metrics = state.metrics;
                let canvas = state.canvas;
                let raw_x = session
                    .rect_start
                    .x
                    .saturating_add(pointer.x.saturating_sub(session.pointer_start.x));
                let raw_y = session
                    .rect_start
                    .y
                    .saturating_add(pointer.y.saturating_sub(session.pointer_start.y));
                // Closing the window drops its session, so a miss here is a maximized target.
                if let Some(window) = state
                    .windows
                    .iter_mut()
                    .find(|w| w.id == session.window_id && !w.maximized)
                {
                    window.rect = clamp_drag_origin(&metrics, canvas, window.rect, raw_x, raw_y);
                }
            }
            if let Some(session) = interaction.resizing.as_ref() {
                let metrics = state.metrics;
                let dx = pointer.x.saturating_sub(session.pointer_start.x);
                let dy = pointer.y.saturating_sub(session.pointer_start.y);
                if let Some(window) = state
                    .windows
                    .iter_mut()
                    .find(|w| w.id == session.window_id && !w.maximized)
                {
                    let resized = resize_extent(&metrics, session.rect_start, dx, dy);
                    window.rect.w = resized.w;
                    window.rect.h = resized.h;
                }
            }
        }
        DesktopAction::PointerUp => {
            interaction.dragging = None;
            interaction.resizing = None;
        }
        DesktopAction::ResizeCanvas { canvas } => {
            state.canvas = canvas;
            refit_maximized_windows(state);
        }
        DesktopAction::ToggleStartMenu => {
            if state.start_menu.open {
                state.start_menu.close();
            } else {
                state.start_menu.open = true;
            }
        }
        DesktopAction::CloseStartMenu => state.start_menu.close(),
        DesktopAction::SelectMenuItem { item } => {
            if item.is_group() {
                let submenu = &mut state.start_menu.active_submenu;
                *submenu = match submenu.take() {
                    Some(current) if current == item.id => None,
                    _ => Some(item.id),
                };
            } else {
                state.start_menu.active_submenu = None;
                open_window(state, item)?;
            }
        }
        DesktopAction::OpenTaskbarMenu { window_id, pointer } => {
            window_index(state, &window_id)?;
            state.taskbar_menu = Some(TaskbarMenu {
                window_id,
                x: pointer.x,
                y: pointer.y,
            });
        }
        DesktopAction::CloseTaskbarMenu => state.taskbar_menu = None,
        DesktopAction::Logout => effects.push(RuntimeEffect::EndSession),
    }

    Ok(effects)
}

fn open_window(state: &mut DesktopState, item: AppItem) -> Result<(), ReducerError> {
    let Some(content) = item.content else {
        return Err(ReducerError::NotLaunchable(item.id));
    };

    if let Some(existing) = state.windows.iter_mut().find(|w| w.id == item.id) {
        existing.minimized = false;
        focus_window_internal(state, &item.id);
        state.start_menu.close();
        return Ok(());
    }

    let restore_rect = cascade_rect(&state.metrics, state.windows.len(), &item);
    let maximized = item.opens_maximized();
    let rect = if maximized {
        maximized_rect(&state.metrics, state.canvas)
    } else {
        restore_rect
    };
    let z_order = next_z_order(state);
    state.windows.push(WindowRecord {
        id: item.id,
        title: item.label,
        icon: item.icon,
        content,
        rect,
        restore_rect,
        z_order,
        minimized: false,
        maximized,
    });
    state.start_menu.close();
    Ok(())
}

fn window_index(state: &DesktopState, window_id: &WindowId) -> Result<usize, ReducerError> {
    state
        .windows
        .iter()
        .position(|w| &w.id == window_id)
        .ok_or_else(|| ReducerError::WindowNotFound(window_id.clone()))
}

fn find_window_mut<'a>(
    state: &'a mut DesktopState,
    window_id: &WindowId,
) -> Result<&'a mut WindowRecord, ReducerError> {
    state
        .windows
        .iter_mut()
        .find(|w| &w.id == window_id)
        .ok_or_else(|| ReducerError::WindowNotFound(window_id.clone()))
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{ContentModule, ContentMountContext};
    use leptos::{IntoView, View};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowRect;

    fn blank(_: ContentMountContext) -> View {
        ().into_view()
    }

    fn item(id: &str, width: i32, height: i32) -> AppItem {
        AppItem::leaf(
            ItemId::trusted(id),
            id.to_uppercase(),
            format!("{id}.png"),
            ContentModule::new("blank", blank),
        )
        .with_default_size(width, height)
    }

    fn id(raw: &str) -> WindowId {
        ItemId::trusted(raw)
    }

    fn dispatch(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        action: DesktopAction,
    ) -> Vec<RuntimeEffect> {
        reduce_desktop(state, interaction, action).expect("action applies")
    }

    fn open(state: &mut DesktopState, interaction: &mut InteractionState, item: AppItem) {
        dispatch(state, interaction, DesktopAction::OpenWindow { item });
    }

    fn window<'a>(state: &'a DesktopState, raw: &str) -> &'a WindowRecord {
        state.window(&id(raw)).expect("window open")
    }

    fn pointer(x: i32, y: i32) -> PointerPosition {
        PointerPosition { x, y }
    }

    #[test]
    fn open_creates_window_at_cascade_origin() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        open(&mut state, &mut interaction, item("about", 800, 500));

        assert_eq!(state.windows.len(), 1);
        let about = window(&state, "about");
        assert_eq!(about.z_order, 0);
        assert!(!about.maximized);
        assert!(!about.minimized);
        assert_eq!(
            about.rect,
            WindowRect {
                x: 80,
                y: 60,
                w: 800,
                h: 500
            }
        );
        assert_eq!(about.title, "ABOUT");
    }

    #[test]
    fn reopening_focuses_and_unminimizes_instead_of_duplicating() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        open(&mut state, &mut interaction, item("about", 800, 500));
        open(&mut state, &mut interaction, item("profile", 600, 400));
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow {
                window_id: id("about"),
            },
        );
        open(&mut state, &mut interaction, item("about", 800, 500));

        assert_eq!(state.windows.len(), 2);
        let about = window(&state, "about");
        assert!(!about.minimized);
        assert!(about.z_order > window(&state, "profile").z_order);
    }

    #[test]
    fn cascade_offsets_each_new_window() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        open(&mut state, &mut interaction, item("a", 400, 300));
        open(&mut state, &mut interaction, item("b", 400, 300));
        open(&mut state, &mut interaction, item("c", 400, 300));

        let c = window(&state, "c");
        assert_eq!((c.rect.x, c.rect.y), (140, 120));
        assert_eq!(c.z_order, 2);
    }

    #[test]
    fn zero_default_size_opens_maximized_with_cascade_restore_rect() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        open(&mut state, &mut interaction, item("about", 800, 500));
        open(&mut state, &mut interaction, item("user", 0, 0));

        let user = window(&state, "user");
        assert!(user.maximized);
        assert_eq!(
            user.rect,
            WindowRect {
                x: 0,
                y: 0,
                w: 1280,
                h: 752
            }
        );
        assert_eq!(
            user.restore_rect,
            WindowRect {
                x: 110,
                y: 90,
                w: 800,
                h: 500
            }
        );

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                window_id: id("user"),
            },
        );
        let restored = window(&state, "user");
        assert!(!restored.maximized);
        assert_eq!(
            restored.rect,
            WindowRect {
                x: 110,
                y: 90,
                w: 800,
                h: 500
            }
        );
    }

    #[test]
    fn group_items_are_not_launchable() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let group = AppItem::group(
            ItemId::trusted("tools"),
            "Tools",
            "tools.png",
            vec![item("tool-a", 400, 300)],
        );

        let err = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow { item: group },
        )
        .unwrap_err();
        assert_eq!(err, ReducerError::NotLaunchable(id("tools")));
        assert!(state.windows.is_empty());
    }

    #[test]
    fn opening_closes_start_menu_and_submenu() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        state.start_menu.open = true;
        state.start_menu.active_submenu = Some(id("tools"));

        open(&mut state, &mut interaction, item("about", 800, 500));

        assert!(!state.start_menu.open);
        assert_eq!(state.start_menu.active_submenu, None);
    }

    #[test]
    fn open_close_sequences_keep_ids_unique() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let ids = ["a", "b", "a", "c", "b", "a", "d"];

        for (step, raw) in ids.iter().enumerate() {
            let before = state.windows.len();
            let existed = state.window(&id(raw)).is_some();
            open(&mut state, &mut interaction, item(raw, 400, 300));
            if existed {
                assert_eq!(state.windows.len(), before);
            }
            if step % 3 == 2 {
                dispatch(
                    &mut state,
                    &mut interaction,
                    DesktopAction::CloseWindow {
                        window_id: id(raw),
                    },
                );
            }
            let mut seen: Vec<_> = state.windows.iter().map(|w| w.id.clone()).collect();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), state.windows.len());
            let mut z: Vec<_> = state.windows.iter().map(|w| w.z_order).collect();
            z.sort_unstable();
            z.dedup();
            assert_eq!(z.len(), state.windows.len());
        }
    }

    #[test]
    fn close_removes_window_and_emits_notification() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("about", 800, 500));
        state.taskbar_menu = Some(TaskbarMenu {
            window_id: id("about"),
            x: 10,
            y: 700,
        });

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow {
                window_id: id("about"),
            },
        );

        assert!(state.windows.is_empty());
        assert_eq!(state.taskbar_menu, None);
        assert_eq!(effects, vec![RuntimeEffect::WindowClosed(id("about"))]);
    }

    #[test]
    fn lookups_of_missing_windows_leave_state_untouched() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("about", 800, 500));
        let before = state.clone();

        let missing = id("gone");
        for action in [
            DesktopAction::FocusWindow {
                window_id: missing.clone(),
            },
            DesktopAction::MinimizeWindow {
                window_id: missing.clone(),
            },
            DesktopAction::ToggleMinimize {
                window_id: missing.clone(),
            },
            DesktopAction::ToggleMaximize {
                window_id: missing.clone(),
            },
            DesktopAction::CloseWindow {
                window_id: missing.clone(),
            },
            DesktopAction::BeginMove {
                window_id: missing.clone(),
                pointer: pointer(0, 0),
            },
            DesktopAction::BeginResize {
                window_id: missing.clone(),
                pointer: pointer(0, 0),
            },
        ] {
            let err = reduce_desktop(&mut state, &mut interaction, action).unwrap_err();
            assert_eq!(err, ReducerError::WindowNotFound(missing.clone()));
        }
        assert_eq!(state, before);
        assert!(interaction.is_idle());
    }

    #[test]
    fn taskbar_toggle_restores_minimized_window_above_others() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 800, 500));
        open(&mut state, &mut interaction, item("b", 800, 500));
        assert!(window(&state, "b").z_order > window(&state, "a").z_order);

        let toggle = |state: &mut DesktopState, interaction: &mut InteractionState| {
            dispatch(
                state,
                interaction,
                DesktopAction::ToggleMinimize {
                    window_id: id("a"),
                },
            );
        };

        toggle(&mut state, &mut interaction);
        assert!(window(&state, "a").minimized);
        assert_eq!(state.focused_window_id(), Some(&id("b")));

        toggle(&mut state, &mut interaction);
        let a = window(&state, "a");
        assert!(!a.minimized);
        assert!(a.z_order > window(&state, "b").z_order);
        assert_eq!(state.focused_window_id(), Some(&id("a")));
    }

    #[test]
    fn focus_twice_changes_nothing() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 800, 500));
        open(&mut state, &mut interaction, item("b", 800, 500));

        let focus_a = DesktopAction::FocusWindow { window_id: id("a") };
        dispatch(&mut state, &mut interaction, focus_a.clone());
        let once = state.clone();
        dispatch(&mut state, &mut interaction, focus_a);

        assert_eq!(state, once);
        assert_eq!(state.topmost_window_id(), Some(&id("a")));
    }

    #[test]
    fn focus_does_not_unminimize() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 800, 500));
        open(&mut state, &mut interaction, item("b", 800, 500));
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: id("a") },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::FocusWindow { window_id: id("a") },
        );

        assert!(window(&state, "a").minimized);
        assert_eq!(state.topmost_window_id(), Some(&id("a")));
        assert_eq!(state.focused_window_id(), Some(&id("b")));
    }

    #[test]
    fn maximize_round_trip_restores_exact_geometry() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 640, 480));
        let original = window(&state, "a").rect;
        let toggle = DesktopAction::ToggleMaximize { window_id: id("a") };

        dispatch(&mut state, &mut interaction, toggle.clone());
        let maximized = window(&state, "a");
        assert!(maximized.maximized);
        assert_eq!(maximized.restore_rect, original);
        assert_eq!(
            maximized.rect,
            WindowRect {
                x: 0,
                y: 0,
                w: 1280,
                h: 752
            }
        );

        dispatch(&mut state, &mut interaction, toggle);
        let restored = window(&state, "a");
        assert!(!restored.maximized);
        assert_eq!(restored.rect, original);
    }

    #[test]
    fn maximize_state_survives_minimize() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 640, 480));
        let original = window(&state, "a").rect;

        for action in [
            DesktopAction::ToggleMaximize { window_id: id("a") },
            DesktopAction::ToggleMinimize { window_id: id("a") },
            DesktopAction::ToggleMinimize { window_id: id("a") },
        ] {
            dispatch(&mut state, &mut interaction, action);
        }

        let a = window(&state, "a");
        assert!(a.maximized);
        assert!(!a.minimized);
        assert_eq!(a.restore_rect, original);
    }

    #[test]
    fn drag_clamps_to_title_bar_grip() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 800, 500));
        state.windows[0].rect.x = 100;
        state.windows[0].rect.y = 100;

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id("a"),
                pointer: pointer(600, 110),
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::PointerMove {
                pointer: pointer(100, 110),
            },
        );

        assert_eq!(window(&state, "a").rect.x, -400);

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::PointerMove {
                pointer: pointer(-400, 110),
            },
        );
        let a = window(&state, "a");
        assert_eq!((a.rect.x, a.rect.y), (-680, 100));

        dispatch(&mut state, &mut interaction, DesktopAction::PointerUp);
        assert!(interaction.is_idle());
    }

    #[test]
    fn drag_sequences_stay_within_canvas_bounds() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 800, 500));
        let moves = [
            (5000, 5000),
            (-5000, -5000),
            (640, 400),
            (i32::MAX, i32::MIN),
            (-1, 9000),
        ];

        for (x, y) in moves {
            dispatch(
                &mut state,
                &mut interaction,
                DesktopAction::BeginMove {
                    window_id: id("a"),
                    pointer: pointer(0, 0),
                },
            );
            dispatch(
                &mut state,
                &mut interaction,
                DesktopAction::PointerMove {
                    pointer: pointer(x, y),
                },
            );
            dispatch(&mut state, &mut interaction, DesktopAction::PointerUp);

            let rect = window(&state, "a").rect;
            assert!((0..=716).contains(&rect.y), "y out of range: {rect:?}");
            assert!((-680..=1160).contains(&rect.x), "x out of range: {rect:?}");
        }
    }

    #[test]
    fn drag_raises_window_and_ignores_maximized() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 800, 500));
        open(&mut state, &mut interaction, item("b", 0, 0));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id("a"),
                pointer: pointer(0, 0),
            },
        );
        assert_eq!(state.topmost_window_id(), Some(&id("a")));
        dispatch(&mut state, &mut interaction, DesktopAction::PointerUp);

        let rect_before = window(&state, "b").rect;
        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id("b"),
                pointer: pointer(0, 0),
            },
        );
        assert!(effects.is_empty());
        assert!(interaction.is_idle());
        assert_eq!(window(&state, "b").rect, rect_before);
    }

    #[test]
    fn title_bar_press_raises_maximized_window_behind_others() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 0, 0));
        open(&mut state, &mut interaction, item("b", 800, 500));
        assert_eq!(state.topmost_window_id(), Some(&id("b")));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id("a"),
                pointer: pointer(300, 10),
            },
        );

        assert_eq!(state.topmost_window_id(), Some(&id("a")));
        assert!(window(&state, "a").z_order > window(&state, "b").z_order);
        assert!(window(&state, "a").maximized);
        assert!(interaction.dragging.is_none());
    }

    #[test]
    fn reopened_window_is_not_moved_by_stale_drag() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 800, 500));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id("a"),
                pointer: pointer(100, 100),
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: id("a") },
        );
        assert!(interaction.is_idle());

        open(&mut state, &mut interaction, item("a", 800, 500));
        let reopened = window(&state, "a").rect;
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::PointerMove {
                pointer: pointer(300, 300),
            },
        );

        assert_eq!(window(&state, "a").rect, reopened);
    }

    #[test]
    fn closing_other_window_keeps_resize_armed() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 800, 500));
        open(&mut state, &mut interaction, item("b", 800, 500));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: id("a"),
                pointer: pointer(0, 0),
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: id("b") },
        );

        assert!(interaction.resizing.is_some());
    }

    #[test]
    fn focus_during_drag_never_duplicates_z_order() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 800, 500));
        open(&mut state, &mut interaction, item("b", 800, 500));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id("a"),
                pointer: pointer(0, 0),
            },
        );
        for _ in 0..3 {
            dispatch(
                &mut state,
                &mut interaction,
                DesktopAction::FocusWindow { window_id: id("a") },
            );
            dispatch(
                &mut state,
                &mut interaction,
                DesktopAction::PointerMove {
                    pointer: pointer(5, 5),
                },
            );
        }

        let (a, b) = (window(&state, "a").z_order, window(&state, "b").z_order);
        assert_ne!(a, b);
        assert!(a > b);
    }

    #[test]
    fn closing_mid_drag_ends_idle_on_pointer_up() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 800, 500));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id("a"),
                pointer: pointer(0, 0),
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: id("a") },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::PointerMove {
                pointer: pointer(40, 40),
            },
        );
        dispatch(&mut state, &mut interaction, DesktopAction::PointerUp);

        assert!(state.windows.is_empty());
        assert!(interaction.is_idle());
    }

    #[test]
    fn resize_moves_only_bottom_right_corner() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 800, 500));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: id("a"),
                pointer: pointer(880, 560),
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::PointerMove {
                pointer: pointer(3000, 600),
            },
        );
        let grown = window(&state, "a").rect;
        assert_eq!(
            grown,
            WindowRect {
                x: 80,
                y: 60,
                w: 2920,
                h: 540
            }
        );

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::PointerMove {
                pointer: pointer(-20_000, -20_000),
            },
        );
        let shrunk = window(&state, "a").rect;
        assert_eq!((shrunk.w, shrunk.h), (300, 200));
        assert_eq!((shrunk.x, shrunk.y), (80, 60));

        dispatch(&mut state, &mut interaction, DesktopAction::PointerUp);
        assert!(interaction.is_idle());
    }

    #[test]
    fn resize_takes_priority_over_drag() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 800, 500));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id("a"),
                pointer: pointer(0, 0),
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: id("a"),
                pointer: pointer(0, 0),
            },
        );
        assert!(interaction.dragging.is_none());
        assert!(interaction.resizing.is_some());

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id("a"),
                pointer: pointer(0, 0),
            },
        );
        assert!(interaction.dragging.is_none());

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::PointerMove {
                pointer: pointer(50, 50),
            },
        );
        let a = window(&state, "a").rect;
        assert_eq!((a.x, a.y, a.w, a.h), (80, 60, 850, 550));
    }

    #[test]
    fn resize_ignored_while_maximized() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("user", 0, 0));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: id("user"),
                pointer: pointer(0, 0),
            },
        );
        assert!(interaction.is_idle());
    }

    #[test]
    fn canvas_resize_refits_maximized_windows_only() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 800, 500));
        open(&mut state, &mut interaction, item("user", 0, 0));
        let a_before = window(&state, "a").rect;

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::ResizeCanvas {
                canvas: DesktopCanvas {
                    width: 1920,
                    height: 1080,
                },
            },
        );

        assert_eq!(window(&state, "a").rect, a_before);
        assert_eq!(
            window(&state, "user").rect,
            WindowRect {
                x: 0,
                y: 0,
                w: 1920,
                h: 1032
            }
        );
    }

    #[test]
    fn submenu_selection_replaces_and_collapses() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let tools = AppItem::group(
            ItemId::trusted("tools"),
            "Tools",
            "tools.png",
            vec![item("tool-a", 400, 300)],
        );
        let games = AppItem::group(
            ItemId::trusted("games"),
            "Games",
            "games.png",
            vec![item("chess", 400, 300)],
        );
        dispatch(&mut state, &mut interaction, DesktopAction::ToggleStartMenu);
        assert!(state.start_menu.open);

        let select = |item: &AppItem| DesktopAction::SelectMenuItem { item: item.clone() };
        dispatch(&mut state, &mut interaction, select(&tools));
        assert_eq!(state.start_menu.active_submenu, Some(id("tools")));
        dispatch(&mut state, &mut interaction, select(&games));
        assert_eq!(state.start_menu.active_submenu, Some(id("games")));
        dispatch(&mut state, &mut interaction, select(&games));
        assert_eq!(state.start_menu.active_submenu, None);

        dispatch(&mut state, &mut interaction, select(&tools));
        dispatch(&mut state, &mut interaction, select(&tools.children[0]));
        assert!(state.window(&id("tool-a")).is_some());
        assert!(!state.start_menu.open);
        assert_eq!(state.start_menu.active_submenu, None);
    }

    #[test]
    fn close_start_menu_collapses_submenu() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        state.start_menu.open = true;
        state.start_menu.active_submenu = Some(id("tools"));

        dispatch(&mut state, &mut interaction, DesktopAction::CloseStartMenu);
        assert_eq!(state.start_menu, Default::default());

        dispatch(&mut state, &mut interaction, DesktopAction::ToggleStartMenu);
        state.start_menu.active_submenu = Some(id("tools"));
        dispatch(&mut state, &mut interaction, DesktopAction::ToggleStartMenu);
        assert_eq!(state.start_menu, Default::default());
    }

    #[test]
    fn taskbar_menu_records_click_position() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 800, 500));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::OpenTaskbarMenu {
                window_id: id("a"),
                pointer: pointer(140, 770),
            },
        );
        assert_eq!(
            state.taskbar_menu,
            Some(TaskbarMenu {
                window_id: id("a"),
                x: 140,
                y: 770
            })
        );

        dispatch(&mut state, &mut interaction, DesktopAction::CloseTaskbarMenu);
        assert_eq!(state.taskbar_menu, None);
    }

    #[test]
    fn logout_leaves_windows_alone() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, item("a", 800, 500));
        let before = state.clone();

        let effects = dispatch(&mut state, &mut interaction, DesktopAction::Logout);

        assert_eq!(effects, vec![RuntimeEffect::EndSession]);
        assert_eq!(state, before);
    }
}
