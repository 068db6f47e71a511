//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, and the launch
//! request bus. UI composition stays in [`crate::components`].

use leptos::*;
use platform_host::SessionGate;

use crate::{
    catalog::users::provide_user_directory,
    config::{ClockSettings, ShellMetrics, ThemeSettings},
    effect_executor,
    host::DesktopHostContext,
    launch_bus::{provide_launch_bus, LaunchRequestBus},
    model::{DesktopState, InteractionState, WindowRecord},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host services used to execute runtime side effects and measure the canvas.
    pub host: StoredValue<DesktopHostContext>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer drag/resize interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and drained by the effect executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Open/close mailboxes shared with content panes.
    pub bus: LaunchRequestBus,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Creates the runtime signals under the current reactive owner and provides the bus.
    pub fn new(
        host: DesktopHostContext,
        metrics: ShellMetrics,
        clock: ClockSettings,
        theme: ThemeSettings,
    ) -> Self {
        let mut initial = DesktopState::new(metrics, host.desktop_canvas());
        initial.clock = clock;
        initial.theme = theme;

        let host = store_value(host);
        let state = create_rw_signal(initial);
        let interaction = create_rw_signal(InteractionState::default());
        let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
        let bus = provide_launch_bus();

        let dispatch = Callback::new(move |action: DesktopAction| {
            apply_action(state, interaction, effects, action);
        });

        Self {
            host,
            state,
            interaction,
            effects,
            bus,
            dispatch,
        }
    }

    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }
}

fn apply_action(
    state: RwSignal<DesktopState>,
    interaction: RwSignal<InteractionState>,
    effects: RwSignal<Vec<RuntimeEffect>>,
    action: DesktopAction,
) {
    let mut desktop = state.get_untracked();
    let mut ui = interaction.get_untracked();

    match reduce_desktop(&mut desktop, &mut ui, action) {
        Ok(new_effects) => {
            let previous = state.get_untracked();
            if desktop != previous {
                log_window_changes(&previous.windows, &desktop.windows);
                state.set(desktop);
            }
            if ui != interaction.get_untracked() {
                interaction.set(ui);
            }
            if !new_effects.is_empty() {
                let mut queue = effects.get_untracked();
                queue.extend(new_effects);
                effects.set(queue);
            }
        }
        Err(err) => logging::debug_warn!("desktop reducer ignored action: {err}"),
    }
}

fn log_window_changes(before: &[WindowRecord], after: &[WindowRecord]) {
    if !cfg!(debug_assertions) {
        return;
    }
    for win in after.iter().filter(|w| !before.iter().any(|b| b.id == w.id)) {
        logging::log!("opened window `{}` at {:?}", win.id, win.rect);
    }
    for win in before.iter().filter(|w| !after.iter().any(|a| a.id == w.id)) {
        logging::log!("closed window `{}`", win.id);
    }
}

fn install_launch_bus_consumers(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        if let Some(item) = runtime.bus.take_open_request() {
            runtime.dispatch_action(DesktopAction::OpenWindow { item });
        }
    });
    create_effect(move |_| {
        if let Some(window_id) = runtime.bus.take_close_request() {
            runtime.dispatch_action(DesktopAction::CloseWindow { window_id });
        }
    });
}

fn install_runtime_orchestration(runtime: DesktopRuntimeContext) {
    install_launch_bus_consumers(runtime);
    effect_executor::install(runtime);
    provide_user_directory(runtime.bus);
}

#[component]
/// Provides [`DesktopRuntimeContext`] and the [`LaunchRequestBus`] to descendant components.
pub fn DesktopProvider(
    /// Placement metrics; defaults apply when omitted.
    #[prop(optional)]
    metrics: Option<ShellMetrics>,
    /// Taskbar clock format, read from the settings store by the entry layer.
    #[prop(optional)]
    clock: Option<ClockSettings>,
    /// Desktop colours, read from the settings store by the entry layer.
    #[prop(optional)]
    theme: Option<ThemeSettings>,
    /// Session gate cleared on logout. Defaults to the process-local gate.
    #[prop(optional)]
    session: Option<SessionGate>,
    children: Children,
) -> impl IntoView {
    let host = DesktopHostContext::new(session.unwrap_or_else(SessionGate::process_local));
    let runtime = DesktopRuntimeContext::new(
        host,
        metrics.unwrap_or_default(),
        clock.unwrap_or_default(),
        theme.unwrap_or_default(),
    );

    provide_context(runtime);

    install_runtime_orchestration(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
