//! User directory behind the Users and Edit User panes.
//!
//! The two panes live in separate windows, so they share state through a [`UserDirectory`]
//! provided by [`crate::DesktopProvider`] and talk to the window manager only through the
//! [`LaunchRequestBus`]. Starting an edit takes a lock that is released when the edit window
//! closes, whether it was saved or dismissed.

use desktop_app_contract::{ContentMountContext, ItemId};
use leptos::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{user_edit_item, USER_EDIT_ITEM_ID};
use crate::launch_bus::{on_window_closed, use_launch_bus, LaunchRequestBus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub uuid: String,
    pub first: String,
    pub last: String,
    pub email: String,
    pub phone: String,
    pub cell: String,
    pub country: String,
}

impl DirectoryUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }

    fn matches(&self, needle: &str) -> bool {
        [&self.first, &self.last, &self.email, &self.country]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Field values submitted from the Edit User form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserEdits {
    pub first: String,
    pub last: String,
    pub email: String,
    pub phone: String,
    pub cell: String,
}

impl UserEdits {
    pub fn from_user(user: &DirectoryUser) -> Self {
        Self {
            first: user.first.clone(),
            last: user.last.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            cell: user.cell.clone(),
        }
    }

    /// # Errors
    ///
    /// Returns [`UserEditError::MissingField`] for a blank name and
    /// [`UserEditError::InvalidEmail`] for an address without a local part and dotted domain.
    pub fn validate(&self) -> Result<(), UserEditError> {
        if self.first.trim().is_empty() {
            return Err(UserEditError::MissingField("first name"));
        }
        if self.last.trim().is_empty() {
            return Err(UserEditError::MissingField("last name"));
        }
        let email = self.email.trim();
        let valid_email = email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        });
        if !valid_email {
            return Err(UserEditError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserEditError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("`{0}` is not a valid email address")]
    InvalidEmail(String),
    #[error("no user is selected for editing")]
    NothingSelected,
    #[error("user `{0}` no longer exists")]
    UnknownUser(String),
}

#[derive(Clone, Copy)]
pub struct UserDirectory {
    users: RwSignal<Vec<DirectoryUser>>,
    selected: RwSignal<Option<DirectoryUser>>,
    editing: RwSignal<Option<String>>,
}

impl UserDirectory {
    pub fn new(users: Vec<DirectoryUser>) -> Self {
        Self {
            users: create_rw_signal(users),
            selected: create_rw_signal(None),
            editing: create_rw_signal(None),
        }
    }

    pub fn len(&self) -> usize {
        self.users.with(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Users whose name, email, or country contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<DirectoryUser> {
        let needle = query.trim().to_lowercase();
        self.users.with(|users| {
            users
                .iter()
                .filter(|user| needle.is_empty() || user.matches(&needle))
                .cloned()
                .collect()
        })
    }

    pub fn user(&self, uuid: &str) -> Option<DirectoryUser> {
        self.users
            .with(|users| users.iter().find(|user| user.uuid == uuid).cloned())
    }

    /// Snapshot of the user being edited, taken when the edit started.
    pub fn selected(&self) -> Option<DirectoryUser> {
        self.selected.get()
    }

    /// Uuid holding the edit lock, if any.
    pub fn editing(&self) -> Option<String> {
        self.editing.get()
    }

    pub fn is_locked(&self) -> bool {
        self.editing.with(Option::is_some)
    }

    /// Takes the edit lock for `uuid` and asks for the Edit User window.
    ///
    /// Returns `false` while another edit holds the lock or when the user is gone.
    pub fn begin_edit(&self, bus: LaunchRequestBus, uuid: &str) -> bool {
        if self.is_locked_untracked() {
            return false;
        }
        let Some(user) = self.users.with_untracked(|users| {
            users.iter().find(|user| user.uuid == uuid).cloned()
        }) else {
            return false;
        };
        self.editing.set(Some(user.uuid.clone()));
        self.selected.set(Some(user));
        bus.request_open(user_edit_item());
        true
    }

    /// Applies `edits` to the selected user and asks for the edit window to close.
    ///
    /// # Errors
    ///
    /// Returns [`UserEditError`] when the form is invalid or the user vanished. Nothing is
    /// written and the window stays open in that case.
    pub fn save_edit(&self, bus: LaunchRequestBus, edits: UserEdits) -> Result<(), UserEditError> {
        let uuid = self
            .selected
            .with_untracked(|selected| selected.as_ref().map(|user| user.uuid.clone()))
            .ok_or(UserEditError::NothingSelected)?;
        edits.validate()?;

        let mut updated = None;
        self.users.update(|users| {
            if let Some(user) = users.iter_mut().find(|user| user.uuid == uuid) {
                user.first = edits.first.trim().to_string();
                user.last = edits.last.trim().to_string();
                user.email = edits.email.trim().to_string();
                user.phone = edits.phone;
                user.cell = edits.cell;
                updated = Some(user.clone());
            }
        });
        let updated = updated.ok_or(UserEditError::UnknownUser(uuid))?;
        self.selected.set(Some(updated));
        bus.request_close(ItemId::trusted(USER_EDIT_ITEM_ID));
        Ok(())
    }

    /// Removes a user. Refused while any edit holds the lock.
    pub fn delete(&self, uuid: &str) -> bool {
        if self.is_locked_untracked() {
            return false;
        }
        let mut removed = false;
        self.users.update(|users| {
            let before = users.len();
            users.retain(|user| user.uuid != uuid);
            removed = users.len() != before;
        });
        removed
    }

    pub fn release_edit(&self) {
        if self.is_locked_untracked() {
            self.editing.set(None);
        }
    }

    fn is_locked_untracked(&self) -> bool {
        self.editing.with_untracked(Option::is_some)
    }
}

/// Creates the directory, provides it as context, and releases the edit lock whenever the
/// Edit User window closes.
pub fn provide_user_directory(bus: LaunchRequestBus) -> UserDirectory {
    let directory = UserDirectory::new(seed_users());
    provide_context(directory);
    on_window_closed(bus, ItemId::trusted(USER_EDIT_ITEM_ID), move |_| {
        directory.release_edit()
    });
    directory
}

/// # Panics
///
/// Panics if called outside [`crate::DesktopProvider`].
pub fn use_user_directory() -> UserDirectory {
    use_context::<UserDirectory>().expect("UserDirectory not provided")
}

fn seed_users() -> Vec<DirectoryUser> {
    [
        ("9f1c2a40-0001", "Amelia", "Hart", "amelia.hart@example.com", "(02) 5551 0101", "0411 000 101", "Australia"),
        ("9f1c2a40-0002", "Lukas", "Brenner", "lukas.brenner@example.com", "0171-5550102", "0172-5550102", "Germany"),
        ("9f1c2a40-0003", "Chloé", "Martin", "chloe.martin@example.com", "01-55-50-01-03", "06-55-50-01-03", "France"),
        ("9f1c2a40-0004", "Mateo", "Ruiz", "mateo.ruiz@example.com", "915-550-104", "655-550-104", "Spain"),
        ("9f1c2a40-0005", "Noah", "Wilson", "noah.wilson@example.com", "(555) 010-0105", "(555) 020-0105", "United States"),
        ("9f1c2a40-0006", "Sofia", "Lindqvist", "sofia.lindqvist@example.com", "08-555 01 06", "070-555 01 06", "Sweden"),
        ("9f1c2a40-0007", "Aarav", "Patel", "aarav.patel@example.com", "022-5550-0107", "98555-00107", "India"),
        ("9f1c2a40-0008", "Emma", "Tremblay", "emma.tremblay@example.com", "514-555-0108", "438-555-0108", "Canada"),
    ]
    .into_iter()
    .map(|(uuid, first, last, email, phone, cell, country)| DirectoryUser {
        uuid: uuid.to_string(),
        first: first.to_string(),
        last: last.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        cell: cell.to_string(),
        country: country.to_string(),
    })
    .collect()
}

#[cfg(target_arch = "wasm32")]
fn confirm_delete(user: &DirectoryUser) -> bool {
    let message = format!(
        "Delete user \"{}\"?\nThis action cannot be undone.",
        user.full_name()
    );
    web_sys::window()
        .and_then(|window| window.confirm_with_message(&message).ok())
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
fn confirm_delete(_: &DirectoryUser) -> bool {
    true
}

pub(super) fn mount_users(ctx: ContentMountContext) -> View {
    view! { <UsersPane window_id=ctx.window_id /> }.into_view()
}

pub(super) fn mount_user_edit(ctx: ContentMountContext) -> View {
    view! { <UserEditPane window_id=ctx.window_id /> }.into_view()
}

#[component]
fn UsersPane(window_id: ItemId) -> impl IntoView {
    let directory = use_user_directory();
    let bus = use_launch_bus();
    let query = create_rw_signal(String::new());

    view! {
        <section class="pane pane-users" data-window-id=window_id.to_string()>
            <header class="users-toolbar">
                <input
                    type="search"
                    placeholder="Search name, email or country"
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
                <span class="users-count">{move || format!("{} users", directory.len())}</span>
            </header>
            <table class="users-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Country"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || directory.search(&query.get())
                        key=|user| user.uuid.clone()
                        let:user
                    >
                        <UserRow user=user directory=directory bus=bus />
                    </For>
                </tbody>
            </table>
        </section>
    }
}

#[component]
fn UserRow(user: DirectoryUser, directory: UserDirectory, bus: LaunchRequestBus) -> impl IntoView {
    let uuid = store_value(user.uuid.clone());
    let row = store_value(user.clone());
    let editing_this = move || uuid.with_value(|uuid| directory.editing().as_deref() == Some(uuid));

    view! {
        <tr class:editing=editing_this>
            <td>{user.full_name()}</td>
            <td>{user.email.clone()}</td>
            <td>{user.country.clone()}</td>
            <td class="users-actions">
                <button
                    disabled=move || directory.is_locked()
                    on:click=move |_| {
                        uuid.with_value(|uuid| directory.begin_edit(bus, uuid));
                    }
                >
                    "Edit"
                </button>
                <button
                    disabled=move || directory.is_locked()
                    on:click=move |_| {
                        if row.with_value(confirm_delete) {
                            uuid.with_value(|uuid| directory.delete(uuid));
                        }
                    }
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
}

#[component]
fn UserEditPane(window_id: ItemId) -> impl IntoView {
    let directory = use_user_directory();
    let bus = use_launch_bus();
    let Some(user) = directory.selected.get_untracked() else {
        return view! {
            <section class="pane pane-user-edit">
                <p>"No user selected."</p>
            </section>
        }
        .into_view();
    };

    let form = create_rw_signal(UserEdits::from_user(&user));
    let error_message = create_rw_signal(None::<String>);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if let Err(err) = directory.save_edit(bus, form.get_untracked()) {
            error_message.set(Some(err.to_string()));
        }
    };

    view! {
        <form
            class="pane pane-user-edit"
            data-window-id=window_id.to_string()
            on:submit=submit
        >
            <h2>{user.full_name()}</h2>
            <FormField label="First name" kind="text" form=form
                get={|edits| edits.first.clone()}
                set={|edits, value| edits.first = value} />
            <FormField label="Last name" kind="text" form=form
                get={|edits| edits.last.clone()}
                set={|edits, value| edits.last = value} />
            <FormField label="Email" kind="email" form=form
                get={|edits| edits.email.clone()}
                set={|edits, value| edits.email = value} />
            <FormField label="Phone" kind="tel" form=form
                get={|edits| edits.phone.clone()}
                set={|edits, value| edits.phone = value} />
            <FormField label="Cell" kind="tel" form=form
                get={|edits| edits.cell.clone()}
                set={|edits, value| edits.cell = value} />
            <Show when=move || error_message.with(Option::is_some) fallback=|| ()>
                <p class="form-error" role="alert">
                    {move || error_message.get().unwrap_or_default()}
                </p>
            </Show>
            <button type="submit">"Save"</button>
        </form>
    }
    .into_view()
}

#[component]
fn FormField(
    label: &'static str,
    kind: &'static str,
    form: RwSignal<UserEdits>,
    get: fn(&UserEdits) -> String,
    set: fn(&mut UserEdits, String),
) -> impl IntoView {
    view! {
        <label>
            {label}
            <input
                type=kind
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|edits| set(edits, value));
                }
            />
        </label>
    }
}
