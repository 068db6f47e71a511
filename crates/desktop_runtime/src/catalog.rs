//! Built-in launch catalog: desktop icons, start menu entries, and the settings item.
//!
//! The window manager treats every [`ContentModule`] as opaque. The Users and Edit User panes
//! in [`users`] coordinate through the launch request bus; the rest are placeholders.

pub mod users;

use desktop_app_contract::{AppItem, ContentModule, ContentMountContext, ItemId};
use leptos::*;

use crate::runtime_context::DesktopRuntimeContext;

const ABOUT: ContentModule = ContentModule::new("about", mount_about);
const PROFILE: ContentModule = ContentModule::new("profile", mount_profile);
const USERS: ContentModule = ContentModule::new("users", users::mount_users);
const USER_EDIT: ContentModule = ContentModule::new("user-edit", users::mount_user_edit);
const UI_EXAMPLE: ContentModule = ContentModule::new("ui-example", mount_ui_example);
const SETTINGS: ContentModule = ContentModule::new("settings", mount_settings);

pub const SETTINGS_ITEM_ID: &str = "settings";
pub const USER_EDIT_ITEM_ID: &str = "user-edit";

fn profile_item() -> AppItem {
    AppItem::leaf(
        ItemId::trusted("profile"),
        "Profile",
        "assets/images/profile1.png",
        PROFILE,
    )
    .with_default_size(600, 400)
}

fn users_item() -> AppItem {
    // 0 x 0 opens maximized.
    AppItem::leaf(
        ItemId::trusted("user"),
        "Users",
        "assets/images/user1.png",
        USERS,
    )
    .with_default_size(0, 0)
}

/// Edit form for one directory user. Only the Users pane requests it, through the bus.
pub fn user_edit_item() -> AppItem {
    AppItem::leaf(
        ItemId::trusted(USER_EDIT_ITEM_ID),
        "Edit User",
        "assets/images/logo2.png",
        USER_EDIT,
    )
    .with_default_size(480, 520)
}

/// Icons on the wallpaper; double-click opens them.
pub fn desktop_icons() -> Vec<AppItem> {
    vec![profile_item(), users_item()]
}

/// Top-level start menu entries, including one submenu group.
pub fn start_menu_items() -> Vec<AppItem> {
    vec![
        AppItem::leaf(
            ItemId::trusted("about"),
            "About",
            "assets/images/about2.png",
            ABOUT,
        )
        .with_default_size(800, 500),
        profile_item(),
        users_item(),
        AppItem::group(
            ItemId::trusted("ui-example-group"),
            "UI Example",
            "assets/images/logo1.png",
            vec![
                AppItem::leaf(
                    ItemId::trusted("my-ui-example"),
                    "My UI Component",
                    "assets/images/logo1.png",
                    UI_EXAMPLE,
                )
                .with_default_size(700, 540),
                AppItem::leaf(
                    ItemId::trusted("tailwind-example"),
                    "Tailwind",
                    "assets/images/tailwind_logo.png",
                    UI_EXAMPLE,
                )
                .with_default_size(780, 600),
                AppItem::leaf(
                    ItemId::trusted("material-example"),
                    "Angular Material",
                    "assets/images/material_logo.png",
                    UI_EXAMPLE,
                )
                .with_default_size(800, 600),
            ],
        ),
    ]
}

/// Desktop settings, opened from the taskbar rather than the menu.
pub fn settings_item() -> AppItem {
    AppItem::leaf(
        ItemId::trusted(SETTINGS_ITEM_ID),
        "Desktop Settings",
        "assets/images/logo1.png",
        SETTINGS,
    )
    .with_default_size(450, 700)
}

/// Finds an item by id across icons, menu entries (groups included), settings, and the edit form.
pub fn find_item(id: &ItemId) -> Option<AppItem> {
    desktop_icons()
        .into_iter()
        .chain(start_menu_items())
        .chain([settings_item(), user_edit_item()])
        .find_map(|item| item.find(id).cloned())
}

fn mount_about(ctx: ContentMountContext) -> View {
    view! {
        <section class="pane pane-about" data-window-id=ctx.window_id.to_string()>
            <h2>{ctx.window_title}</h2>
            <p>"A desktop shell running in the browser."</p>
        </section>
    }
    .into_view()
}

/// Display name of the session the desktop was mounted with.
fn profile_name() -> String {
    use_context::<DesktopRuntimeContext>()
        .map(|runtime| runtime.host.with_value(|host| host.session().current_user()))
        .unwrap_or_else(|| platform_host::SessionGate::process_local().current_user())
        .map(|user| user.name)
        .unwrap_or_else(|| "Guest".to_string())
}

fn mount_profile(ctx: ContentMountContext) -> View {
    let name = profile_name();
    view! {
        <section class="pane pane-profile" data-window-id=ctx.window_id.to_string()>
            <h2>{name}</h2>
        </section>
    }
    .into_view()
}

fn mount_ui_example(ctx: ContentMountContext) -> View {
    view! {
        <section class="pane pane-ui-example" data-window-id=ctx.window_id.to_string()>
            <h2>{ctx.window_title}</h2>
        </section>
    }
    .into_view()
}

fn mount_settings(ctx: ContentMountContext) -> View {
    view! {
        <section class="pane pane-settings" data-window-id=ctx.window_id.to_string()>
            <h2>{ctx.window_title}</h2>
        </section>
    }
    .into_view()
}
