//! Login route backed by the process-local session gate.

use leptos::*;
use leptos_router::*;
use platform_host::{SessionGate, SessionUser};

struct DemoAccount {
    uid: u32,
    username: &'static str,
    password: &'static str,
    name: &'static str,
}

const DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        uid: 1,
        username: "admin",
        password: "admin",
        name: "Administrator",
    },
    DemoAccount {
        uid: 2,
        username: "user",
        password: "user",
        name: "Regular User",
    },
];

/// Resolves demo credentials to a session user.
pub fn authenticate(username: &str, password: &str) -> Option<SessionUser> {
    DEMO_ACCOUNTS
        .iter()
        .find(|account| account.username == username && account.password == password)
        .map(|account| SessionUser {
            uid: account.uid,
            name: account.name.to_string(),
        })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = SessionGate::process_local();
    if session.current_user().is_some() {
        return view! { <Redirect path="/desktop" /> }.into_view();
    }

    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error_message = create_rw_signal(None::<&'static str>);
    let navigate = use_navigate();

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let (user_value, pass_value) = (username.get_untracked(), password.get_untracked());
        if user_value.trim().is_empty() || pass_value.is_empty() {
            error_message.set(Some("Username and password are required."));
            return;
        }
        let Some(user) = authenticate(user_value.trim(), &pass_value) else {
            error_message.set(Some("Invalid username or password."));
            return;
        };
        if let Err(err) = session.sign_in(&user) {
            logging::warn!("sign-in failed: {err}");
            error_message.set(Some("Could not start a session."));
            return;
        }
        navigate("/desktop", Default::default());
    };

    view! {
        <form class="login-form" on:submit=submit>
            <h1>"Webtop"</h1>
            <label>
                "Username"
                <input
                    type="text"
                    autocomplete="username"
                    prop:value=username
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Password"
                <input
                    type="password"
                    autocomplete="current-password"
                    prop:value=password
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
            </label>
            <Show when=move || error_message.get().is_some() fallback=|| ()>
                <p class="login-error" role="alert">
                    {move || error_message.get().unwrap_or_default()}
                </p>
            </Show>
            <button type="submit">"Log in"</button>
        </form>
    }
    .into_view()
}
