use desktop_runtime::{DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use platform_host::SessionGate;

use crate::login::LoginPage;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Webtop" />
        <Meta name="description" content="A desktop shell running in the browser." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=EntryRedirect />
                    <Route path="/login" view=LoginPage />
                    <Route path="/desktop" view=DesktopEntry />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn EntryRedirect() -> impl IntoView {
    let target = if SessionGate::process_local().current_user().is_some() {
        "/desktop"
    } else {
        "/login"
    };
    view! { <Redirect path=target /> }
}

#[component]
/// Desktop route; visitors without a session are sent to the login page.
pub fn DesktopEntry() -> impl IntoView {
    let session = SessionGate::process_local();
    if session.current_user().is_none() {
        return view! { <Redirect path="/login" /> }.into_view();
    }

    view! {
        <DesktopProvider session=session>
            <DesktopShell />
        </DesktopProvider>
    }
    .into_view()
}
