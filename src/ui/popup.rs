/// Popup UI for the DevProxy extension

use std::cell::RefCell;
use std::rc::Rc;

use patternfly_yew::prelude::*;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, SubmitEvent};
use yew::prelude::*;

use crate::collapse::CollapseState;
use crate::prefs::{
    COLLAPSED_GROUPS_KEY, REFRESH_INTERVAL_MS, THEME_KEY, Theme, VHOSTS_URL_KEY,
    resolve_vhosts_url,
};
use crate::session::{FetchOutcome, Session, ViewState};
use crate::ui::components::{HostGroupSection, StatusBar, ThemeSelector};
use crate::vhost::DomainGroup;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn fetchVhosts(url: &str) -> Result<JsValue, JsValue>;

    fn getPreference(key: &str) -> Option<String>;
    fn setPreference(key: &str, value: &str);
    fn removePreference(key: &str);

    #[wasm_bindgen(catch)]
    async fn notifyHostsChanged(notices: JsValue) -> Result<(), JsValue>;

    fn scheduleRefresh(callback: &js_sys::Function, interval_ms: u32) -> i32;
    fn cancelRefresh(handle: i32);

    fn prefersDarkMode() -> bool;
    fn applyDarkClass(dark: bool);
    fn openHelpPage();
}

/// Shape of the fetchVhosts bridge result
#[derive(Deserialize)]
struct FetchResponse {
    status: u16,
    body: String,
}

/// Handles one poll cycle needs: the session plus the UI state it drives
#[derive(Clone)]
struct PollContext {
    session: Rc<RefCell<Session>>,
    groups: UseStateHandle<Vec<DomainGroup>>,
    view: UseStateHandle<ViewState>,
}

impl PollContext {
    /// Kick off one poll cycle. A cycle already in flight makes this a
    /// no-op (the in-flight guard lives in the session).
    fn run(&self, url: String) {
        let seq = match self.session.borrow_mut().begin_fetch() {
            Some(seq) => seq,
            None => return,
        };
        self.view.set(self.session.borrow().state().clone());

        let ctx = self.clone();
        spawn_local(async move {
            let outcome = match fetchVhosts(&url).await {
                Ok(value) => match serde_wasm_bindgen::from_value::<FetchResponse>(value) {
                    Ok(resp) if (200..300).contains(&resp.status) => FetchOutcome::Body(resp.body),
                    Ok(resp) => FetchOutcome::HttpStatus(resp.status),
                    Err(e) => FetchOutcome::Network(format!("bad bridge response: {}", e)),
                },
                Err(e) => FetchOutcome::Network(format!("{:?}", e)),
            };

            let effects = ctx.session.borrow_mut().apply(seq, outcome);

            if effects.collapse_reset {
                persist_collapse(&ctx.session.borrow());
            }
            if !effects.notices.is_empty() {
                dispatch_notices(&effects.notices).await;
            }
            if let Some(groups) = effects.render {
                ctx.groups.set(groups);
            }
            ctx.view.set(ctx.session.borrow().state().clone());
        });
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let session = use_mut_ref(|| Session::new(load_collapse_state()));
    let groups = use_state_eq(Vec::<DomainGroup>::new);
    let view = use_state_eq(|| ViewState::Idle);
    let auto_refresh = use_state(|| true);
    let theme = use_state(|| Theme::from_stored(getPreference(THEME_KEY).as_deref()));
    let vhosts_url = use_state(|| resolve_vhosts_url(getPreference(VHOSTS_URL_KEY).as_deref()));
    let settings_open = use_state(|| false);
    let url_input = use_state(String::new);
    // Bumped on toggle so collapsed state changes re-render
    let collapse_version = use_state(|| 0u32);

    let poll_ctx = PollContext {
        session: session.clone(),
        groups: groups.clone(),
        view: view.clone(),
    };

    // Apply the theme whenever it changes (and on first render)
    {
        let theme = *theme;
        use_effect_with(theme, move |theme| {
            let dark = match theme {
                Theme::Dark => true,
                Theme::Light => false,
                Theme::System => prefersDarkMode(),
            };
            applyDarkClass(dark);
        });
    }

    // Periodic polling. Re-runs on pause/resume and on endpoint change,
    // firing an immediate cycle before scheduling the next ticks.
    {
        let ctx = poll_ctx.clone();
        use_effect_with(
            (*auto_refresh, (*vhosts_url).clone()),
            move |(enabled, url)| {
                let mut cleanup: Box<dyn FnOnce()> = Box::new(|| {});
                if *enabled {
                    ctx.run(url.clone());

                    let tick_ctx = ctx.clone();
                    let tick_url = url.clone();
                    let callback = Closure::<dyn Fn()>::new(move || {
                        tick_ctx.run(tick_url.clone());
                    });
                    let handle =
                        scheduleRefresh(callback.as_ref().unchecked_ref(), REFRESH_INTERVAL_MS);
                    cleanup = Box::new(move || {
                        cancelRefresh(handle);
                        drop(callback);
                    });
                }
                cleanup
            },
        );
    }

    // Pause/resume auto-refresh
    let on_toggle_refresh = {
        let auto_refresh = auto_refresh.clone();
        Callback::from(move |_| {
            auto_refresh.set(!*auto_refresh);
        })
    };

    // Theme selection; `system` removes the stored preference
    let on_select_theme = {
        let theme = theme.clone();
        Callback::from(move |choice: Theme| {
            match choice.stored_value() {
                Some(value) => setPreference(THEME_KEY, value),
                None => removePreference(THEME_KEY),
            }
            theme.set(choice);
        })
    };

    // Collapse/expand one domain group
    let on_toggle_group = {
        let session = session.clone();
        let collapse_version = collapse_version.clone();
        Callback::from(move |domain: String| {
            let encoded = session.borrow_mut().toggle_group(&domain);
            store_collapse_list(&encoded);
            collapse_version.set(*collapse_version + 1);
        })
    };

    // Settings modal
    let on_open_settings = {
        let settings_open = settings_open.clone();
        let url_input = url_input.clone();
        let vhosts_url = vhosts_url.clone();
        Callback::from(move |_| {
            url_input.set((*vhosts_url).clone());
            settings_open.set(true);
        })
    };

    let on_close_settings = {
        let settings_open = settings_open.clone();
        Callback::from(move |_| {
            settings_open.set(false);
        })
    };

    let on_url_input = {
        let url_input = url_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                url_input.set(input.value());
            }
        })
    };

    // Save settings: empty input resets to the default endpoint. The
    // vhosts_url change reruns the polling effect, so the new endpoint
    // is fetched immediately.
    let on_save_settings = {
        let settings_open = settings_open.clone();
        let url_input = url_input.clone();
        let vhosts_url = vhosts_url.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let trimmed = url_input.trim().to_string();
            if trimmed.is_empty() {
                removePreference(VHOSTS_URL_KEY);
            } else {
                setPreference(VHOSTS_URL_KEY, &trimmed);
            }
            vhosts_url.set(resolve_vhosts_url(Some(&trimmed)));
            settings_open.set(false);
        })
    };

    let on_reset_settings = {
        let url_input = url_input.clone();
        Callback::from(move |_: MouseEvent| {
            url_input.set(crate::prefs::DEFAULT_VHOSTS_URL.to_string());
        })
    };

    let on_help = Callback::from(|_: MouseEvent| {
        openHelpPage();
    });

    let status_text = match &*view {
        ViewState::Error(_) => "Refresh failed",
        _ if !*auto_refresh => "Refresh paused",
        _ => "Auto-refreshing",
    };

    let total_hosts = session.borrow().total_hosts();
    let rendered_groups = {
        let session = session.borrow();
        groups
            .iter()
            .map(|group: &DomainGroup| {
                let collapsed = session.is_collapsed(&group.domain);
                html! {
                    <HostGroupSection
                        key={group.domain.clone()}
                        domain={group.domain.clone()}
                        hosts={group.hosts.clone()}
                        collapsed={collapsed}
                        on_toggle={on_toggle_group.clone()}
                    />
                }
            })
            .collect::<Html>()
    };

    html! {
        <div class="popup">
            <header class="popup-header">
                <h1 class="popup-title">{"DevProxy"}</h1>
                <ThemeSelector current={*theme} on_select={on_select_theme} />
                <Button variant={ButtonVariant::Plain} onclick={on_help.clone()}>
                    {"Help"}
                </Button>
                <Button variant={ButtonVariant::Plain} onclick={on_open_settings}>
                    {"Settings"}
                </Button>
            </header>

            <StatusBar
                text={status_text.to_string()}
                paused={!*auto_refresh}
                on_toggle_refresh={on_toggle_refresh}
            />

            {match &*view {
                ViewState::Idle | ViewState::Fetching => html! {
                    <div class="loading-state">
                        <Spinner />
                        <p class="loading-text">{"Looking for virtual hosts..."}</p>
                    </div>
                },
                ViewState::Empty => html! {
                    <div class="no-hosts-state">
                        <p>{"No virtual hosts found"}</p>
                        <Button variant={ButtonVariant::Link} onclick={on_help}>
                            {"How do I advertise hosts?"}
                        </Button>
                    </div>
                },
                ViewState::Error(_) => html! {
                    // Keep the last good render below the error banner
                    <>
                        <Alert r#type={AlertType::Danger} title={"Refresh failed"} inline={true}>
                            {"The host list could not be refreshed. Retrying on the next cycle."}
                        </Alert>
                        if total_hosts > 0 {
                            <div class="hosts-container">
                                {rendered_groups.clone()}
                            </div>
                        }
                    </>
                },
                ViewState::Rendered => html! {
                    <div class="hosts-container">
                        {rendered_groups.clone()}
                    </div>
                },
            }}

            if *settings_open {
                <div class="settings-modal active">
                    <div class="settings-content">
                        <h2>{"Settings"}</h2>
                        <form onsubmit={on_save_settings}>
                            <label for="vhosts-url">{"vhosts.json URL"}</label>
                            <input
                                id="vhosts-url"
                                type="text"
                                value={(*url_input).clone()}
                                oninput={on_url_input}
                                placeholder={crate::prefs::DEFAULT_VHOSTS_URL}
                            />
                            <div class="settings-actions">
                                <Button variant={ButtonVariant::Secondary} onclick={on_reset_settings}>
                                    {"Reset to default"}
                                </Button>
                                <button type="submit" class="save-settings">{"Save"}</button>
                                <Button variant={ButtonVariant::Plain} onclick={on_close_settings}>
                                    {"Close"}
                                </Button>
                            </div>
                        </form>
                    </div>
                </div>
            }

            <p class="footer-popup">
                {"DevProxy v0.1.0"}
            </p>
        </div>
    }
}

/// Load the persisted collapse markers, tolerating a missing or
/// unreadable preference
fn load_collapse_state() -> CollapseState {
    match getPreference(COLLAPSED_GROUPS_KEY) {
        Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(items) => CollapseState::decode(&items),
            Err(e) => {
                log::warn!("ignoring unreadable collapse preference: {}", e);
                CollapseState::new()
            }
        },
        None => CollapseState::new(),
    }
}

fn persist_collapse(session: &Session) {
    store_collapse_list(&session.encode_collapse());
}

fn store_collapse_list(encoded: &[String]) {
    match serde_json::to_string(encoded) {
        Ok(json) => setPreference(COLLAPSED_GROUPS_KEY, &json),
        Err(e) => log::error!("failed to encode collapse preference: {}", e),
    }
}

async fn dispatch_notices(notices: &[crate::notify::Notice]) {
    match serde_wasm_bindgen::to_value(notices) {
        Ok(js) => {
            if let Err(e) = notifyHostsChanged(js).await {
                log::error!("failed to dispatch notification: {:?}", e);
            }
        }
        Err(e) => log::error!("failed to serialize notices: {}", e),
    }
}
