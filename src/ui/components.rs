/// Presentational components for the popup
use yew::prelude::*;

use crate::prefs::Theme;
use crate::vhost::{Host, service_icon_class};

#[derive(Properties, PartialEq)]
pub struct HostGroupProps {
    pub domain: String,
    pub hosts: Vec<Host>,
    pub collapsed: bool,
    pub on_toggle: Callback<String>,
}

/// One collapsible base-domain section with its host links
#[function_component(HostGroupSection)]
pub fn host_group_section(props: &HostGroupProps) -> Html {
    let class = if props.collapsed {
        "host-group collapsed"
    } else {
        "host-group"
    };

    let on_heading_click = {
        let on_toggle = props.on_toggle.clone();
        let domain = props.domain.clone();
        Callback::from(move |_: MouseEvent| {
            on_toggle.emit(domain.clone());
        })
    };

    html! {
        <section class={class} data-domain={props.domain.clone()}>
            <div class="group-title" onclick={on_heading_click}>
                <span>
                    {&props.domain} <small>{format!("({})", props.hosts.len())}</small>
                </span>
                <span class="icon-expand"></span>
            </div>
            <ul class="host-list">
                {for props.hosts.iter().map(|host| html! {
                    <HostRow host={host.clone()} />
                })}
            </ul>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct HostRowProps {
    pub host: Host,
}

#[function_component(HostRow)]
pub fn host_row(props: &HostRowProps) -> Html {
    let icon_class = format!("icon-service {}", service_icon_class(&props.host.name));

    html! {
        <li class="host-item">
            <a class="host-link" href={props.host.url.clone()} target="_blank">
                <div class="host-content">
                    <span class={icon_class}></span>
                    <span class="host-name">{&props.host.name}</span>
                </div>
                <span class="icon-arrow"></span>
            </a>
        </li>
    }
}

#[derive(Properties, PartialEq)]
pub struct ThemeSelectorProps {
    pub current: Theme,
    pub on_select: Callback<Theme>,
}

/// Radio-style system/light/dark selector
#[function_component(ThemeSelector)]
pub fn theme_selector(props: &ThemeSelectorProps) -> Html {
    let option = |theme: Theme| {
        let checked = props.current == theme;
        let on_click = {
            let on_select = props.on_select.clone();
            Callback::from(move |_: MouseEvent| {
                on_select.emit(theme);
            })
        };

        html! {
            <button
                role="radio"
                class={classes!("theme-option", checked.then_some("checked"))}
                aria-checked={if checked { "true" } else { "false" }}
                onclick={on_click}
            >
                {theme.label()}
            </button>
        }
    };

    html! {
        <div class="theme-toggle" role="radiogroup">
            {option(Theme::System)}
            {option(Theme::Light)}
            {option(Theme::Dark)}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusBarProps {
    pub text: String,
    pub paused: bool,
    pub on_toggle_refresh: Callback<()>,
}

/// Status line plus the pause/resume control
#[function_component(StatusBar)]
pub fn status_bar(props: &StatusBarProps) -> Html {
    let control_class = if props.paused {
        "refresh-control paused"
    } else {
        "refresh-control active"
    };
    let icon_class = if props.paused { "icon-pause" } else { "icon-sync" };

    let on_click = {
        let on_toggle = props.on_toggle_refresh.clone();
        Callback::from(move |_: MouseEvent| {
            on_toggle.emit(());
        })
    };

    html! {
        <div class="status-bar">
            <span class="status-text">{&props.text}</span>
            <button class={control_class} onclick={on_click}>
                <span class={icon_class}></span>
            </button>
        </div>
    }
}
