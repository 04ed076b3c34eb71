//! Route browser component

use super::screen::{menu_entries, MenuEntry, Screen};
use anyhow::{bail, Context, Result};
use crossterm::tty::IsTty;
use iocraft::prelude::*;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;
use waypoint_core::Router;

/// Navigation requested from the keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseRequest {
    Open(String),
    Back,
    Forward,
}

/// Everything the browser needs from outside the UI
#[derive(Clone)]
pub struct BrowserContext {
    pub router: Arc<Router>,
    pub menu: Vec<MenuEntry>,
    pub initial: Screen,
    pub requests: broadcast::Sender<BrowseRequest>,
}

#[derive(Default, Props)]
pub struct BrowserProps {
    pub context: Option<BrowserContext>,
}

/// Route browser: menu on the left, mounted page on the right
#[component]
pub fn Browser(mut hooks: Hooks, props: &BrowserProps) -> impl Into<AnyElement<'static>> {
    let mut system = hooks.use_context_mut::<SystemContext>();

    let context = props.context.clone();
    let menu = context
        .as_ref()
        .map(|context| context.menu.clone())
        .unwrap_or_default();

    let screen = hooks.use_state(|| {
        context
            .as_ref()
            .map(|context| context.initial.clone())
            .unwrap_or_default()
    });
    let status = hooks.use_state(String::new);
    let selected = hooks.use_state(|| 0usize);
    let should_exit = hooks.use_state(|| false);

    // Run navigations off the key handler
    hooks.use_future({
        let context = context.clone();
        let mut screen = screen;
        let mut status = status;
        async move {
            let Some(context) = context else {
                return;
            };
            let mut rx = context.requests.subscribe();
            while let Some(request) = next_request(&mut rx).await {
                let result = match request {
                    BrowseRequest::Open(path) => context.router.push(path).await,
                    BrowseRequest::Back => context.router.back().await,
                    BrowseRequest::Forward => context.router.forward().await,
                };
                match result {
                    Ok(navigation) => {
                        screen.set(Screen::from_navigation(&navigation));
                        status.set(String::new());
                    }
                    Err(e) if e.is_superseded() => debug!("{}", e),
                    Err(e) => status.set(e.to_string()),
                }
            }
        }
    });

    hooks.use_terminal_events({
        let mut selected = selected;
        let mut should_exit = should_exit;
        let requests = context.as_ref().map(|context| context.requests.clone());
        let entries = menu.clone();
        move |event| {
            let TerminalEvent::Key(key_event) = event else {
                return;
            };
            if key_event.kind == KeyEventKind::Release {
                return;
            }
            let send = |request: BrowseRequest| {
                if let Some(requests) = &requests {
                    let _ = requests.send(request);
                }
            };

            match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => should_exit.set(true),
                KeyCode::Up if !entries.is_empty() => {
                    let current = selected.get();
                    selected.set(if current == 0 {
                        entries.len() - 1
                    } else {
                        current - 1
                    });
                }
                KeyCode::Down if !entries.is_empty() => {
                    selected.set((selected.get() + 1) % entries.len());
                }
                KeyCode::Enter => {
                    if let Some(entry) = entries.get(selected.get()) {
                        send(BrowseRequest::Open(entry.path.clone()));
                    }
                }
                KeyCode::Left | KeyCode::Backspace => send(BrowseRequest::Back),
                KeyCode::Right => send(BrowseRequest::Forward),
                _ => {}
            }
        }
    });

    if should_exit.get() {
        system.exit();
    }

    let screen = screen.read().clone();
    let status = status.read().clone();
    let selected_index = selected.get();
    let frame_title = screen
        .layouts
        .first()
        .cloned()
        .unwrap_or_else(|| "Routes".to_string());
    let content_border = if screen.in_layout() {
        BorderStyle::Round
    } else {
        BorderStyle::None
    };

    element! {
        View(
            key: "browser",
            flex_direction: FlexDirection::Column,
            width: 100pct,
            padding: 1,
        ) {
            View(flex_direction: FlexDirection::Row) {
                // Menu
                View(
                    flex_direction: FlexDirection::Column,
                    border_style: BorderStyle::Round,
                    border_color: Color::DarkGrey,
                    padding_left: 1,
                    padding_right: 1,
                    margin_right: 1,
                ) {
                    Text(content: frame_title, weight: Weight::Bold, color: Color::Cyan)
                    #(menu.iter().enumerate().map(|(index, entry)| {
                        let is_selected = index == selected_index;
                        let marker = if is_selected { "›" } else { " " };
                        element! {
                            Text(
                                content: format!("{} {}", marker, entry.label),
                                color: if is_selected { Color::Yellow } else { Color::Grey },
                            )
                        }
                    }))
                }

                // Mounted page
                View(
                    flex_direction: FlexDirection::Column,
                    flex_grow: 1.0,
                    border_style: content_border,
                    border_color: Color::Cyan,
                    padding_left: 1,
                    padding_right: 1,
                ) {
                    Text(content: screen.title.clone(), weight: Weight::Bold)
                    Text(content: screen.summary.clone())
                    View(height: 1)
                    Text(content: format!("route {}", screen.route), color: Color::Grey)
                    #(screen.params.iter().map(|(key, value)| element! {
                        Text(content: format!("{} = {}", key, value), color: Color::Yellow)
                    }))
                }
            }

            // Status line
            View(flex_direction: FlexDirection::Column, margin_top: 1) {
                Text(
                    content: format!("[{}] {}", screen.visited_at, screen.href),
                    color: Color::Green,
                )
                #((!status.is_empty()).then(|| element! {
                    Text(content: status.clone(), color: Color::Red)
                }))
                Text(
                    content: "↑/↓ select · enter open · ← back · → forward · q quit",
                    color: Color::DarkGrey,
                )
            }
        }
    }
}

/// Next navigation request. Requests dropped because the receiver lagged are
/// skipped; `None` once every sender is gone.
async fn next_request(rx: &mut broadcast::Receiver<BrowseRequest>) -> Option<BrowseRequest> {
    loop {
        match rx.recv().await {
            Ok(request) => return Some(request),
            Err(RecvError::Lagged(skipped)) => {
                debug!("Dropped {} navigation requests", skipped);
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

/// Open `start` and run the browser until the user quits
pub async fn run_browser(router: Router, start: &str) -> Result<()> {
    if !std::io::stdout().is_tty() {
        bail!("The browser needs an interactive terminal, try `waypoint routes` instead");
    }

    let router = Arc::new(router);
    let first = router
        .push(start)
        .await
        .with_context(|| format!("Could not open '{}'", start))?;

    let (requests, _) = broadcast::channel(16);
    let context = BrowserContext {
        menu: menu_entries(router.table()),
        initial: Screen::from_navigation(&first),
        router,
        requests,
    };

    // The render loop blocks its thread until exit
    tokio::task::spawn_blocking(move || {
        smol::block_on(element!(Browser(context: Some(context))).render_loop())
    })
    .await
    .context("Browser task failed")?
    .context("Browser terminal error")?;

    Ok(())
}
