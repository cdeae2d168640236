use std::io;
use std::sync::Arc;

use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, EventStream, KeyCode, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        MouseEventKind, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;

use stride::api::{ApiClient, HttpRepository, Repository};
use stride::app::{App, AppMessage, Route};
use stride::auth::{resolve_session, CredentialsManager};
use stride::config::StartupConfig;
use stride::session::SessionHandle;
use stride::state::{HomeFocus, ProfileField, SendOutcome};
use stride::ui;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // Handle --version before any initialization
    if args.iter().any(|arg| arg == "--version") {
        println!("stride {VERSION}");
        return Ok(());
    }

    color_eyre::install()?;
    stride::logging::init();

    // Setup panic hook to ensure terminal cleanup on panic
    setup_panic_hook();

    let config = StartupConfig::from_env().apply_args(&args);
    info!(version = VERSION, api_url = %config.api_url, "starting stride");

    // One Tokio runtime for the pre-flight checks and the event loop
    let runtime = tokio::runtime::Runtime::new()?;

    let session = SessionHandle::new();
    let api = ApiClient::with_base_url(config.api_url.clone(), session.clone());
    let repo: Arc<dyn Repository> = Arc::new(HttpRepository::new(api));
    let credentials = CredentialsManager::new();

    // =========================================================
    // Pre-flight session check - runs BEFORE the TUI starts
    // =========================================================
    //
    // Resolving the stored token here keeps sign-in problems on the login
    // screen with a notice instead of interleaving with raw-mode output.
    let outcome = runtime.block_on(resolve_session(
        repo.as_ref(),
        &session,
        credentials.as_ref(),
        &config,
    ));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();

    // Keyboard enhancement for modern terminals (Kitty protocol).
    // Silently fails on terminals that do not support it.
    let _ = execute!(
        stdout,
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
        )
    );

    // Mouse capture is only used for scroll; clicks fall through so the
    // terminal keeps native text selection.
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableMouseCapture
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(repo, session, config, credentials, outcome);

    // Spawning the initial fetches needs the runtime context
    runtime.block_on(async {
        app.initialize();
    });

    // Main event loop
    let result = runtime.block_on(run_app(&mut terminal, &mut app));

    // Restore terminal
    restore_terminal(&mut terminal)?;

    result
}

/// Setup panic hook to restore the terminal on panic
fn setup_panic_hook() {
    use std::io::Write;
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Pop keyboard enhancement flags BEFORE disabling raw mode
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);

        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            LeaveAlternateScreen
        );
        let _ = execute!(io::stdout(), Show);

        // Hard reset of the Kitty keyboard protocol, sent AFTER leaving the
        // alternate screen. Some terminals (Ghostty) ignore the stack-based
        // pop; CSI = 0 u zeroes every enhancement flag.
        let _ = write!(io::stdout(), "\x1b[=0u");
        let _ = io::stdout().flush();

        original_hook(panic_info);
    }));
}

/// Restore terminal to normal mode
fn restore_terminal<B: ratatui::backend::Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;

    // Hard reset of the Kitty keyboard protocol, after leaving the
    // alternate screen (see setup_panic_hook)
    let _ = write!(terminal.backend_mut(), "\x1b[=0u");
    let _ = io::Write::flush(terminal.backend_mut());

    terminal.show_cursor()?;
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    // Create async event stream for keyboard input
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        // Draw only when needed (dirty flag, or a spinner is animating)
        if app.needs_redraw || app.is_busy() {
            terminal.draw(|f| {
                ui::render(f, app);
            })?;
            app.needs_redraw = false;
        }

        // 16ms tick for smooth spinner and cursor animation
        let timeout = tokio::time::sleep(std::time::Duration::from_millis(16));

        tokio::select! {
            // Animations and the undo countdown advance on the tick
            _ = timeout => {
                app.tick();
            }

            // Handle terminal events
            event_result = event_stream.next() => {
                if let Some(Ok(event)) = event_result {
                    match event {
                        Event::Resize(_, _) => {
                            app.mark_dirty();
                            continue;
                        }
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            app.mark_dirty();

                            // Global keybinds (always active)
                            if key.code == KeyCode::Char('c')
                                && key.modifiers.contains(KeyModifiers::CONTROL)
                            {
                                app.quit();
                                return Ok(());
                            }

                            match app.route {
                                // =========================================
                                // Login: paste a token, Enter to exchange
                                // =========================================
                                Route::Login => {
                                    if !app.login.is_loading {
                                        match key.code {
                                            KeyCode::Enter => {
                                                if let Some(id_token) = app.login.submit() {
                                                    app.spawn_login(id_token);
                                                }
                                            }
                                            KeyCode::Backspace => app.login.input.backspace(),
                                            KeyCode::Delete => app.login.input.delete(),
                                            KeyCode::Left => app.login.input.move_left(),
                                            KeyCode::Right => app.login.input.move_right(),
                                            KeyCode::Home => app.login.input.move_home(),
                                            KeyCode::End => app.login.input.move_end(),
                                            KeyCode::Char(c)
                                                if !key.modifiers.intersects(
                                                    KeyModifiers::CONTROL | KeyModifiers::ALT,
                                                ) =>
                                            {
                                                app.login.input.insert_char(c);
                                            }
                                            _ => {}
                                        }
                                    }
                                }

                                // =========================================
                                // Home: task list and goal list
                                // =========================================
                                Route::Home => match key.code {
                                    KeyCode::Char('q') => {
                                        app.quit();
                                        return Ok(());
                                    }
                                    KeyCode::Tab => app.home.switch_focus(),
                                    KeyCode::Up | KeyCode::Char('k') => app.home.select_prev(),
                                    KeyCode::Down | KeyCode::Char('j') => app.home.select_next(),
                                    KeyCode::Enter => match app.home.focus {
                                        HomeFocus::Tasks => {
                                            let task_id = app
                                                .home
                                                .selected_task_row()
                                                .map(|task| task.id.clone());
                                            if let Some(task_id) = task_id {
                                                app.open_task(task_id);
                                            }
                                        }
                                        HomeFocus::Goals => {
                                            let goal_id = app
                                                .home
                                                .selected_goal_row()
                                                .map(|goal| goal.id.clone());
                                            if let Some(goal_id) = goal_id {
                                                app.open_goal_tree(goal_id);
                                            }
                                        }
                                    },
                                    KeyCode::Char(' ') => {
                                        // Starting a new toggle flushes any expired one
                                        if let Some(flushed) = app.home.toggle_selected_task() {
                                            app.spawn_toggle_commit(flushed);
                                        }
                                    }
                                    KeyCode::Char('u') => app.home.undo_pending_toggle(),
                                    KeyCode::Char('c') => app.open_chat(),
                                    KeyCode::Char('p') => app.open_profile(),
                                    KeyCode::Char('r') => app.refresh_home(),
                                    _ => {}
                                },

                                // =========================================
                                // Chat: goal-building conversation
                                // =========================================
                                Route::Chat => match key.code {
                                    KeyCode::Esc => app.pop_route(),
                                    KeyCode::Enter => {
                                        let user_id = app.session.user_id();
                                        match app.chat.prepare_send(user_id) {
                                            SendOutcome::Request(request) => {
                                                app.spawn_chat_send(request);
                                            }
                                            SendOutcome::NeedsSession => {
                                                app.chat.begin_session_load();
                                                app.spawn_chat_session_load();
                                            }
                                            SendOutcome::NoOp => {}
                                        }
                                    }
                                    KeyCode::PageUp => app.chat.scroll_up(5),
                                    KeyCode::PageDown => app.chat.scroll_down(5),
                                    KeyCode::Backspace if app.chat.can_compose() => {
                                        app.chat.input.backspace();
                                    }
                                    KeyCode::Delete if app.chat.can_compose() => {
                                        app.chat.input.delete();
                                    }
                                    KeyCode::Left if app.chat.can_compose() => {
                                        app.chat.input.move_left();
                                    }
                                    KeyCode::Right if app.chat.can_compose() => {
                                        app.chat.input.move_right();
                                    }
                                    KeyCode::Home if app.chat.can_compose() => {
                                        app.chat.input.move_home();
                                    }
                                    KeyCode::End if app.chat.can_compose() => {
                                        app.chat.input.move_end();
                                    }
                                    KeyCode::Char(c)
                                        if app.chat.can_compose()
                                            && !key.modifiers.intersects(
                                                KeyModifiers::CONTROL | KeyModifiers::ALT,
                                            ) =>
                                    {
                                        app.chat.input.insert_char(c);
                                    }
                                    // Reachable once the composer is closed by a final reply
                                    KeyCode::Char('v') => {
                                        let preview_id = app.chat.goal_preview_id.clone();
                                        if let Some(preview_id) = preview_id {
                                            app.open_preview(preview_id);
                                        }
                                    }
                                    _ => {}
                                },

                                // =========================================
                                // Goal tree: outline of one goal's plan
                                // =========================================
                                Route::GoalTree { .. } => match key.code {
                                    KeyCode::Esc => app.pop_route(),
                                    KeyCode::Up | KeyCode::Char('k') => {
                                        if let Some(state) = &mut app.goal_tree {
                                            state.select_prev();
                                        }
                                    }
                                    KeyCode::Down | KeyCode::Char('j') => {
                                        if let Some(state) = &mut app.goal_tree {
                                            state.select_next();
                                        }
                                    }
                                    KeyCode::Enter => {
                                        let task_id = app
                                            .goal_tree
                                            .as_ref()
                                            .and_then(|state| state.selected_task_id());
                                        if let Some(task_id) = task_id {
                                            app.open_task(task_id);
                                        }
                                    }
                                    _ => {}
                                },

                                // =========================================
                                // Preview: proposed plan from chat, read-only
                                // =========================================
                                Route::Preview { .. } => match key.code {
                                    KeyCode::Esc => app.pop_route(),
                                    KeyCode::Up | KeyCode::Char('k') => {
                                        if let Some(state) = &mut app.preview {
                                            state.select_prev();
                                        }
                                    }
                                    KeyCode::Down | KeyCode::Char('j') => {
                                        if let Some(state) = &mut app.preview {
                                            state.select_next();
                                        }
                                    }
                                    _ => {}
                                },

                                // =========================================
                                // Task: detail view and edit form
                                // =========================================
                                Route::Task { .. } => {
                                    let editing =
                                        app.task.as_ref().is_some_and(|state| state.edit.is_some());
                                    let saving =
                                        app.task.as_ref().is_some_and(|state| state.is_saving);

                                    if editing && !saving {
                                        match key.code {
                                            KeyCode::Esc => {
                                                if let Some(state) = &mut app.task {
                                                    state.cancel_edit();
                                                }
                                            }
                                            KeyCode::Tab => {
                                                if let Some(edit) = app
                                                    .task
                                                    .as_mut()
                                                    .and_then(|state| state.edit.as_mut())
                                                {
                                                    edit.focus_next();
                                                }
                                            }
                                            KeyCode::Enter => {
                                                let staged =
                                                    app.task.as_mut().and_then(|state| {
                                                        state.save_request().map(|update| {
                                                            (state.task_id.clone(), update)
                                                        })
                                                    });
                                                if let Some((task_id, update)) = staged {
                                                    app.spawn_task_update(task_id, update);
                                                }
                                            }
                                            KeyCode::Backspace => {
                                                if let Some(edit) = app
                                                    .task
                                                    .as_mut()
                                                    .and_then(|state| state.edit.as_mut())
                                                {
                                                    edit.focused_field().backspace();
                                                }
                                            }
                                            KeyCode::Delete => {
                                                if let Some(edit) = app
                                                    .task
                                                    .as_mut()
                                                    .and_then(|state| state.edit.as_mut())
                                                {
                                                    edit.focused_field().delete();
                                                }
                                            }
                                            KeyCode::Left => {
                                                if let Some(edit) = app
                                                    .task
                                                    .as_mut()
                                                    .and_then(|state| state.edit.as_mut())
                                                {
                                                    edit.focused_field().move_left();
                                                }
                                            }
                                            KeyCode::Right => {
                                                if let Some(edit) = app
                                                    .task
                                                    .as_mut()
                                                    .and_then(|state| state.edit.as_mut())
                                                {
                                                    edit.focused_field().move_right();
                                                }
                                            }
                                            KeyCode::Home => {
                                                if let Some(edit) = app
                                                    .task
                                                    .as_mut()
                                                    .and_then(|state| state.edit.as_mut())
                                                {
                                                    edit.focused_field().move_home();
                                                }
                                            }
                                            KeyCode::End => {
                                                if let Some(edit) = app
                                                    .task
                                                    .as_mut()
                                                    .and_then(|state| state.edit.as_mut())
                                                {
                                                    edit.focused_field().move_end();
                                                }
                                            }
                                            KeyCode::Char(c)
                                                if !key.modifiers.intersects(
                                                    KeyModifiers::CONTROL | KeyModifiers::ALT,
                                                ) =>
                                            {
                                                if let Some(edit) = app
                                                    .task
                                                    .as_mut()
                                                    .and_then(|state| state.edit.as_mut())
                                                {
                                                    edit.focused_field().insert_char(c);
                                                }
                                            }
                                            _ => {}
                                        }
                                    } else if !editing {
                                        match key.code {
                                            KeyCode::Esc => app.pop_route(),
                                            KeyCode::Char('e') => {
                                                if let Some(state) = &mut app.task {
                                                    state.begin_edit();
                                                }
                                            }
                                            KeyCode::Char(' ') => {
                                                // Quiet flip: a failure leaves the shown state
                                                let staged =
                                                    app.task.as_ref().and_then(|state| {
                                                        state.toggle_done().map(|update| {
                                                            (state.task_id.clone(), update)
                                                        })
                                                    });
                                                if let Some((task_id, update)) = staged {
                                                    app.spawn_task_update(task_id, update);
                                                }
                                            }
                                            _ => {}
                                        }
                                    }
                                }

                                // =========================================
                                // Profile: account details and inline edits
                                // =========================================
                                Route::Profile => {
                                    if app.profile.edit.is_some() {
                                        if !app.profile.is_saving {
                                            match key.code {
                                                KeyCode::Esc => app.profile.cancel_edit(),
                                                KeyCode::Enter => {
                                                    if let Some(save) = app.profile.save_request() {
                                                        app.spawn_profile_save(save);
                                                    }
                                                }
                                                KeyCode::Backspace => {
                                                    if let Some(edit) = &mut app.profile.edit {
                                                        edit.input.backspace();
                                                    }
                                                }
                                                KeyCode::Delete => {
                                                    if let Some(edit) = &mut app.profile.edit {
                                                        edit.input.delete();
                                                    }
                                                }
                                                KeyCode::Left => {
                                                    if let Some(edit) = &mut app.profile.edit {
                                                        edit.input.move_left();
                                                    }
                                                }
                                                KeyCode::Right => {
                                                    if let Some(edit) = &mut app.profile.edit {
                                                        edit.input.move_right();
                                                    }
                                                }
                                                KeyCode::Home => {
                                                    if let Some(edit) = &mut app.profile.edit {
                                                        edit.input.move_home();
                                                    }
                                                }
                                                KeyCode::End => {
                                                    if let Some(edit) = &mut app.profile.edit {
                                                        edit.input.move_end();
                                                    }
                                                }
                                                KeyCode::Char(c)
                                                    if !key.modifiers.intersects(
                                                        KeyModifiers::CONTROL | KeyModifiers::ALT,
                                                    ) =>
                                                {
                                                    if let Some(edit) = &mut app.profile.edit {
                                                        edit.input.insert_char(c);
                                                    }
                                                }
                                                _ => {}
                                            }
                                        }
                                    } else {
                                        match key.code {
                                            KeyCode::Esc => app.pop_route(),
                                            KeyCode::Char('n') => {
                                                app.profile.begin_edit(ProfileField::Name);
                                            }
                                            KeyCode::Char('h') => {
                                                app.profile
                                                    .begin_edit(ProfileField::AvailableHours);
                                            }
                                            KeyCode::Char('s') => app.sign_out(),
                                            _ => {}
                                        }
                                    }
                                }
                            }
                        }
                        Event::Mouse(mouse_event) => {
                            // Scroll wheel only; clicks stay with the terminal
                            match mouse_event.kind {
                                MouseEventKind::ScrollUp => {
                                    app.mark_dirty();
                                    match app.route {
                                        Route::Chat => app.chat.scroll_up(3),
                                        Route::Home => app.home.select_prev(),
                                        Route::GoalTree { .. } => {
                                            if let Some(state) = &mut app.goal_tree {
                                                state.select_prev();
                                            }
                                        }
                                        Route::Preview { .. } => {
                                            if let Some(state) = &mut app.preview {
                                                state.select_prev();
                                            }
                                        }
                                        _ => {}
                                    }
                                }
                                MouseEventKind::ScrollDown => {
                                    app.mark_dirty();
                                    match app.route {
                                        Route::Chat => app.chat.scroll_down(3),
                                        Route::Home => app.home.select_next(),
                                        Route::GoalTree { .. } => {
                                            if let Some(state) = &mut app.goal_tree {
                                                state.select_next();
                                            }
                                        }
                                        Route::Preview { .. } => {
                                            if let Some(state) = &mut app.preview {
                                                state.select_next();
                                            }
                                        }
                                        _ => {}
                                    }
                                }
                                _ => {}
                            }
                            continue;
                        }
                        Event::Paste(text) => {
                            app.mark_dirty();
                            // Single-line fields; flatten pasted newlines
                            let text = text.replace(['\r', '\n'], " ");
                            match app.route {
                                Route::Login if !app.login.is_loading => {
                                    app.login.input.insert_str(&text);
                                }
                                Route::Chat if app.chat.can_compose() => {
                                    app.chat.input.insert_str(&text);
                                }
                                Route::Task { .. } => {
                                    let saving =
                                        app.task.as_ref().is_some_and(|state| state.is_saving);
                                    if !saving {
                                        if let Some(edit) =
                                            app.task.as_mut().and_then(|state| state.edit.as_mut())
                                        {
                                            edit.focused_field().insert_str(&text);
                                        }
                                    }
                                }
                                Route::Profile if !app.profile.is_saving => {
                                    if let Some(edit) = &mut app.profile.edit {
                                        edit.input.insert_str(&text);
                                    }
                                }
                                _ => {}
                            }
                            continue;
                        }
                        _ => {
                            // Ignore other events (focus, etc.)
                        }
                    }
                }
            }

            // Handle async messages from the spawned API calls
            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
