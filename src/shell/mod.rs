//! Shell: Terminal session, workspace chrome, and actor wiring.
//!
//! The [`Workspace`] owns the screen buffer, the view list, and the chrome
//! recovered around them: a horizontal rule with a centered yellow title on
//! the top row and a key/label menu on the bottom row. Every mutate-then-
//! render cycle runs against the workspace, and the [`Shell`] keeps it
//! behind one `Arc<Mutex<_>>` so the main loop and the resize watcher never
//! interleave: whoever holds the guard resizes, redraws, and flushes as one
//! critical section.
//!
//! The [`Shell`] itself does terminal setup (raw mode, alternate screen,
//! hidden cursor) and restores everything on drop.

use crate::actor::{InputActor, InputEvent, KeyEvent, ResizeWatcher};
use crate::buffer::{glyph, Color, ScreenBuffer};
use crate::error::GeometryError;
use crate::widget::Widget;
use crossbeam_channel::{bounded, Receiver};
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// One entry of the bottom-row menu: a key name and its action label.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Key name, drawn gray on black (e.g. `"F5"`).
    pub key: String,
    /// Action label, drawn black on gray (e.g. `"Run"`).
    pub label: String,
}

impl MenuItem {
    /// Create a menu item.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    fn len(&self) -> usize {
        self.key.chars().count() + self.label.chars().count()
    }
}

/// The screen, the views, and the chrome around them.
///
/// Generic over the view type so hosts can keep typed access to their views
/// (an enum of concrete widgets, say); the default is a plain trait object.
pub struct Workspace<V = Box<dyn Widget + Send>> {
    screen: ScreenBuffer,
    views: Vec<V>,
    active: usize,
    title: String,
    menu: Vec<MenuItem>,
    exit_item: Option<MenuItem>,
}

impl<V: Widget> Workspace<V> {
    /// Create a workspace with an empty view list.
    ///
    /// # Panics
    ///
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            screen: ScreenBuffer::new(width, height),
            views: Vec::new(),
            active: 0,
            title: String::new(),
            menu: Vec::new(),
            exit_item: None,
        }
    }

    /// The shared screen buffer.
    #[inline]
    pub const fn screen(&self) -> &ScreenBuffer {
        &self.screen
    }

    /// Set the centered title shown on the top rule.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replace the bottom-row menu.
    pub fn set_menu(&mut self, menu: Vec<MenuItem>) {
        self.menu = menu;
    }

    /// Set the right-aligned menu item (conventionally the exit key).
    pub fn set_exit_item(&mut self, item: Option<MenuItem>) {
        self.exit_item = item;
    }

    /// Append a view; returns its index. Does not change the active view.
    pub fn push_view(&mut self, view: V) -> usize {
        self.views.push(view);
        self.views.len() - 1
    }

    /// Remove and return the view at `index`, keeping the active index in
    /// range.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_view(&mut self, index: usize) -> V {
        let view = self.views.remove(index);
        if self.active >= self.views.len() {
            self.active = self.views.len().saturating_sub(1);
        }
        view
    }

    /// Number of views.
    #[inline]
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Index of the active view.
    #[inline]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// Make the view at `index` active, if it exists.
    pub fn activate(&mut self, index: usize) {
        if index < self.views.len() {
            self.active = index;
        }
    }

    /// Mutable access to the view at `index`.
    pub fn view_mut(&mut self, index: usize) -> Option<&mut V> {
        self.views.get_mut(index)
    }

    /// Mutable access to the active view.
    pub fn active_view_mut(&mut self) -> Option<&mut V> {
        self.views.get_mut(self.active)
    }

    /// Forward a key to the active view; on consumption, redraw it.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let Some(view) = self.views.get_mut(self.active) else {
            return false;
        };
        if !view.handle_key(event) {
            return false;
        }
        if let Err(e) = view.draw(&mut self.screen) {
            warn!(error = %e, "view redraw failed");
        }
        true
    }

    /// Paint the chrome and the active view.
    ///
    /// # Errors
    ///
    /// Propagates geometry errors from the active view.
    pub fn draw(&mut self) -> Result<(), GeometryError> {
        self.draw_chrome()?;
        if let Some(view) = self.views.get_mut(self.active) {
            view.draw(&mut self.screen)?;
        }
        Ok(())
    }

    /// Write the screen to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush(&self) -> io::Result<()> {
        self.screen.render()
    }

    /// The whole resize cycle: resize the screen, shift every view's bounds
    /// by the terminal delta, redraw, flush.
    ///
    /// Never returns an error. Degenerate sizes are floored at one cell,
    /// view bounds floor at zero, and draw or flush failures are logged.
    pub fn resize(&mut self, width: u16, height: u16) {
        let width = width.max(1);
        let height = height.max(1);
        let dw = i32::from(width) - i32::from(self.screen.width());
        let dh = i32::from(height) - i32::from(self.screen.height());
        if dw == 0 && dh == 0 {
            return;
        }

        self.screen.resize(width, height);
        for view in &mut self.views {
            let bounds = view.bounds();
            view.set_bounds(bounds.resized_by(dw, dh));
        }

        if let Err(e) = self.draw() {
            warn!(error = %e, "redraw after resize failed");
        }
        if let Err(e) = self.flush() {
            warn!(error = %e, "flush after resize failed");
        }
    }

    /// Title rule on the top row, key/label menu on the bottom row.
    fn draw_chrome(&mut self) -> Result<(), GeometryError> {
        let width = self.screen.width();
        let row = self.screen.height() - 1;

        self.screen.set_colors(Color::Gray, Color::Black);
        self.screen.set_cursor(0, 0)?;
        self.screen
            .write_repeat(glyph::HORIZONTAL_LINE, usize::from(width));

        let title_len = self.title.chars().count();
        if title_len > 0 && title_len <= usize::from(width) {
            let x = (width - title_len as u16) / 2;
            self.screen.set_cursor(x, 0)?;
            self.screen.set_fg(Color::Yellow);
            self.screen.write_str(&self.title);
        }

        self.screen.set_colors(Color::Gray, Color::Black);
        self.screen.set_cursor(0, row)?;
        self.screen.write_repeat('\0', usize::from(width));

        self.screen.set_cursor(0, row)?;
        for (i, item) in self.menu.iter().enumerate() {
            self.screen.set_colors(Color::Gray, Color::Black);
            if i > 0 {
                self.screen.write_char(' ');
            }
            self.screen.write_str(&item.key);
            self.screen.set_colors(Color::Black, Color::Gray);
            self.screen.write_str(&item.label);
        }

        if let Some(item) = &self.exit_item {
            let len = item.len();
            if len <= usize::from(width) {
                self.screen.set_cursor(width - len as u16, row)?;
                self.screen.set_colors(Color::Gray, Color::Black);
                self.screen.write_str(&item.key);
                self.screen.set_colors(Color::Black, Color::Gray);
                self.screen.write_str(&item.label);
            }
        }
        Ok(())
    }
}

/// Shell configuration.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Input poll timeout (how long the input thread waits before checking
    /// shutdown).
    pub input_poll_timeout: Duration,
    /// How often the resize watcher samples the terminal size.
    pub resize_poll_interval: Duration,
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            input_poll_timeout: Duration::from_millis(50),
            resize_poll_interval: crate::actor::DEFAULT_POLL_INTERVAL,
            alternate_screen: true,
        }
    }
}

/// Terminal session owning the workspace and the background actors.
pub struct Shell<V = Box<dyn Widget + Send>> {
    workspace: Arc<Mutex<Workspace<V>>>,
    events: Receiver<InputEvent>,
    input_actor: Option<InputActor>,
    resize_watcher: Option<ResizeWatcher>,
    alternate_screen: bool,
}

impl<V: Widget + Send + 'static> Shell<V> {
    /// Take over the terminal and start the actors.
    ///
    /// The workspace is resized to the current terminal size before anything
    /// is drawn; the resize watcher keeps it that way afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn start(config: &ShellConfig, workspace: Workspace<V>) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        execute!(stdout, cursor::Hide)?;
        debug!(width, height, "terminal session started");

        let mut workspace = workspace;
        workspace.resize(width, height);
        let workspace = Arc::new(Mutex::new(workspace));

        let (input_tx, events) = bounded::<InputEvent>(64);
        let input_actor = InputActor::spawn(input_tx, config.input_poll_timeout);

        let watcher_workspace = Arc::clone(&workspace);
        let resize_watcher = ResizeWatcher::spawn(config.resize_poll_interval, move |w, h| {
            match watcher_workspace.lock() {
                Ok(mut workspace) => workspace.resize(w, h),
                Err(_) => warn!("workspace lock poisoned, skipping resize"),
            }
        });

        Ok(Self {
            workspace,
            events,
            input_actor: Some(input_actor),
            resize_watcher: Some(resize_watcher),
            alternate_screen: config.alternate_screen,
        })
    }

    /// Lock the workspace, recovering from a poisoned mutex.
    pub fn workspace(&self) -> MutexGuard<'_, Workspace<V>> {
        self.workspace
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until the next input event.
    ///
    /// Returns [`InputEvent::Shutdown`] if the input actor has exited.
    pub fn next_event(&self) -> InputEvent {
        self.events.recv().unwrap_or(InputEvent::Shutdown)
    }

    /// Return the next input event without blocking, if one is pending.
    pub fn try_next_event(&self) -> Option<InputEvent> {
        self.events.try_recv().ok()
    }
}

impl<V> Drop for Shell<V> {
    fn drop(&mut self) {
        if let Some(watcher) = self.resize_watcher.take() {
            watcher.join();
        }
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }

        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        debug!("terminal session ended");
    }
}
