//! Window presenter
//!
//! Brings the popup to the user after a clipboard change: optional placement
//! near the cursor, show/restore + focus, then a temporary always-on-top
//! elevation that reverts after a delay.
//!
//! The reversion is a single replaceable deadline owned by the presenter and
//! polled by the pipeline loop. A newer elevation replaces the deadline, so
//! only the most recent reversion can ever run.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use super::placement::{compute_placement, nearest_display};
use super::{PopupWindow, ScreenProbe};
use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::SettingsGate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
    Minimized,
}

/// Pending "pinned on top" elevation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttentionState {
    /// Always-on-top value from before the current burst of elevations.
    restore_to: Option<bool>,
    revert_at: Option<Instant>,
}

impl AttentionState {
    pub fn is_elevated(&self) -> bool {
        self.revert_at.is_some()
    }

    pub fn revert_at(&self) -> Option<Instant> {
        self.revert_at
    }
}

pub struct WindowPresenter {
    window: Arc<dyn PopupWindow>,
    screen: Arc<dyn ScreenProbe>,
    settings: Arc<SettingsGate>,
    revert_delay: Duration,
    cursor_offset: f64,
    attention: AttentionState,
}

impl WindowPresenter {
    pub fn new(
        window: Arc<dyn PopupWindow>,
        screen: Arc<dyn ScreenProbe>,
        settings: Arc<SettingsGate>,
        revert_delay: Duration,
        cursor_offset: f64,
    ) -> Self {
        Self {
            window,
            screen,
            settings,
            revert_delay,
            cursor_offset,
            attention: AttentionState::default(),
        }
    }

    pub fn attention(&self) -> &AttentionState {
        &self.attention
    }

    pub fn revert_deadline(&self) -> Option<Instant> {
        self.attention.revert_at
    }

    /// Full attention sequence. Each step is attempted even if an earlier one
    /// failed; a destroyed window turns the whole call into a no-op.
    pub fn present(&mut self, now: Instant) {
        if !self.window.is_available() {
            log::debug!("[WindowPresenter] Window gone, skipping presentation");
            return;
        }

        if self.settings.follow_mouse_cursor() {
            if let Err(e) = self.place_near_cursor() {
                log_step_failure("position window", &e);
            }
        }

        if let Err(e) = self.reveal() {
            log_step_failure("show window", &e);
        }

        if let Err(e) = self.elevate(now) {
            log_step_failure("pin window on top", &e);
        }
    }

    /// Moves the window next to the cursor on the nearest display.
    pub fn place_near_cursor(&self) -> AppResult<()> {
        let cursor = self.screen.cursor_position()?;
        let displays = self.screen.displays()?;
        let Some(display) = nearest_display(&displays, cursor) else {
            log::warn!("[WindowPresenter] No display reported, leaving window in place");
            return Ok(());
        };

        let size = self.window.outer_size()?;
        let placement = compute_placement(cursor, size, display.work_area, self.cursor_offset);
        log::debug!(
            "[WindowPresenter] Cursor ({}, {}) -> window at ({}, {})",
            cursor.x,
            cursor.y,
            placement.x,
            placement.y
        );
        self.window.set_position(placement)
    }

    pub fn visibility(&self) -> AppResult<Visibility> {
        if !self.window.is_visible()? {
            Ok(Visibility::Hidden)
        } else if self.window.is_minimized()? {
            Ok(Visibility::Minimized)
        } else {
            Ok(Visibility::Visible)
        }
    }

    fn reveal(&self) -> AppResult<()> {
        match self.visibility()? {
            Visibility::Hidden => self.window.show()?,
            Visibility::Minimized => self.window.unminimize()?,
            Visibility::Visible => {}
        }
        self.window.set_focus()
    }

    fn elevate(&mut self, now: Instant) -> AppResult<()> {
        let current = self.window.is_always_on_top()?;
        // While an elevation is pending the flag reads `true` because of us;
        // keep the value captured by the first elevation of the burst.
        if self.attention.revert_at.is_none() || self.attention.restore_to.is_none() {
            self.attention.restore_to = Some(current);
        }

        self.window.set_always_on_top(true)?;
        // Every successful elevation leaves a reversion armed.
        self.attention.revert_at = Some(now + self.revert_delay);

        // Second focus: some window managers ignore the first one from a background app.
        if let Err(e) = self.window.set_focus() {
            log_step_failure("refocus window", &e);
        }
        Ok(())
    }

    /// Runs the pending reversion if its deadline has passed.
    pub fn revert_if_due(&mut self, now: Instant) {
        match self.attention.revert_at {
            Some(at) if now >= at => {}
            _ => return,
        }

        self.attention.revert_at = None;
        if let Some(previous) = self.attention.restore_to.take() {
            if let Err(e) = self.window.set_always_on_top(previous) {
                log_step_failure("restore always-on-top", &e);
            }
        }
    }

    /// User-driven pin toggle. While an elevation is pending the new value is
    /// what the reversion restores to, so the user's choice survives it.
    pub fn toggle_pinned(&mut self) -> AppResult<bool> {
        let pinned = match self.attention.restore_to {
            Some(previous) if self.attention.is_elevated() => !previous,
            _ => !self.window.is_always_on_top()?,
        };

        if self.attention.is_elevated() {
            self.attention.restore_to = Some(pinned);
        } else {
            self.window.set_always_on_top(pinned)?;
        }
        Ok(pinned)
    }

    /// First appearance at startup: place, then show or minimize.
    pub fn show_initial(&self, start_minimized: bool) -> AppResult<()> {
        if self.settings.follow_mouse_cursor() {
            if let Err(e) = self.place_near_cursor() {
                log_step_failure("position window", &e);
            }
        }
        if start_minimized {
            self.window.minimize()
        } else {
            self.window.show()
        }
    }
}

/// Close request policy. With `run_in_background` on, the window is hidden
/// and the close must be prevented; returns whether to prevent it.
pub fn hide_instead_of_close(window: &dyn PopupWindow, settings: &SettingsGate) -> bool {
    if !settings.run_in_background() {
        return false;
    }
    if let Err(e) = window.hide() {
        log_step_failure("hide window on close", &e);
    }
    true
}

fn log_step_failure(step: &str, err: &AppError) {
    match err {
        AppError::WindowGone => log::debug!("[WindowPresenter] Window gone, cannot {}", step),
        _ => log::warn!("[WindowPresenter] Failed to {}: {}", step, err),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::shared::types::{Display, Point, Rect, Size, WindowPlacement};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub enum WindowCall {
        Show,
        Hide,
        Minimize,
        Unminimize,
        Focus,
        AlwaysOnTop(bool),
        Position(WindowPlacement),
    }

    /// In-memory window recording every mutating call.
    pub struct FakeWindow {
        pub alive: Mutex<bool>,
        pub visible: Mutex<bool>,
        pub minimized: Mutex<bool>,
        pub on_top: Mutex<bool>,
        /// When set, `set_focus` fails like a window manager refusing activation.
        pub refuse_focus: Mutex<bool>,
        pub size: Size,
        calls: Mutex<Vec<WindowCall>>,
    }

    impl FakeWindow {
        pub fn new() -> Self {
            Self {
                alive: Mutex::new(true),
                visible: Mutex::new(false),
                minimized: Mutex::new(false),
                on_top: Mutex::new(false),
                refuse_focus: Mutex::new(false),
                size: Size::new(300.0, 500.0),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<WindowCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn clear_calls(&self) {
            self.calls.lock().unwrap().clear();
        }

        pub fn destroy(&self) {
            *self.alive.lock().unwrap() = false;
        }

        pub fn is_on_top(&self) -> bool {
            *self.on_top.lock().unwrap()
        }

        fn check(&self) -> AppResult<()> {
            if *self.alive.lock().unwrap() {
                Ok(())
            } else {
                Err(AppError::WindowGone)
            }
        }

        fn record(&self, call: WindowCall) -> AppResult<()> {
            self.check()?;
            self.calls.lock().unwrap().push(call);
            Ok(())
        }
    }

    impl PopupWindow for FakeWindow {
        fn is_available(&self) -> bool {
            *self.alive.lock().unwrap()
        }

        fn is_visible(&self) -> AppResult<bool> {
            self.check()?;
            Ok(*self.visible.lock().unwrap())
        }

        fn is_minimized(&self) -> AppResult<bool> {
            self.check()?;
            Ok(*self.minimized.lock().unwrap())
        }

        fn show(&self) -> AppResult<()> {
            self.record(WindowCall::Show)?;
            *self.visible.lock().unwrap() = true;
            Ok(())
        }

        fn hide(&self) -> AppResult<()> {
            self.record(WindowCall::Hide)?;
            *self.visible.lock().unwrap() = false;
            Ok(())
        }

        fn minimize(&self) -> AppResult<()> {
            self.record(WindowCall::Minimize)?;
            *self.minimized.lock().unwrap() = true;
            Ok(())
        }

        fn unminimize(&self) -> AppResult<()> {
            self.record(WindowCall::Unminimize)?;
            *self.minimized.lock().unwrap() = false;
            Ok(())
        }

        fn set_focus(&self) -> AppResult<()> {
            self.check()?;
            if *self.refuse_focus.lock().unwrap() {
                return Err(AppError::Window("focus refused".to_string()));
            }
            self.record(WindowCall::Focus)
        }

        fn is_always_on_top(&self) -> AppResult<bool> {
            self.check()?;
            Ok(*self.on_top.lock().unwrap())
        }

        fn set_always_on_top(&self, on_top: bool) -> AppResult<()> {
            self.record(WindowCall::AlwaysOnTop(on_top))?;
            *self.on_top.lock().unwrap() = on_top;
            Ok(())
        }

        fn outer_size(&self) -> AppResult<Size> {
            self.check()?;
            Ok(self.size)
        }

        fn set_position(&self, placement: WindowPlacement) -> AppResult<()> {
            self.record(WindowCall::Position(placement))
        }
    }

    /// Single 1920x1080 display with a 40px taskbar at the bottom.
    pub struct FakeScreen {
        pub cursor: Mutex<Point>,
    }

    impl FakeScreen {
        pub fn at(x: f64, y: f64) -> Self {
            Self {
                cursor: Mutex::new(Point::new(x, y)),
            }
        }
    }

    impl ScreenProbe for FakeScreen {
        fn cursor_position(&self) -> AppResult<Point> {
            Ok(*self.cursor.lock().unwrap())
        }

        fn displays(&self) -> AppResult<Vec<Display>> {
            Ok(vec![Display {
                bounds: Rect::new(0.0, 0.0, 1920.0, 1080.0),
                work_area: Rect::new(0.0, 0.0, 1920.0, 1040.0),
            }])
        }
    }
}
