//! Window and screen adapters over the Tauri runtime.
//!
//! All coordinates are physical pixels: monitor bounds and work areas from
//! Tauri, the window position we set, and the cursor from `mouse_position`
//! (scaled up on macOS, where it reports logical points).

use mouse_position::mouse_position::Mouse;
use tauri::{AppHandle, Manager, PhysicalPosition, WebviewWindow};

use crate::core::window::{logical_to_physical, PopupWindow, ScreenProbe};
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::{Display, Point, Rect, Size, WindowPlacement};

fn window_error(e: tauri::Error) -> AppError {
    AppError::Window(e.to_string())
}

/// The popup window, looked up by label on every call so a destroyed
/// window surfaces as `WindowGone` instead of a dangling handle.
pub struct TauriPopupWindow {
    app: AppHandle,
    label: String,
}

impl TauriPopupWindow {
    pub fn new(app: AppHandle, label: impl Into<String>) -> Self {
        Self {
            app,
            label: label.into(),
        }
    }

    fn window(&self) -> AppResult<WebviewWindow> {
        self.app
            .get_webview_window(&self.label)
            .ok_or(AppError::WindowGone)
    }
}

impl PopupWindow for TauriPopupWindow {
    fn is_available(&self) -> bool {
        self.app.get_webview_window(&self.label).is_some()
    }

    fn is_visible(&self) -> AppResult<bool> {
        self.window()?.is_visible().map_err(window_error)
    }

    fn is_minimized(&self) -> AppResult<bool> {
        self.window()?.is_minimized().map_err(window_error)
    }

    fn show(&self) -> AppResult<()> {
        self.window()?.show().map_err(window_error)
    }

    fn hide(&self) -> AppResult<()> {
        self.window()?.hide().map_err(window_error)
    }

    fn minimize(&self) -> AppResult<()> {
        self.window()?.minimize().map_err(window_error)
    }

    fn unminimize(&self) -> AppResult<()> {
        self.window()?.unminimize().map_err(window_error)
    }

    fn set_focus(&self) -> AppResult<()> {
        self.window()?.set_focus().map_err(window_error)
    }

    fn is_always_on_top(&self) -> AppResult<bool> {
        self.window()?.is_always_on_top().map_err(window_error)
    }

    fn set_always_on_top(&self, on_top: bool) -> AppResult<()> {
        self.window()?.set_always_on_top(on_top).map_err(window_error)
    }

    fn outer_size(&self) -> AppResult<Size> {
        let size = self.window()?.outer_size().map_err(window_error)?;
        Ok(Size::new(size.width as f64, size.height as f64))
    }

    fn set_position(&self, placement: WindowPlacement) -> AppResult<()> {
        let position = PhysicalPosition::new(placement.x.round() as i32, placement.y.round() as i32);
        self.window()?.set_position(position).map_err(window_error)
    }
}

/// Cursor and monitor geometry.
pub struct TauriScreen {
    app: AppHandle,
}

impl TauriScreen {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl ScreenProbe for TauriScreen {
    fn cursor_position(&self) -> AppResult<Point> {
        let cursor = match Mouse::get_mouse_position() {
            Mouse::Position { x, y } => Point::new(x as f64, y as f64),
            Mouse::Error => {
                return Err(AppError::Window("Failed to get cursor position".to_string()))
            }
        };

        if cfg!(target_os = "macos") {
            let monitors = self
                .app
                .available_monitors()
                .map_err(|e| AppError::Window(format!("Failed to enumerate monitors: {}", e)))?;
            let scales: Vec<(Rect, f64)> = monitors
                .iter()
                .map(|monitor| {
                    let position = monitor.position();
                    let size = monitor.size();
                    let bounds = Rect::new(
                        position.x as f64,
                        position.y as f64,
                        size.width as f64,
                        size.height as f64,
                    );
                    (bounds, monitor.scale_factor())
                })
                .collect();
            return Ok(logical_to_physical(cursor, &scales));
        }
        Ok(cursor)
    }

    fn displays(&self) -> AppResult<Vec<Display>> {
        let monitors = self
            .app
            .available_monitors()
            .map_err(|e| AppError::Window(format!("Failed to enumerate monitors: {}", e)))?;

        Ok(monitors
            .iter()
            .map(|monitor| {
                let position = monitor.position();
                let size = monitor.size();
                let work_area = monitor.work_area();
                Display {
                    bounds: Rect::new(
                        position.x as f64,
                        position.y as f64,
                        size.width as f64,
                        size.height as f64,
                    ),
                    work_area: Rect::new(
                        work_area.position.x as f64,
                        work_area.position.y as f64,
                        work_area.size.width as f64,
                        work_area.size.height as f64,
                    ),
                }
            })
            .collect())
    }
}
