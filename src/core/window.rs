//! Popup window placement and presentation.

pub mod placement;
pub mod presenter;

pub use placement::{compute_placement, logical_to_physical, nearest_display};
pub use presenter::{hide_instead_of_close, AttentionState, Visibility, WindowPresenter};

use crate::shared::error::AppResult;
use crate::shared::types::{Display, Point, Size, WindowPlacement};

/// Window primitives the presenter drives. Every call reports
/// `AppError::WindowGone` once the window has been destroyed.
pub trait PopupWindow: Send + Sync {
    fn is_available(&self) -> bool;
    fn is_visible(&self) -> AppResult<bool>;
    fn is_minimized(&self) -> AppResult<bool>;
    fn show(&self) -> AppResult<()>;
    fn hide(&self) -> AppResult<()>;
    fn minimize(&self) -> AppResult<()>;
    fn unminimize(&self) -> AppResult<()>;
    fn set_focus(&self) -> AppResult<()>;
    fn is_always_on_top(&self) -> AppResult<bool>;
    fn set_always_on_top(&self, on_top: bool) -> AppResult<()>;
    fn outer_size(&self) -> AppResult<Size>;
    fn set_position(&self, placement: WindowPlacement) -> AppResult<()>;
}

/// Pointer and display geometry.
pub trait ScreenProbe: Send + Sync {
    fn cursor_position(&self) -> AppResult<Point>;
    fn displays(&self) -> AppResult<Vec<Display>>;
}
