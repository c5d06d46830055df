pub mod app;
pub mod countdown_display;
pub mod debug_line;
pub mod menu_view;
pub mod touch_view;

pub use app::App;
