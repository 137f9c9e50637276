mod app;
mod content;
mod context_menu;
mod menu_bar;

pub use app::App;
