pub mod components;
pub mod screens;
pub mod styles;
pub mod terminal;

pub use screens::render_browser;
pub use terminal::TerminalGuard;
