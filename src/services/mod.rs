// docbrowser services
// Stateless or process-wide helpers: clock, settings, static page loading.

pub mod clock;
pub mod settings_engine;
pub mod static_page;
