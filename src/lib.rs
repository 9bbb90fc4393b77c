// Export modules for use in tests
pub mod color_mode;
pub mod fetch;
pub mod inputs;
pub use inputs::event_source;
pub mod main_app;
pub mod markers;
pub mod panic_handler;
pub mod parsing;
pub mod session;
pub mod settings;
pub mod theme;
pub mod types;
pub mod widget;
// Test utilities - only available when test-utils feature is enabled or during tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export main app components
pub use main_app::{App, AppAction, run_app_with_event_source};
pub use session::Session;
