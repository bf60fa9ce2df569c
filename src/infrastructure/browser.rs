//! Opens the OAuth start page in the system browser.

use tracing::{info, warn};

/// Opens URLs in the system browser off the UI thread.
#[derive(Clone, Default)]
pub struct BrowserLauncher {}

impl BrowserLauncher {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// Opens `url`. Failures are logged; the login screen still shows the URL.
    pub fn open(&self, url: impl Into<String>) {
        let url = url.into();
        tokio::task::spawn_blocking(move || match opener::open_browser(&url) {
            Ok(()) => info!(url = %url, "Opened browser"),
            Err(e) => warn!(url = %url, error = %e, "Failed to open browser"),
        });
    }
}
