//! Browser-side collaborators for the authorization flow: launching the
//! default browser at the login page and sourcing the session cookies.

pub mod cookies;
pub mod launcher;

pub use cookies::{BrowserCookies, CookieSource, LocalBrowserCookieSource};
pub use launcher::{BrowserLauncher, SystemBrowserLauncher};
