//! Messages shown in place of a guarded view

use crate::routes::Route;
use colored::Colorize;

/// Interstitial for a signed-in user without the admin role
///
/// Its only affordance leads back to the home view.
pub fn access_denied() -> String {
    format!(
        "{}\nYou need admin privileges to access this page.\n\nGo to Home: {}",
        "Access Denied".red().bold(),
        "/go /".cyan()
    )
}

/// Notice printed when a guarded route bounces to the login view
pub fn login_required(route: Route) -> String {
    format!("{} requires an admin login.", route.title().bold())
}
