//! Navigation bar

use crate::routes::Route;
use crate::session::AuthContext;
use colored::Colorize;

/// Routes offered in the navigation bar for the current session
///
/// Guarded routes are listed only for admins. The login route is not a
/// link; it appears as the session action instead.
pub fn links(auth: &AuthContext) -> Vec<Route> {
    Route::ALL
        .into_iter()
        .filter(|route| *route != Route::Login)
        .filter(|route| !route.is_protected() || auth.is_admin())
        .collect()
}

/// One-line navigation bar with the current route highlighted
pub fn render(auth: &AuthContext, current: Route) -> String {
    let mut parts: Vec<String> = links(auth)
        .into_iter()
        .map(|route| {
            let label = format!("{} ({})", route.title(), route.path());
            if route == current {
                label.bold().underline().to_string()
            } else {
                label
            }
        })
        .collect();

    let action = match auth.session() {
        Some(session) => format!(
            "{} {} | /logout",
            "Logged in as".dimmed(),
            session.username().green()
        ),
        None => "/login".cyan().to_string(),
    };
    parts.push(action);
    parts.join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Role, Session};
    use crate::test_utils::ready_auth as context;

    #[tokio::test]
    async fn test_anonymous_sees_public_links_and_login() {
        let auth = context(None).await;
        assert_eq!(
            links(&auth),
            vec![
                Route::Home,
                Route::HelpRequests,
                Route::Volunteers,
                Route::EmergencyContacts
            ]
        );
        let bar = render(&auth, Route::Home);
        assert!(bar.contains("/login"));
        assert!(!bar.contains("Relief Supplies"));
    }

    #[tokio::test]
    async fn test_admin_sees_guarded_links_and_logout() {
        let auth = context(Some(Session::new("admin", Role::Admin).unwrap())).await;
        let routes = links(&auth);
        assert!(routes.contains(&Route::RescueOperations));
        assert!(routes.contains(&Route::ReliefSupplies));

        let bar = render(&auth, Route::ReliefSupplies);
        assert!(bar.contains("admin"));
        assert!(bar.contains("/logout"));
    }

    #[tokio::test]
    async fn test_non_admin_does_not_see_guarded_links() {
        let auth = context(Some(Session::new("desk", "user").unwrap())).await;
        assert!(!links(&auth).iter().any(Route::is_protected));
        assert!(render(&auth, Route::Home).contains("/logout"));
    }
}
