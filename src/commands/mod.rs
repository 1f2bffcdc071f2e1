/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `shell`: interactive navigation shell
- `session`: login, logout and whoami
- `view`: render one view or export it to CSV
- `records`: single-record get/create/update/delete
- `health`: backend connectivity check

Every handler restores the session first and routes through the same
guard the shell uses, so a one-shot command can never show more than
navigating to the same path would.
*/

use crate::api::{ApiClient, Resource};
use crate::config::Config;
use crate::error::{Result, ReliefError};
use crate::routes::{GuardDecision, Route, RouteGuard};
use crate::session::{AuthContext, StaticCredentialValidator};
use crate::views::{access, LoginView};

pub mod records;
pub mod view;

/// Configuration, restored session and API client for one command
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub auth: AuthContext,
    pub api: ApiClient,
}

impl Context {
    /// Restore the session and build the API client
    pub async fn bootstrap(config: Config) -> Result<Self> {
        let auth = AuthContext::bootstrap(&config.session).await?;
        let api = ApiClient::new(&config.api)?;
        Ok(Self { config, auth, api })
    }

    /// Login view backed by the configured admin credentials
    pub fn login_view(&self) -> LoginView {
        LoginView::new(Box::new(StaticCredentialValidator::from_config(
            &self.config.auth,
        )))
    }
}

/// Map the guard's decision for `route` to a command outcome
///
/// # Errors
///
/// - [`ReliefError::Authentication`] when the route needs a login
/// - [`ReliefError::AccessDenied`] when the session is not admin; the
///   interstitial is printed first
pub fn authorize(route: Route, auth: &AuthContext) -> Result<()> {
    match RouteGuard::check(route, auth) {
        GuardDecision::Allow => Ok(()),
        GuardDecision::RedirectToLogin => Err(ReliefError::Authentication(format!(
            "{} requires an admin login; run `reliefdesk login` first",
            route.path()
        ))
        .into()),
        GuardDecision::AccessDenied => {
            eprintln!("{}", access::access_denied());
            Err(ReliefError::AccessDenied(route.path().to_string()).into())
        }
        GuardDecision::Pending => {
            Err(ReliefError::Storage("Session has not been restored".to_string()).into())
        }
    }
}

/// Resolve `path` to a list resource the current session may use
///
/// # Errors
///
/// Returns [`ReliefError::InvalidRoute`] when `path` is not a list view,
/// or the [`authorize`] errors
pub fn guarded_resource(path: &str, auth: &AuthContext) -> Result<Resource> {
    let route = Route::parse(path)
        .ok_or_else(|| ReliefError::InvalidRoute(path.trim().to_string()))?;
    let resource = route
        .resource()
        .ok_or_else(|| ReliefError::InvalidRoute(format!("{} is not a list view", route.path())))?;
    authorize(route, auth)?;
    Ok(resource)
}

// Interactive shell handler
pub mod shell {
    //! Starts the readline navigation shell.

    use super::*;
    use crate::shell::Shell;

    /// Start the shell on `path`
    pub async fn run_shell(config: Config, path: &str) -> Result<()> {
        let ctx = Context::bootstrap(config).await?;
        let login = ctx.login_view();
        let page_size = ctx.config.ui.page_size;
        Shell::new(ctx.auth, ctx.api, login, page_size)
            .run(path)
            .await
    }
}

// Session handlers
pub mod session {
    //! `login`, `logout` and `whoami`.

    use super::*;
    use crate::session::Credentials;
    use crate::views::login::prompt_credentials;
    use colored::Colorize;
    use rustyline::DefaultEditor;

    /// Validate credentials and persist the admin session
    ///
    /// Missing username or password is prompted for.
    pub async fn run_login(
        ctx: &mut Context,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<()> {
        let credentials = match (username, password) {
            (Some(username), Some(password)) => Credentials::new(username, password),
            (username, password) => {
                let mut editor = DefaultEditor::new().map_err(ReliefError::Readline)?;
                prompt_credentials(&mut editor, username, password)?
            }
        };

        let view = ctx.login_view();
        let landing = view.submit(&mut ctx.auth, &credentials).await?;
        println!(
            "{} Logged in as {}",
            "✓".green(),
            credentials.username.bold()
        );
        println!("Next: reliefdesk open {}", landing.path());
        Ok(())
    }

    /// Clear the stored session
    pub async fn run_logout(ctx: &mut Context) -> Result<()> {
        ctx.auth.logout().await;
        println!("Logged out");
        Ok(())
    }

    /// Print the current session
    pub fn run_whoami(ctx: &Context) -> Result<()> {
        match ctx.auth.session() {
            Some(session) => println!("{} ({})", session.username(), session.role()),
            None => println!("Not logged in"),
        }
        Ok(())
    }
}

// Backend health handler
pub mod health {
    //! `health`: one request to `GET /health`.

    use super::*;
    use colored::Colorize;

    /// Print backend health
    pub async fn run_health(ctx: &Context) -> Result<()> {
        let status = ctx.api.health().await?;
        let label = if status.status.eq_ignore_ascii_case("ok") {
            status.status.green()
        } else {
            status.status.yellow()
        };
        println!("{} {} {}", ctx.api.base_url(), label, status.message);
        Ok(())
    }
}
