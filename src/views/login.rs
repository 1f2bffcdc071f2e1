//! Admin login view

use crate::error::Result;
use crate::routes::Route;
use crate::error::ReliefError;
use crate::session::{AuthContext, CredentialValidator, Credentials};
use rustyline::completion::Completer;
use rustyline::config::Configurer;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{ColorMode, DefaultEditor, Editor, Helper};
use std::borrow::Cow;

/// Route opened after a successful login
pub const LANDING_ROUTE: Route = Route::ReliefSupplies;

/// Validates submitted credentials and commits the session
pub struct LoginView {
    validator: Box<dyn CredentialValidator>,
}

impl LoginView {
    /// Create a login view backed by `validator`
    pub fn new(validator: Box<dyn CredentialValidator>) -> Self {
        Self { validator }
    }

    /// Check `credentials`; on success log in and return the landing route
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ReliefError::Authentication`] with
    /// `Invalid username or password` when rejected. The auth context is
    /// left untouched in that case.
    pub async fn submit(&self, auth: &mut AuthContext, credentials: &Credentials) -> Result<Route> {
        let session = self.validator.validate(credentials)?;
        tracing::info!(username = %session.username(), "Login succeeded");
        auth.login(session).await;
        Ok(LANDING_ROUTE)
    }
}

impl std::fmt::Debug for LoginView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginView").finish_non_exhaustive()
    }
}

/// Fill in whichever of username/password was not supplied up front
pub fn prompt_credentials(
    editor: &mut DefaultEditor,
    username: Option<String>,
    password: Option<String>,
) -> Result<Credentials> {
    let username = match username {
        Some(username) => username,
        None => editor.readline("Username: ")?.trim().to_string(),
    };
    let password = match password {
        Some(password) => password,
        None => read_password("Password: ")?,
    };
    Ok(Credentials::new(username, password))
}

/// Line editor helper that renders every typed character as `*`
#[derive(Debug, Default, Clone, Copy)]
pub struct PasswordMask;

impl Highlighter for PasswordMask {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned("*".repeat(line.chars().count()))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Completer for PasswordMask {
    type Candidate = String;
}

impl Hinter for PasswordMask {
    type Hint = String;
}

impl Validator for PasswordMask {}

impl Helper for PasswordMask {}

/// Read a password with masked echo, keeping it out of the history
fn read_password(prompt: &str) -> Result<String> {
    let mut editor: Editor<PasswordMask, DefaultHistory> =
        Editor::new().map_err(ReliefError::Readline)?;
    editor.set_helper(Some(PasswordMask));
    editor.set_color_mode(ColorMode::Forced);
    editor.set_auto_add_history(false);
    Ok(editor.readline(prompt)?)
}
