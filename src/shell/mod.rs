//! Interactive navigation shell
//!
//! A readline loop over the client's routes. Every navigation goes
//! through [`RouteGuard`]; the prompt and the navigation bar read the
//! session from the shared [`AuthContext`].

use crate::api::ApiClient;
use crate::error::{Result, ReliefError};
use crate::routes::{GuardDecision, Route, RouteGuard};
use crate::session::{AuthContext, Credentials};
use crate::views::{self, access, csv, DashboardStats, ListQuery, ListView, LoginView};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

pub mod commands;
pub mod nav;

pub use commands::{parse_shell_command, CommandError, ShellCommand};

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Shell state: session, current route and the loaded list
pub struct Shell {
    auth: AuthContext,
    api: ApiClient,
    login: LoginView,
    page_size: usize,
    route: Route,
    view: Option<Box<dyn ListView>>,
    query: ListQuery,
    awaiting_login: bool,
}

impl Shell {
    /// Create a shell on the home route
    pub fn new(auth: AuthContext, api: ApiClient, login: LoginView, page_size: usize) -> Self {
        Self {
            auth,
            api,
            login,
            page_size,
            route: Route::Home,
            view: None,
            query: ListQuery::new(page_size),
            awaiting_login: false,
        }
    }

    /// Current route
    pub fn route(&self) -> Route {
        self.route
    }

    /// Shared session handle
    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Loaded list view, if the current route is a list the user may see
    pub fn view(&self) -> Option<&dyn ListView> {
        self.view.as_deref()
    }

    /// Current search, filters and page
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Whether the login view is waiting for credentials
    pub fn awaiting_login(&self) -> bool {
        self.awaiting_login
    }

    /// Prompt showing who is logged in and where
    pub fn prompt(&self) -> String {
        let user = match self.auth.session() {
            Some(session) if session.is_admin() => session.username().green().to_string(),
            Some(session) => session.username().yellow().to_string(),
            None => "guest".dimmed().to_string(),
        };
        format!("{} {}> ", user, self.route.path().cyan())
    }

    /// Run the interactive loop starting at `start`
    pub async fn run(mut self, start: &str) -> Result<()> {
        tracing::info!("Starting navigation shell");
        let mut editor = DefaultEditor::new().map_err(ReliefError::Readline)?;

        print_banner();
        println!("{}\n", nav::render(&self.auth, self.route));
        if let Err(e) = self.open(start).await {
            eprintln!("{} {}\n", "Error:".red(), e);
        }

        loop {
            if self.awaiting_login {
                self.prompt_login(&mut editor).await;
            }

            match editor.readline(&self.prompt()) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = editor.add_history_entry(trimmed);

                    let command = match parse_shell_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}\n", e);
                            continue;
                        }
                    };

                    match self.execute(command).await {
                        Ok(Flow::Exit) => break,
                        Ok(Flow::Continue) => {}
                        Err(e) => eprintln!("{} {}\n", "Error:".red(), e),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Apply one parsed command
    pub async fn execute(&mut self, command: ShellCommand) -> Result<Flow> {
        match command {
            ShellCommand::Go(path) => {
                self.open(&path).await?;
            }
            ShellCommand::Login => {
                self.open_route(Route::Login).await?;
            }
            ShellCommand::Logout => {
                self.logout().await?;
            }
            ShellCommand::Whoami => println!("{}", self.whoami()),
            ShellCommand::Nav => println!("{}", nav::render(&self.auth, self.route)),
            ShellCommand::Search(text) => {
                self.query.set_search(&text);
                self.print_list();
            }
            ShellCommand::Filter { field, value } => {
                self.query.set_filter(field, value);
                self.print_list();
            }
            ShellCommand::Clear => {
                self.query.clear();
                self.print_list();
            }
            ShellCommand::Page(page) => {
                let last = self
                    .view
                    .as_ref()
                    .map_or(usize::MAX, |view| view.total_pages(&self.query));
                self.query.set_page(page.min(last));
                self.print_list();
            }
            ShellCommand::Next => {
                if let Some(view) = &self.view {
                    let total = view.total_pages(&self.query);
                    self.query.next_page(total);
                }
                self.print_list();
            }
            ShellCommand::Prev => {
                self.query.prev_page();
                self.print_list();
            }
            ShellCommand::Export(path) => {
                if let Some(written) = self.export(path).await? {
                    println!("Exported to {}", written.display());
                }
            }
            ShellCommand::Show(id) => match &self.view {
                Some(view) => match view.detail(id) {
                    Some(detail) => println!("{}", detail),
                    None => println!("No record with id {} in this view", id),
                },
                None => print_no_list(),
            },
            ShellCommand::Delete(id) => {
                self.delete(id).await?;
            }
            ShellCommand::Refresh => {
                self.open_route(self.route).await?;
            }
            ShellCommand::Help => commands::print_help(),
            ShellCommand::Exit => return Ok(Flow::Exit),
            ShellCommand::None => println!("Type '/help' to see available commands"),
        }
        Ok(Flow::Continue)
    }

    /// Navigate to a path; unknown paths land on the home view
    pub async fn open(&mut self, path: &str) -> Result<GuardDecision> {
        let route = match Route::parse(path) {
            Some(route) => route,
            None => {
                println!("No view at {}, showing Home", path.trim());
                Route::Home
            }
        };
        self.open_route(route).await
    }

    /// Navigate to `route` through the guard and render it
    pub async fn open_route(&mut self, route: Route) -> Result<GuardDecision> {
        if !self.auth.is_ready() {
            self.auth.restore().await;
        }

        let decision = RouteGuard::check(route, &self.auth);
        self.view = None;
        self.query = ListQuery::new(self.page_size);
        self.awaiting_login = false;

        match decision {
            GuardDecision::Pending => {
                tracing::warn!(route = %route, "Session not restored; navigation deferred");
            }
            GuardDecision::RedirectToLogin => {
                println!("{}", access::login_required(route));
                self.route = Route::Login;
                self.awaiting_login = true;
            }
            GuardDecision::AccessDenied => {
                self.route = route;
                println!("{}", access::access_denied());
            }
            GuardDecision::Allow => {
                self.route = route;
                self.render_route().await?;
            }
        }
        Ok(decision)
    }

    /// Submit credentials from the login view
    ///
    /// Returns whether the login succeeded. Rejected credentials leave
    /// the shell on the login view.
    pub async fn submit_login(&mut self, credentials: &Credentials) -> Result<bool> {
        match self.login.submit(&mut self.auth, credentials).await {
            Ok(landing) => {
                println!("{}", "Login successful".green());
                self.open_route(landing).await?;
                Ok(true)
            }
            Err(e) => {
                match e.downcast_ref::<ReliefError>() {
                    Some(ReliefError::Authentication(message)) => {
                        println!("{}", message.red());
                    }
                    _ => return Err(e),
                }
                self.route = Route::Login;
                Ok(false)
            }
        }
    }

    /// End the session and go home
    pub async fn logout(&mut self) -> Result<()> {
        self.auth.logout().await;
        println!("Logged out");
        self.open_route(Route::Home).await?;
        Ok(())
    }

    /// Text for `/whoami`
    pub fn whoami(&self) -> String {
        match self.auth.session() {
            Some(session) => format!("{} ({})", session.username(), session.role()),
            None => "Not logged in".to_string(),
        }
    }

    async fn prompt_login(&mut self, editor: &mut DefaultEditor) {
        self.awaiting_login = false;
        let credentials = match views::login::prompt_credentials(editor, None, None) {
            Ok(credentials) => credentials,
            Err(e) => {
                tracing::debug!("Login prompt cancelled: {}", e);
                println!("Login cancelled");
                return;
            }
        };
        if let Err(e) = self.submit_login(&credentials).await {
            eprintln!("{} {}\n", "Error:".red(), e);
        }
    }

    async fn render_route(&mut self) -> Result<()> {
        match self.route {
            Route::Home => {
                let stats = DashboardStats::load(&self.api).await?;
                println!("{}", stats.render());
            }
            Route::Login => {
                println!("{}", Route::Login.title().bold());
                self.awaiting_login = true;
            }
            route => {
                if let Some(resource) = route.resource() {
                    let mut view = views::list_view(resource);
                    let loaded = view.refresh(&self.api).await;
                    self.view = Some(view);
                    loaded?;
                    self.print_list();
                }
            }
        }
        Ok(())
    }

    fn print_list(&self) {
        match &self.view {
            Some(view) => println!("{}\n", view.render(&self.query)),
            None => print_no_list(),
        }
    }

    async fn export(&self, path: Option<PathBuf>) -> Result<Option<PathBuf>> {
        let Some(view) = &self.view else {
            print_no_list();
            return Ok(None);
        };
        let content = view.to_csv(&self.query)?;
        let path = path.unwrap_or_else(|| {
            csv::default_filename(view.resource(), chrono::Local::now().date_naive())
        });
        csv::write_csv(&path, &content).await?;
        Ok(Some(path))
    }

    async fn delete(&mut self, id: u64) -> Result<()> {
        let Some(view) = &mut self.view else {
            print_no_list();
            return Ok(());
        };
        let resource = view.resource();
        self.api.delete(resource, id).await?;
        println!("Deleted {} {}", resource, id);
        view.refresh(&self.api).await?;
        self.print_list();
        Ok(())
    }
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("route", &self.route)
            .field("query", &self.query)
            .field("awaiting_login", &self.awaiting_login)
            .finish_non_exhaustive()
    }
}

fn print_no_list() {
    println!("This view has no list. Open one with /go <path>");
}

fn print_banner() {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║             Reliefdesk - Disaster Relief Console             ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Type '/help' for available commands, 'exit' to quit\n");
}
