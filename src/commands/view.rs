//! `open` and `export`: render one view, or write its list as CSV

use super::{authorize, guarded_resource, Context};
use crate::cli::ListArgs;
use crate::error::Result;
use crate::routes::Route;
use crate::views::{self, csv, DashboardStats, ListQuery};
use std::path::PathBuf;

/// Render the view at `path` once
///
/// Unknown paths render the home view. Guarded views require an admin
/// session; otherwise the command fails with a login hint or after
/// printing the access-denied interstitial.
pub async fn run_open(ctx: &Context, path: &str, list: &ListArgs, page: usize) -> Result<()> {
    let route = Route::resolve(path);
    authorize(route, &ctx.auth)?;

    match route {
        Route::Home => {
            let stats = DashboardStats::load(&ctx.api).await?;
            println!("{}", stats.render());
        }
        Route::Login => {
            println!("Log in with `reliefdesk login` or from `reliefdesk shell`");
        }
        route => {
            if let Some(resource) = route.resource() {
                let query = ListQuery::from_args(list, page, ctx.config.ui.page_size)?;
                let mut view = views::list_view(resource);
                view.refresh(&ctx.api).await?;
                println!("{}", view.render(&query));
            }
        }
    }
    Ok(())
}

/// Export the filtered list at `path` to CSV
///
/// Returns the file written.
pub async fn run_export(
    ctx: &Context,
    path: &str,
    list: &ListArgs,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    let resource = guarded_resource(path, &ctx.auth)?;
    let query = ListQuery::from_args(list, 1, ctx.config.ui.page_size)?;

    let mut view = views::list_view(resource);
    view.refresh(&ctx.api).await?;
    let content = view.to_csv(&query)?;

    let output = output.unwrap_or_else(|| {
        csv::default_filename(resource, chrono::Local::now().date_naive())
    });
    csv::write_csv(&output, &content).await?;
    println!("Exported to {}", output.display());
    Ok(output)
}
