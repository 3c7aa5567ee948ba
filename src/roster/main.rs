use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use roster::api::RosterApi;
use roster::config::RosterConfig;
use roster::error::{Result, RosterError};
use roster::model::{UserDraft, UserRecord};
use roster::notify::{Notification, NotificationLevel};
use roster::store::http::HttpStore;
use roster::view::{FilterCriteria, SortField, SortOrder, ViewPage, ViewState};
use tokio::sync::mpsc::UnboundedReceiver;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: RosterApi<HttpStore>,
    notifications: UnboundedReceiver<Notification>,
    page_size: usize,
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List {
            search,
            name,
            username,
            email,
            company,
            sort,
            desc,
            page,
            page_size,
        }) => {
            handle_list(
                &mut ctx, search, name, username, email, company, &sort, desc, page, page_size,
            )
            .await?
        }
        Some(Commands::Show { ids }) => handle_show(&mut ctx, &ids).await?,
        Some(Commands::Create {
            name,
            username,
            email,
            phone,
            website,
            company,
        }) => {
            let draft = UserDraft {
                name,
                username,
                email,
                phone,
                website,
                company,
            };
            handle_create(&mut ctx, draft).await?
        }
        Some(Commands::Edit {
            id,
            name,
            username,
            email,
            phone,
            website,
            company,
        }) => {
            handle_edit(&mut ctx, id, name, username, email, phone, website, company).await?
        }
        Some(Commands::Delete { ids, yes }) => handle_delete(&mut ctx, &ids, yes).await?,
        None => handle_list(&mut ctx, None, None, None, None, None, "name", false, 1, None).await?,
    }

    print_notifications(&mut ctx.notifications);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let proj_dirs =
        ProjectDirs::from("com", "roster", "roster").expect("Could not determine config dir");
    let config = RosterConfig::load(proj_dirs.config_dir()).unwrap_or_default();

    let base_url = cli
        .url
        .clone()
        .or_else(|| std::env::var("ROSTER_URL").ok())
        .unwrap_or_else(|| config.get_base_url().to_string());

    let store = HttpStore::new(base_url)?;
    let (api, notifications) = RosterApi::new(store);

    Ok(AppContext {
        api,
        notifications,
        page_size: config.get_page_size(),
    })
}

#[allow(clippy::too_many_arguments)]
async fn handle_list(
    ctx: &mut AppContext,
    search: Option<String>,
    name: Option<String>,
    username: Option<String>,
    email: Option<String>,
    company: Option<String>,
    sort: &str,
    desc: bool,
    page: usize,
    page_size: Option<usize>,
) -> Result<()> {
    let field: SortField = sort.parse().map_err(RosterError::Api)?;
    let order = if desc {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };

    let mut state = ViewState::new();
    state.set_page_size(page_size.unwrap_or(ctx.page_size));
    state.set_filters(FilterCriteria {
        name,
        username,
        email,
        company,
    });
    if let Some(term) = search {
        state.set_search(term);
    }
    state.set_sort(field, order);
    // The page is requested last: search, filters and page size all snap
    // back to page 1
    state.set_page(page);

    ctx.api.refresh().await?;
    let view = ctx.api.view(&state).await?;
    print_users(&view, &state);
    Ok(())
}

async fn handle_show(ctx: &mut AppContext, ids: &[i64]) -> Result<()> {
    let mut users = Vec::with_capacity(ids.len());
    for id in ids {
        let result = ctx.api.get_user(*id).await?;
        users.extend(result.listed_users);
    }
    print_full_users(&users);
    Ok(())
}

async fn handle_create(ctx: &mut AppContext, draft: UserDraft) -> Result<()> {
    ctx.api.create_user(&draft).await?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn handle_edit(
    ctx: &mut AppContext,
    id: i64,
    name: Option<String>,
    username: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    company: Option<String>,
) -> Result<()> {
    let current = ctx.api.get_user(id).await?;
    let record = current
        .listed_users
        .first()
        .ok_or_else(|| RosterError::Api(format!("User {} not found", id)))?;

    // Prefill from the existing record, overlay whatever was given
    let mut draft = UserDraft::from_record(record);
    if let Some(v) = name {
        draft.name = v;
    }
    if let Some(v) = username {
        draft.username = v;
    }
    if let Some(v) = email {
        draft.email = v;
    }
    if let Some(v) = phone {
        draft.phone = v;
    }
    if let Some(v) = website {
        draft.website = v;
    }
    if let Some(v) = company {
        draft.company = v;
    }

    ctx.api.update_user(id, &draft).await?;
    Ok(())
}

async fn handle_delete(ctx: &mut AppContext, ids: &[i64], skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        println!("This will delete the following users:");
        for id in ids {
            match ctx.api.get_user(*id).await {
                Ok(result) => {
                    for user in &result.listed_users {
                        println!("  #{} {}", user.id, user.name);
                    }
                }
                Err(_) => println!("  #{} (could not be fetched)", id),
            }
        }
        print!("[Y] To delete: ");
        use std::io::Write;
        std::io::stdout().flush().map_err(RosterError::Io)?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .map_err(RosterError::Io)?;

        if input.trim() != "Y" {
            println!("{}", "Operation cancelled.".dimmed());
            return Ok(());
        }
    }

    for id in ids {
        ctx.api.delete_user(*id).await?;
    }
    Ok(())
}

fn print_notifications(notifications: &mut UnboundedReceiver<Notification>) {
    while let Ok(notification) = notifications.try_recv() {
        match notification.level {
            NotificationLevel::Info => println!("{}", notification.message.dimmed()),
            NotificationLevel::Success => println!("{}", notification.message.green()),
            NotificationLevel::Warning => println!("{}", notification.message.yellow()),
            NotificationLevel::Error => println!("{}", notification.message.red()),
        }
    }
}

const ID_WIDTH: usize = 5;
const NAME_WIDTH: usize = 24;
const USERNAME_WIDTH: usize = 16;
const EMAIL_WIDTH: usize = 28;
const COMPANY_WIDTH: usize = 22;

fn print_users(view: &ViewPage, state: &ViewState) {
    if view.records.is_empty() {
        println!("No users found.");
        return;
    }

    println!(
        "{}{}{}{}{}",
        pad_to_width("ID", ID_WIDTH).dimmed(),
        pad_to_width("NAME", NAME_WIDTH).dimmed(),
        pad_to_width("USERNAME", USERNAME_WIDTH).dimmed(),
        pad_to_width("EMAIL", EMAIL_WIDTH).dimmed(),
        pad_to_width("COMPANY", COMPANY_WIDTH).dimmed(),
    );

    for user in &view.records {
        println!(
            "{}{}{}{}{}",
            pad_to_width(&user.id.to_string(), ID_WIDTH).yellow(),
            pad_to_width(&user.name, NAME_WIDTH),
            pad_to_width(&user.username, USERNAME_WIDTH),
            pad_to_width(&user.email, EMAIL_WIDTH),
            pad_to_width(&user.company.name, COMPANY_WIDTH),
        );
    }

    println!(
        "{}",
        format!(
            "Showing {} of {} users · Page {} of {}",
            view.records.len(),
            view.total_matching,
            state.page(),
            view.total_pages
        )
        .dimmed()
    );
}

fn print_full_users(users: &[UserRecord]) {
    for (i, user) in users.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!("{} {}", format!("#{}", user.id).yellow(), user.name.bold());
        println!("--------------------------------");
        println!("username: {}", user.username);
        println!("email:    {}", user.email);
        println!("phone:    {}", user.phone);
        println!("website:  {}", user.website);
        println!("company:  {}", user.company.name);
        let address = [
            user.address.street.as_str(),
            user.address.suite.as_str(),
            user.address.city.as_str(),
            user.address.zipcode.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
        if !address.is_empty() {
            println!("address:  {}", address);
        }
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
