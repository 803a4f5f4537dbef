use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use catering::config::{ClientConfig, ConfigError, parse_timeout};
use catering::net::api::{ApiClient, ApiError, ContentApi};
use catering::net::types::{MenuItem, SITE_SETTINGS_FIELDS, SiteSettings};
use catering::state::admin::AdminError;
use catering::state::admin::menu::{MenuEditor, SubmitOutcome};
use catering::state::admin::settings::SettingsEditor;
use catering::state::draft::MenuItemDraft;
use catering::state::login::{self, LoginError, LoginForm};
use catering::state::public::{CategoryFilter, LOADING_TITLE, PublicView};
use catering::state::session::SessionStore;
use catering::state::storage::FileStorage;
use catering::util::guard::{Route, RouteDecision, guard};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Admin(#[from] AdminError),
    #[error("{0}")]
    Login(#[from] LoginError),
    #[error("not signed in; run `catering login` first")]
    NotSignedIn,
    #[error("unknown route `{0}` (expected /, /admin/login or /admin)")]
    UnknownRoute(String),
    #[error("unknown settings field `{0}` (expected one of: {fields})", fields = SITE_SETTINGS_FIELDS.join(", "))]
    UnknownField(String),
    #[error("expected FIELD=VALUE, got `{0}`")]
    InvalidAssignment(String),
    #[error("output failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "catering", about = "Catering site content client")]
struct Cli {
    /// Site origin; overrides CATERING_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Session token file; overrides CATERING_SESSION_FILE.
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Request timeout in seconds; overrides CATERING_REQUEST_TIMEOUT_SECS.
    #[arg(long = "timeout-secs", value_parser = parse_timeout)]
    timeout: Option<Duration>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the backend answers.
    Ping,
    /// Show the public menu.
    Menu {
        /// Category tab to show; `all` shows everything.
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// Show the public site copy.
    Site,
    /// Sign in as an administrator.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "CATERING_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the stored token.
    Logout,
    /// Show whether a session is stored and where a route would lead.
    Status {
        #[arg(long, default_value = "/admin")]
        route: String,
    },
    /// Authenticated content management.
    Admin(AdminCommand),
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    Menu(MenuCommand),
    Settings(SettingsCommand),
}

#[derive(Args, Debug)]
struct MenuCommand {
    #[command(subcommand)]
    command: MenuSubcommand,
}

#[derive(Args, Debug, Default)]
struct ItemFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    available: Option<bool>,
    /// Empty string clears the image.
    #[arg(long)]
    image_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum MenuSubcommand {
    /// List every item, including unavailable ones.
    List,
    /// Add a new item.
    Add(ItemFields),
    /// Edit an item; unspecified fields keep their current values.
    Edit {
        id: String,
        #[command(flatten)]
        fields: ItemFields,
    },
    /// Delete an item after confirmation.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct SettingsCommand {
    #[command(subcommand)]
    command: SettingsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SettingsSubcommand {
    /// Print the current site settings.
    Show,
    /// Change fields and save the whole record.
    Set {
        /// FIELD=VALUE, repeatable.
        #[arg(required = true)]
        assignments: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_owned();
    }
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }
    if let Some(timeout) = cli.timeout {
        config.request_timeout = Some(timeout);
    }

    let session = Arc::new(SessionStore::restore(Arc::new(FileStorage::new(config.session_file.clone()))));
    let api = ApiClient::new(&config.base_url, Arc::clone(&session), config.request_timeout)?;

    match cli.command {
        Command::Ping => {
            println!("{}", api.ping().await?);
            Ok(())
        }
        Command::Menu { category } => run_menu(&api, &category).await,
        Command::Site => run_site(&api).await,
        Command::Login { username, password } => run_login(&api, &session, LoginForm::new(username, password)).await,
        Command::Logout => {
            session.logout();
            println!("signed out");
            Ok(())
        }
        Command::Status { route } => {
            let route = Route::from_path(&route).ok_or(CliError::UnknownRoute(route))?;
            let state = if session.is_authenticated() { "signed in" } else { "signed out" };
            println!("{state} ({})", config.session_file.display());
            println!("{}", describe_decision(route, guard(route, &session)));
            Ok(())
        }
        Command::Admin(admin) => {
            if let RouteDecision::Redirect(_) = guard(Route::Admin, &session) {
                return Err(CliError::NotSignedIn);
            }
            let result = match admin.command {
                AdminSubcommand::Menu(menu) => run_admin_menu(&api, menu.command).await,
                AdminSubcommand::Settings(settings) => run_admin_settings(&api, settings.command).await,
            };
            if let Err(CliError::Admin(e)) = &result {
                eprintln!("{}", e.acknowledgment());
                if e.is_auth_failure() && !session.is_authenticated() {
                    eprintln!("session expired; signed out");
                }
            }
            result
        }
    }
}

async fn run_menu(api: &dyn ContentApi, category: &str) -> Result<(), CliError> {
    let mut view = PublicView::new();
    println!("{LOADING_TITLE}");
    view.load(api).await;
    view.select(CategoryFilter::parse(category));

    let settings = view.settings();
    println!("{}\n{}\n", settings.menu_title, settings.menu_description);
    let tabs: Vec<String> = view
        .tabs()
        .into_iter()
        .map(|tab| if &tab.filter == view.selected() { format!("[{}]", tab.label) } else { tab.label })
        .collect();
    println!("{}\n", tabs.join("  "));

    if let Some((title, hint)) = view.empty_message() {
        println!("{title}\n{hint}");
        return Ok(());
    }
    for item in view.visible_items() {
        println!("{}", format_item(item));
        println!("    {}", item.description);
    }
    Ok(())
}

async fn run_site(api: &dyn ContentApi) -> Result<(), CliError> {
    let (settings, fallback) = fetch_site_copy(api).await;
    if let Some(e) = fallback {
        eprintln!("site settings unavailable ({e}); showing stock copy");
    }
    print_settings(&settings)
}

/// Public site copy, or the stock copy plus the failure that forced it.
async fn fetch_site_copy(api: &dyn ContentApi) -> (SiteSettings, Option<ApiError>) {
    match api.fetch_site_settings().await {
        Ok(settings) => (settings, None),
        Err(e) => (SiteSettings::default(), Some(e)),
    }
}

fn describe_decision(route: Route, decision: RouteDecision) -> String {
    match decision {
        RouteDecision::Render(_) => format!("{}: render", route.path()),
        RouteDecision::Redirect(to) => format!("{}: redirect to {}", route.path(), to.path()),
    }
}

async fn run_login(api: &dyn ContentApi, session: &SessionStore, form: LoginForm) -> Result<(), CliError> {
    if let RouteDecision::Redirect(_) = guard(Route::AdminLogin, session) {
        println!("already signed in");
        return Ok(());
    }
    login::login(api, session, &form).await?;
    println!("signed in");
    Ok(())
}

async fn run_admin_menu(api: &dyn ContentApi, command: MenuSubcommand) -> Result<(), CliError> {
    let mut editor = MenuEditor::new();
    editor.refresh(api).await?;

    match command {
        MenuSubcommand::List => {
            for item in editor.items() {
                println!("{}", format_item(item));
            }
        }
        MenuSubcommand::Add(fields) => {
            editor.start_create();
            if let Some(draft) = editor.draft_mut() {
                apply_fields(draft, fields);
            }
            report_submit(editor.submit(api).await?);
        }
        MenuSubcommand::Edit { id, fields } => {
            editor.start_edit(&id)?;
            if let Some(draft) = editor.draft_mut() {
                apply_fields(draft, fields);
            }
            report_submit(editor.submit(api).await?);
        }
        MenuSubcommand::Delete { id, yes } => {
            let confirm = |prompt: &str| yes || prompt_yes_no(prompt);
            if editor.delete_with(api, &id, &confirm).await? {
                println!("deleted {id}");
            } else {
                println!("kept {id}");
            }
        }
    }
    Ok(())
}

async fn run_admin_settings(api: &dyn ContentApi, command: SettingsSubcommand) -> Result<(), CliError> {
    let mut editor = SettingsEditor::new();
    editor.refresh(api).await?;

    match command {
        SettingsSubcommand::Show => {
            if let Some(settings) = editor.current() {
                print_settings(settings)?;
            }
        }
        SettingsSubcommand::Set { assignments } => {
            editor.start_edit()?;
            for assignment in &assignments {
                let (field, value) = assignment
                    .split_once('=')
                    .ok_or_else(|| CliError::InvalidAssignment(assignment.clone()))?;
                let Some(draft) = editor.draft_mut() else {
                    return Err(AdminError::NotEditing.into());
                };
                if !draft.set_field(field.trim(), value) {
                    editor.cancel();
                    return Err(CliError::UnknownField(field.trim().to_owned()));
                }
            }
            if !editor.has_changes() {
                editor.cancel();
                println!("no changes");
                return Ok(());
            }
            println!("{}", editor.submit(api).await?);
        }
    }
    Ok(())
}

fn apply_fields(draft: &mut MenuItemDraft, fields: ItemFields) {
    let ItemFields { name, description, price, category, available, image_url } = fields;
    if let Some(name) = name {
        draft.name = name;
    }
    if let Some(description) = description {
        draft.description = description;
    }
    if let Some(price) = price {
        draft.price = price;
    }
    if let Some(category) = category {
        draft.category = category;
    }
    if let Some(available) = available {
        draft.available = available;
    }
    if let Some(image_url) = image_url {
        draft.image_url = image_url;
    }
}

fn report_submit(outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Created(item) => println!("created {}", format_item(&item)),
        SubmitOutcome::Updated(item) => println!("updated {}", format_item(&item)),
    }
}

fn format_item(item: &MenuItem) -> String {
    let availability = if item.available { "available" } else { "unavailable" };
    format!("{}  {}  ${:.2}  [{}]  {availability}", item.id, item.name, item.price, item.category)
}

fn print_settings(settings: &SiteSettings) -> Result<(), CliError> {
    let value = serde_json::to_value(settings)?;
    for field in SITE_SETTINGS_FIELDS {
        let text = value.get(field).and_then(serde_json::Value::as_str).unwrap_or_default();
        println!("{field}: {text}");
    }
    Ok(())
}

fn prompt_yes_no(prompt: &str) -> bool {
    eprint!("{prompt} [y/N] ");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes" | "YES")
}
