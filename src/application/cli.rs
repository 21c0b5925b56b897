#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::IntoEnumIterator;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use crate::application::output;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Event;
use crate::domain::models::FormField;
use crate::domain::models::Language;
use crate::domain::models::Project;
use crate::domain::models::ScreenshotServiceBox;
use crate::domain::services::AdminWorkflow;
use crate::domain::services::Auth;
use crate::domain::services::featured_highlights;
use crate::domain::services::BrowseTab;
use crate::domain::services::LoadState;
use crate::domain::services::ProjectBrowser;
use crate::domain::services::ProjectQuery;
use crate::domain::services::ProjectRepository;
use crate::domain::services::ScreenshotCapture;
use crate::domain::services::SubmitOutcome;
use crate::infrastructure::functions::AdminProvisioner;
use crate::infrastructure::functions::PlaceholderScreenshots;
use crate::infrastructure::supabase::auth::SupabaseIdentity;
use crate::infrastructure::supabase::functions::SupabaseFunctions;
use crate::infrastructure::supabase::projects::SupabaseProjects;
use crate::infrastructure::supabase::SupabaseClient;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// Root matches followed by each nested subcommand's matches, so config
/// loading sees global arguments wherever they were passed.
fn matches_chain(matches: &ArgMatches) -> Vec<&ArgMatches> {
    let mut chain = vec![matches];
    let mut current = matches;
    while let Some((_, sub)) = current.subcommand() {
        chain.push(sub);
        current = sub;
    }

    return chain;
}

fn form_arg_id(field: FormField) -> String {
    return field.to_string().replace('_', "-");
}

fn form_args() -> Vec<Arg> {
    return FormField::iter()
        .map(|field| {
            let arg = Arg::new(form_arg_id(field))
                .long(form_arg_id(field))
                .num_args(1);

            match field {
                FormField::Technologies => {
                    return arg.help("Comma separated list of technologies.");
                }
                FormField::Featured => {
                    return arg
                        .help("Whether the project is highlighted on the home page.")
                        .value_parser(PossibleValuesParser::new(["true", "false"]));
                }
                _ => {
                    return arg.help(format!("Sets the {} field.", field.to_string().replace('_', " ")));
                }
            }
        })
        .collect();
}

fn arg_project_id() -> Arg {
    return Arg::new("id")
        .short('i')
        .long("id")
        .help("Project ID")
        .num_args(1)
        .required(true);
}

fn subcommand_admin() -> Command {
    let image_args = [
        Arg::new("image-url")
            .long("image-url")
            .num_args(1)
            .help("Image URL to use for the project."),
        Arg::new("capture")
            .long("capture")
            .action(ArgAction::SetTrue)
            .help("Captures a screenshot of the website URL and uses it as the image."),
    ];

    return Command::new("admin")
        .about("Manage projects as the configured admin account.")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("create")
                .about("Creates a project.")
                .args(form_args())
                .args(image_args.clone()),
        )
        .subcommand(
            Command::new("update")
                .about("Updates a project. Fields that are not passed keep their current value.")
                .arg(arg_project_id())
                .args(form_args())
                .args(image_args),
        )
        .subcommand(
            Command::new("delete")
                .about("Deletes a project.")
                .arg(arg_project_id())
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirms the deletion."),
                ),
        )
        .subcommand(
            Command::new("ensure")
                .about("Makes sure the admin account exists.")
                .arg(
                    Arg::new("remote")
                        .long("remote")
                        .action(ArgAction::SetTrue)
                        .help("Invokes the deployed ensure-admin function instead of the admin API."),
                ),
        );
}

fn credential_args() -> [Arg; 2] {
    return [
        Arg::new("email")
            .short('e')
            .long("email")
            .num_args(1)
            .help("Account email. Defaults to the configured admin email."),
        Arg::new("password")
            .short('p')
            .long("password")
            .num_args(1)
            .help("Account password. Defaults to the configured admin password."),
    ];
}

fn subcommand_auth() -> Command {
    return Command::new("auth")
        .about("Account helpers.")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("sign-up")
                .about("Registers an account.")
                .args(credential_args()),
        )
        .subcommand(
            Command::new("sign-in")
                .about("Signs in and prints the session.")
                .args(credential_args()),
        )
        .subcommand(
            Command::new("whoami")
                .about("Signs in, prints the user the identity service reports, and signs out again.")
                .args(credential_args()),
        );
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Talks to the web development consultant.")
        .after_help("CHAT COMMANDS:\n  /open         Opens the chat.\n  /close        Closes the chat.\n  /lang <lang>  Switches the language (ru, en, uz).\n  /quit         Exits.");
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_projects() -> Command {
    return Command::new("projects")
        .about("Browse the portfolio.")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list")
                .about("Lists projects, newest first.")
                .arg(
                    Arg::new("featured")
                        .short('f')
                        .long("featured")
                        .action(ArgAction::SetTrue)
                        .help("Only featured projects."),
                )
                .arg(
                    Arg::new("search")
                        .short('s')
                        .long("search")
                        .num_args(1)
                        .help("Case insensitive search over titles, descriptions and technologies."),
                ),
        )
        .subcommand(
            Command::new("highlights").about("The featured projects shown on the home page."),
        );
}

fn subcommand_screenshot() -> Command {
    return Command::new("screenshot")
        .about("Captures a screenshot of a website and prints the image URL.")
        .arg(
            Arg::new("url")
                .help("Website URL. https:// is assumed when no scheme is given.")
                .required(true),
        );
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("folio")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(false)
        .subcommand(subcommand_admin())
        .subcommand(subcommand_auth())
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_projects())
        .subcommand(subcommand_screenshot())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("FOLIO_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::Language.to_string())
                .short('l')
                .long(ConfigKey::Language.to_string())
                .env("FOLIO_LANGUAGE")
                .num_args(1)
                .help(format!("Site language for output and the chat assistant. [default: {}]", Config::default(ConfigKey::Language)))
                .value_parser(PossibleValuesParser::new(Language::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::SupabaseURL.to_string())
                .long(ConfigKey::SupabaseURL.to_string())
                .env("FOLIO_SUPABASE_URL")
                .num_args(1)
                .help(format!("Supabase project URL hosting the projects table, auth and functions. [default: {}]", Config::default(ConfigKey::SupabaseURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::SupabaseAnonKey.to_string())
                .long(ConfigKey::SupabaseAnonKey.to_string())
                .env("FOLIO_SUPABASE_ANON_KEY")
                .num_args(1)
                .help("Supabase anon key used for public requests.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::SupabaseServiceKey.to_string())
                .long(ConfigKey::SupabaseServiceKey.to_string())
                .env("FOLIO_SUPABASE_SERVICE_KEY")
                .num_args(1)
                .help("Supabase service role key, only needed by `admin ensure`.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiURL.to_string())
                .long(ConfigKey::GeminiURL.to_string())
                .env("FOLIO_GEMINI_URL")
                .num_args(1)
                .help(format!("Gemini API URL for the chat assistant. Can be swapped to a compatible proxy. [default: {}]", Config::default(ConfigKey::GeminiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiToken.to_string())
                .long(ConfigKey::GeminiToken.to_string())
                .env("FOLIO_GEMINI_TOKEN")
                .num_args(1)
                .help("Gemini API key for the chat assistant.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Model.to_string())
                .short('m')
                .long(ConfigKey::Model.to_string())
                .env("FOLIO_MODEL")
                .num_args(1)
                .help(format!("Gemini model answering chat messages. [default: {}]", Config::default(ConfigKey::Model)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::BackendHealthCheckTimeout.to_string())
                .long(ConfigKey::BackendHealthCheckTimeout.to_string())
                .env("FOLIO_BACKEND_HEALTH_CHECK_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds before timing out when doing a healthcheck for the chat backend. [default: {}]", Config::default(ConfigKey::BackendHealthCheckTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::AdminEmail.to_string())
                .long(ConfigKey::AdminEmail.to_string())
                .env("FOLIO_ADMIN_EMAIL")
                .num_args(1)
                .help(format!("Email of the admin account. [default: {}]", Config::default(ConfigKey::AdminEmail)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::AdminPassword.to_string())
                .long(ConfigKey::AdminPassword.to_string())
                .env("FOLIO_ADMIN_PASSWORD")
                .num_args(1)
                .help("Password of the admin account.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Offline.to_string())
                .long(ConfigKey::Offline.to_string())
                .env("FOLIO_OFFLINE")
                .action(ArgAction::SetTrue)
                .help("Uses local placeholder images instead of the hosted screenshot function. [default: false]")
                .global(true),
        );
}

/// Screenshot service for the current configuration.
fn screenshot_service(client: &SupabaseClient) -> ScreenshotServiceBox {
    if Config::get_bool(ConfigKey::Offline) {
        return Box::<PlaceholderScreenshots>::default();
    }

    return Box::new(SupabaseFunctions::new(client.clone()));
}

fn project_query(client: &SupabaseClient) -> ProjectQuery {
    let store = SupabaseProjects::new(client.clone());
    return ProjectQuery::new(Arc::new(ProjectRepository::new(Box::new(store))));
}

fn credentials(matches: &ArgMatches) -> (String, String) {
    let email = matches
        .get_one::<String>("email")
        .map(|e| return e.to_string())
        .unwrap_or_else(|| return Config::get(ConfigKey::AdminEmail));
    let password = matches
        .get_one::<String>("password")
        .map(|e| return e.to_string())
        .unwrap_or_else(|| return Config::get(ConfigKey::AdminPassword));

    return (email, password);
}

/// Reads straight from the store so the lookup never sees a stale list.
async fn find_project(query: &ProjectQuery, id: &str) -> Result<Project> {
    let projects = query.repository().list().await;
    match projects.into_iter().find(|e| return e.id == id) {
        Some(project) => return Ok(project),
        None => bail!("Project {id} not found"),
    }
}

async fn run_projects(matches: &ArgMatches) -> Result<()> {
    let lang = Config::language();
    let query = project_query(&SupabaseClient::default());

    match matches.subcommand() {
        Some(("list", list_matches)) => {
            let mut browser = ProjectBrowser::default();
            browser.load(&query).await;
            if browser.load_state() == LoadState::Failed {
                output::print_warning("Projects could not be loaded.");
            }

            if list_matches.get_flag("featured") {
                browser.set_tab(BrowseTab::Featured);
            }
            if let Some(search) = list_matches.get_one::<String>("search") {
                browser.set_query(search);
            }
            tracing::debug!(
                query = browser.query(),
                tab = ?browser.tab(),
                total = browser.projects().len(),
                shown = browser.filtered().len(),
                "projects filtered"
            );
            output::print_projects(browser.filtered(), lang);
        }
        Some(("highlights", _)) => {
            output::print_projects(&featured_highlights(&query.projects().await), lang);
        }
        _ => {
            subcommand_projects().print_long_help()?;
        }
    }

    return Ok(());
}

/// Copies every form field passed on the command line into the open dialog.
fn apply_form_args(workflow: &mut AdminWorkflow, matches: &ArgMatches) {
    for field in FormField::iter() {
        if let Some(value) = matches.get_one::<String>(&form_arg_id(field)) {
            workflow.form_mut().set(field, value);
        }
    }

    if let Some(image_url) = matches.get_one::<String>("image-url") {
        workflow.set_image_url(image_url);
    }
}

async fn submit_form(
    workflow: &mut AdminWorkflow,
    matches: &ArgMatches,
    client: &SupabaseClient,
    rx: &mut mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let lang = Config::language();
    apply_form_args(workflow, matches);

    if matches.get_flag("capture") {
        let capture = ScreenshotCapture::new(screenshot_service(client));
        workflow.capture_screenshot(&capture).await;
        output::print_notices(rx, lang);
    }

    tracing::debug!(
        state = ?workflow.state(),
        form = ?workflow.form(),
        image_url = workflow.image_url(),
        "submitting project form"
    );
    let outcome = workflow.submit().await;
    output::print_notices(rx, lang);

    match outcome {
        SubmitOutcome::Saved(project) => {
            output::print_projects(&[project], lang);
        }
        SubmitOutcome::Invalid(_) => {
            bail!(format!(
                "The project form is invalid:\n{}",
                output::field_errors_text(workflow.errors())
            ));
        }
        SubmitOutcome::MissingImage => {
            bail!("An image is required. Pass --image-url or --capture.");
        }
        SubmitOutcome::Failed => {
            bail!("The project could not be saved.");
        }
        SubmitOutcome::NotOpen | SubmitOutcome::Discarded => {
            tracing::warn!("submission did not complete");
        }
    }

    return Ok(());
}

async fn run_admin_ensure(matches: &ArgMatches) -> Result<()> {
    let report = if matches.get_flag("remote") {
        SupabaseFunctions::default().ensure_admin().await?
    } else {
        AdminProvisioner::default().ensure().await
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    if !report.success {
        bail!(report
            .details
            .or(report.error)
            .unwrap_or_else(|| return "Failed to ensure admin user exists".to_string()));
    }

    return Ok(());
}

async fn run_admin(matches: &ArgMatches) -> Result<()> {
    if let Some(("ensure", ensure_matches)) = matches.subcommand() {
        return run_admin_ensure(ensure_matches).await;
    }

    let lang = Config::language();
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let client = SupabaseClient::default();
    let auth = Auth::new(Box::new(SupabaseIdentity::new(client.clone())));
    let query = project_query(&client);
    let mut workflow = AdminWorkflow::new(query.clone(), tx.clone());

    let email = Config::get(ConfigKey::AdminEmail);
    let signed_in = auth
        .sign_in(&email, &Config::get(ConfigKey::AdminPassword), &tx)
        .await;
    output::print_notices(&mut rx, lang);
    if signed_in.is_none() {
        bail!(format!("Unable to sign in as {email}"));
    }

    match matches.subcommand() {
        Some(("create", create_matches)) => {
            workflow.open_create();
            submit_form(&mut workflow, create_matches, &client, &mut rx).await?;
        }
        Some(("update", update_matches)) => {
            let id = update_matches
                .get_one::<String>("id")
                .map(|e| return e.to_string())
                .unwrap_or_default();
            let project = find_project(&query, &id).await?;
            workflow.open_edit(&project);
            submit_form(&mut workflow, update_matches, &client, &mut rx).await?;
        }
        Some(("delete", delete_matches)) => {
            let id = delete_matches
                .get_one::<String>("id")
                .map(|e| return e.to_string())
                .unwrap_or_default();
            let project = find_project(&query, &id).await?;
            workflow.request_delete(&project);

            if !delete_matches.get_flag("yes") {
                workflow.cancel_delete();
                output::print_hint(&format!(
                    "Delete \"{}\"? Run again with --yes to confirm.",
                    project.title.resolve(lang)
                ));
            } else {
                workflow.confirm_delete().await;
                output::print_notices(&mut rx, lang);
            }
        }
        _ => {
            subcommand_admin().print_long_help()?;
        }
    }

    auth.sign_out(&tx).await;
    output::print_notices(&mut rx, lang);
    return Ok(());
}

async fn run_auth(matches: &ArgMatches) -> Result<()> {
    let lang = Config::language();
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let auth = Auth::new(Box::<SupabaseIdentity>::default());

    match matches.subcommand() {
        Some(("sign-up", sign_up_matches)) => {
            let (email, password) = credentials(sign_up_matches);
            let user = auth.sign_up(&email, &password, &tx).await;
            output::print_notices(&mut rx, lang);
            if let Some(user) = user {
                println!("Registered {} ({})", user.email.unwrap_or_default(), user.id);
            }
        }
        Some(("sign-in", sign_in_matches)) => {
            let (email, password) = credentials(sign_in_matches);
            auth.sign_in(&email, &password, &tx).await;
            output::print_notices(&mut rx, lang);
            if let Some(session) = auth.current_session().await {
                let expires_at = session
                    .expires_at
                    .map(|e| return e.to_rfc3339())
                    .unwrap_or_else(|| return "never".to_string());
                println!(
                    "Signed in as {} ({}), session expires {expires_at}",
                    session.user.email.unwrap_or_default(),
                    session.user.id
                );
            }
        }
        Some(("whoami", whoami_matches)) => {
            let (email, password) = credentials(whoami_matches);
            if auth.sign_in(&email, &password, &tx).await.is_some() {
                match auth.current_user().await {
                    Some(user) => {
                        println!("{} ({})", user.email.unwrap_or_default(), user.id);
                    }
                    None => println!("Not signed in."),
                }
                auth.sign_out(&tx).await;
            }
            output::print_notices(&mut rx, lang);
        }
        _ => {
            subcommand_auth().print_long_help()?;
        }
    }

    return Ok(());
}

async fn run_screenshot(matches: &ArgMatches) -> Result<()> {
    let url = matches
        .get_one::<String>("url")
        .map(|e| return e.to_string())
        .unwrap_or_default();
    if url.trim().is_empty() {
        bail!("A website URL is required.");
    }

    let capture = ScreenshotCapture::new(screenshot_service(&SupabaseClient::default()));
    println!("{}", capture.capture(&url).await);

    return Ok(());
}

/// Runs the selected command. Returns true when the chat should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {}
    }

    Config::load(build(), matches_chain(&matches)).await?;

    match matches.subcommand() {
        Some(("admin", subcmd_matches)) => run_admin(subcmd_matches).await?,
        Some(("auth", subcmd_matches)) => run_auth(subcmd_matches).await?,
        Some(("projects", subcmd_matches)) => run_projects(subcmd_matches).await?,
        Some(("screenshot", subcmd_matches)) => run_screenshot(subcmd_matches).await?,
        _ => return Ok(true),
    }

    return Ok(false);
}
