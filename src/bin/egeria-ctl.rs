//! `egeria-ctl`: query an Egeria view server from the command line.
//!
//! # Usage
//!
//! ```text
//! egeria-ctl [flags] <command> [args]
//!
//! Commands:
//!   origin                      show the platform origin string
//!   token                       request a bearer token and report success
//!   find <kind> [search]        search a collection ("*" or nothing = all)
//!   by-name <kind> <name>       exact-name lookup
//!   get <kind> <guid>           fetch one element
//!
//! Flags:
//!   --config, -c <path>         config file (default: $EGERIA_CONFIG_FILE or config/egeria.toml)
//!   --log-level, -l <level>     override log level
//!   --auth, -a                  obtain a bearer token before running the command
//!   --start <n>                 first result to return (default 0)
//!   --page-size <n>             maximum results (default from config)
//!   --help, -h                  print this help
//! ```

use std::process;

use serde_json::Value;
use tracing::info;

use egeria_client::bootstrap::logger;
use egeria_client::core::config;
use egeria_client::omvs::actor_manager::ActorManager;
use egeria_client::omvs::community_matters::CommunityMatters;
use egeria_client::omvs::digital_business::DigitalBusiness;
use egeria_client::omvs::feedback_manager::FeedbackManager;
use egeria_client::omvs::location_arena::LocationArena;
use egeria_client::omvs::product_manager::ProductManager;
use egeria_client::{Blocking, EgeriaError, PageOptions, SearchOptions, ServerClient};

// ── Collections reachable from the CLI ─────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Kind {
    ActorProfiles,
    ActorRoles,
    UserIdentities,
    BusinessCapabilities,
    DigitalProducts,
    ProductCatalogs,
    Locations,
    Communities,
    Comments,
    Tags,
    NoteLogs,
    Notes,
}

const KIND_NAMES: &[(&str, Kind)] = &[
    ("actor-profiles", Kind::ActorProfiles),
    ("actor-roles", Kind::ActorRoles),
    ("user-identities", Kind::UserIdentities),
    ("business-capabilities", Kind::BusinessCapabilities),
    ("digital-products", Kind::DigitalProducts),
    ("product-catalogs", Kind::ProductCatalogs),
    ("locations", Kind::Locations),
    ("communities", Kind::Communities),
    ("comments", Kind::Comments),
    ("tags", Kind::Tags),
    ("note-logs", Kind::NoteLogs),
    ("notes", Kind::Notes),
];

fn parse_kind(name: &str) -> Result<Kind, String> {
    KIND_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, k)| *k)
        .ok_or_else(|| {
            let known: Vec<&str> = KIND_NAMES.iter().map(|(n, _)| *n).collect();
            format!("unknown kind '{name}' (expected one of: {})", known.join(", "))
        })
}

// ── CLI arg parsing ────────────────────────────────────────────────────────

#[derive(Default)]
struct Args {
    config_path: Option<String>,
    log_level: Option<String>,
    auth: bool,
    start_from: u32,
    page_size: u32,
    command: Option<String>,
    rest: Vec<String>,
}

fn parse_args() -> Result<Args, String> {
    parse_args_from(std::env::args().skip(1))
}

fn parse_args_from(argv: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = argv.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => args.config_path = Some(value_of("--config", iter.next())?),
            "--log-level" | "-l" => args.log_level = Some(value_of("--log-level", iter.next())?),
            "--auth" | "-a" => args.auth = true,
            "--start" => args.start_from = parse_number("--start", iter.next())?,
            "--page-size" => args.page_size = parse_number("--page-size", iter.next())?,
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--" => {
                args.rest.extend(iter);
                break;
            }
            _ if args.command.is_none() => args.command = Some(arg),
            _ => args.rest.push(arg),
        }
    }

    Ok(args)
}

fn value_of(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_number(flag: &str, value: Option<String>) -> Result<u32, String> {
    let value = value_of(flag, value)?;
    value.parse().map_err(|_| format!("{flag}: '{value}' is not a number"))
}

fn print_help() {
    eprintln!("usage: egeria-ctl [flags] <command> [args]");
    eprintln!();
    eprintln!("commands:");
    eprintln!("  origin                    show the platform origin string");
    eprintln!("  token                     request a bearer token");
    eprintln!("  find <kind> [search]      search a collection");
    eprintln!("  by-name <kind> <name>     exact-name lookup");
    eprintln!("  get <kind> <guid>         fetch one element");
    eprintln!();
    eprintln!("kinds:");
    for (name, _) in KIND_NAMES {
        eprintln!("  {name}");
    }
    eprintln!();
    eprintln!("flags:");
    eprintln!("  --config, -c <path>       config file");
    eprintln!("  --log-level, -l <level>   override log level");
    eprintln!("  --auth, -a                obtain a bearer token first");
    eprintln!("  --start <n>               first result to return");
    eprintln!("  --page-size <n>           maximum results");
    eprintln!("  --help, -h                print this help");
}

// ── Dispatch ───────────────────────────────────────────────────────────────

async fn find(client: &ServerClient, kind: Kind, options: &SearchOptions) -> egeria_client::Result<Vec<Value>> {
    let c = client.clone();
    match kind {
        Kind::ActorProfiles => ActorManager::new(c).find_actor_profiles(options).await,
        Kind::ActorRoles => ActorManager::new(c).find_actor_roles(options).await,
        Kind::UserIdentities => ActorManager::new(c).find_user_identities(options).await,
        Kind::BusinessCapabilities => DigitalBusiness::new(c).find_business_capabilities(options).await,
        Kind::DigitalProducts => ProductManager::new(c).find_digital_products(options).await,
        Kind::ProductCatalogs => ProductManager::new(c).find_digital_product_catalogs(options).await,
        Kind::Locations => LocationArena::new(c).find_locations(options).await,
        Kind::Communities => CommunityMatters::new(c).find_communities(options).await,
        Kind::Comments => FeedbackManager::new(c).find_comments(options).await,
        Kind::Tags => FeedbackManager::new(c).find_tags(options).await,
        Kind::NoteLogs => FeedbackManager::new(c).find_note_logs(options).await,
        Kind::Notes => FeedbackManager::new(c).find_notes(options).await,
    }
}

async fn by_name(client: &ServerClient, kind: Kind, name: &str, page: PageOptions) -> egeria_client::Result<Vec<Value>> {
    let c = client.clone();
    match kind {
        Kind::ActorProfiles => ActorManager::new(c).get_actor_profiles_by_name(name, page).await,
        Kind::ActorRoles => ActorManager::new(c).get_actor_roles_by_name(name, page).await,
        Kind::UserIdentities => ActorManager::new(c).get_user_identities_by_name(name, page).await,
        Kind::BusinessCapabilities => DigitalBusiness::new(c).get_business_capabilities_by_name(name, page).await,
        Kind::DigitalProducts => ProductManager::new(c).get_digital_products_by_name(name, page).await,
        Kind::ProductCatalogs => ProductManager::new(c).get_digital_product_catalogs_by_name(name, page).await,
        Kind::Locations => LocationArena::new(c).get_locations_by_name(name, page).await,
        Kind::Communities => CommunityMatters::new(c).get_communities_by_name(name, page).await,
        Kind::Tags => FeedbackManager::new(c).get_tags_by_name(name, page).await,
        Kind::NoteLogs => FeedbackManager::new(c).get_note_logs_by_name(name, page).await,
        Kind::Comments | Kind::Notes => Err(EgeriaError::invalid("kind", "comments and notes have no name")),
    }
}

async fn get(client: &ServerClient, kind: Kind, guid: &str) -> egeria_client::Result<Option<Value>> {
    let c = client.clone();
    match kind {
        Kind::ActorProfiles => ActorManager::new(c).get_actor_profile_by_guid(guid).await,
        Kind::ActorRoles => ActorManager::new(c).get_actor_role_by_guid(guid).await,
        Kind::UserIdentities => ActorManager::new(c).get_user_identity_by_guid(guid).await,
        Kind::BusinessCapabilities => DigitalBusiness::new(c).get_business_capability_by_guid(guid).await,
        Kind::DigitalProducts => ProductManager::new(c).get_digital_product_by_guid(guid).await,
        Kind::ProductCatalogs => ProductManager::new(c).get_digital_product_catalog_by_guid(guid).await,
        Kind::Locations => LocationArena::new(c).get_location_by_guid(guid).await,
        Kind::Communities => CommunityMatters::new(c).get_community_by_guid(guid).await,
        Kind::Comments => FeedbackManager::new(c).get_comment(guid).await,
        Kind::Tags => FeedbackManager::new(c).get_tag(guid).await,
        Kind::NoteLogs => FeedbackManager::new(c).get_note_log_by_guid(guid).await,
        Kind::Notes => FeedbackManager::new(c).get_note_by_guid(guid).await,
    }
}

fn print_json(value: &Value) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| format!("serialise error: {e}"))?;
    println!("{text}");
    Ok(())
}

fn required<'a>(rest: &'a [String], index: usize, what: &str) -> Result<&'a str, String> {
    rest.get(index)
        .map(String::as_str)
        .ok_or_else(|| format!("missing {what}; see --help"))
}

fn run(args: Args) -> Result<(), String> {
    let _ = dotenvy::dotenv();

    if let Some(level) = args.log_level.as_deref() {
        logger::parse_level(level).map_err(|e| e.to_string())?;
    }

    let config = config::load(args.config_path.as_deref()).map_err(|e| e.to_string())?;
    logger::init(&config.logging, args.log_level.as_deref()).map_err(|e| e.to_string())?;

    info!(
        platform_url = %config.server.platform_url,
        view_server = %config.server.view_server,
        user_id = %config.server.user_id,
        "config loaded"
    );

    let command = args.command.clone().ok_or_else(|| "no command given; see --help".to_string())?;
    let client = ServerClient::from_config(&config).map_err(|e| e.to_string())?;
    let blocking = Blocking::new(client).map_err(|e| e.to_string())?;

    if args.auth || command == "token" {
        let token = blocking.create_egeria_bearer_token(None, None).map_err(|e| e.to_string())?;
        info!(token_len = token.len(), "authenticated");
        if command == "token" {
            println!("token issued for {} ({} chars)", config.server.user_id, token.len());
            return Ok(());
        }
    }

    let page = PageOptions::new(args.start_from, args.page_size);

    match command.as_str() {
        "origin" => {
            let origin = blocking.get_platform_origin().map_err(|e| e.to_string())?;
            println!("{origin}");
        }
        "find" => {
            let kind = parse_kind(required(&args.rest, 0, "kind")?)?;
            let search = args.rest.get(1).map(String::as_str).unwrap_or("*");
            let mut options = SearchOptions::new(search);
            options.page = page;
            let found = blocking.run(|c| find(c, kind, &options)).map_err(|e| e.to_string())?;
            print_json(&Value::Array(found))?;
        }
        "by-name" => {
            let kind = parse_kind(required(&args.rest, 0, "kind")?)?;
            let name = required(&args.rest, 1, "name")?;
            let found = blocking.run(|c| by_name(c, kind, name, page)).map_err(|e| e.to_string())?;
            print_json(&Value::Array(found))?;
        }
        "get" => {
            let kind = parse_kind(required(&args.rest, 0, "kind")?)?;
            let guid = required(&args.rest, 1, "guid")?;
            match blocking.run(|c| get(c, kind, guid)).map_err(|e| e.to_string())? {
                Some(element) => print_json(&element)?,
                None => eprintln!("no element found for {guid}"),
            }
        }
        other => return Err(format!("unknown command '{other}'; see --help")),
    }

    Ok(())
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
