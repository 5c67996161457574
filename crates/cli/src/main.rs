//! `carta` — terminal front end for the menu administration API.
//!
//! This binary is deliberately thin: it parses arguments, consults the
//! access guard before issuing requests that are doomed to be rejected, and
//! prints what the client crate returns. All real decisions live in
//! `carta-auth` and `carta-client`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgMatches, Command};

use carta_auth::{Access, Destination};
use carta_client::{
    ClientConfig, FileCredentialStore, Gateway, Session,
    models::{CategoryDraft, RestaurantDraft},
};
use carta_core::{CategoryId, RestaurantSlug};

fn cli() -> Command {
    Command::new("carta")
        .about("Multi-tenant restaurant menu administration")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Base URL of the menu API")
                .env("CARTA_API_URL")
                .default_value("http://127.0.0.1:8000/api/v1"),
        )
        .arg(
            Arg::new("credential-file")
                .long("credential-file")
                .help("Where the session credential is persisted")
                .env("CARTA_CREDENTIAL_FILE"),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in and persist the session credential")
                .arg(Arg::new("username").required(true))
                .arg(Arg::new("password").required(true)),
        )
        .subcommand(Command::new("logout").about("Destroy the stored session credential"))
        .subcommand(Command::new("whoami").about("Show the current principal"))
        .subcommand(
            Command::new("restaurants")
                .about("Manage the set of restaurants (admin)")
                .subcommand_required(true)
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("slug").required(true))
                        .arg(Arg::new("username").required(true))
                        .arg(Arg::new("password").required(true)),
                )
                .subcommand(Command::new("rm").arg(Arg::new("slug").required(true)))
                .subcommand(Command::new("toggle").arg(Arg::new("slug").required(true))),
        )
        .subcommand(
            Command::new("categories")
                .about("Manage one restaurant's categories")
                .arg(
                    Arg::new("slug")
                        .long("slug")
                        .required(true)
                        .help("Restaurant the categories belong to"),
                )
                .subcommand_required(true)
                .subcommand(Command::new("list"))
                .subcommand(Command::new("add").arg(Arg::new("name").required(true)))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true))),
        )
        .subcommand(
            Command::new("products")
                .about("List one restaurant's products")
                .arg(Arg::new("slug").long("slug").required(true))
                .subcommand_required(true)
                .subcommand(Command::new("list")),
        )
        .subcommand(
            Command::new("menu")
                .about("Show a restaurant's public menu (no sign-in needed)")
                .arg(Arg::new("slug").required(true)),
        )
}

fn credential_path(matches: &ArgMatches) -> PathBuf {
    if let Some(path) = matches.get_one::<String>("credential-file") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("carta")
        .join("credential")
}

/// Client-side pre-check before a protected command: a fast local deny with
/// a usable message, instead of a request the server would reject anyway.
/// The server remains the authority either way.
fn ensure_access(session: &Session, path: &str) -> Result<()> {
    let target = carta_auth::resolve(path);
    match carta_auth::evaluate(&target, &session.principal()) {
        Access::Allow => Ok(()),
        Access::Redirect(Destination::Login) => {
            bail!("not signed in; run `carta login <username> <password>` first")
        }
        Access::Redirect(Destination::TenantList) => {
            bail!("this account is not allowed to do that")
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    carta_observability::init();

    let matches = cli().get_matches();

    let api_url = matches
        .get_one::<String>("api-url")
        .expect("has a default")
        .clone();
    if matches.value_source("api-url") == Some(clap::parser::ValueSource::DefaultValue) {
        tracing::warn!("CARTA_API_URL not set; using dev default {api_url}");
    }
    let store = Arc::new(FileCredentialStore::new(credential_path(&matches)));
    let session = Arc::new(Session::new(ClientConfig::new(api_url), store));
    let gateway = Gateway::new(Arc::clone(&session));

    match matches.subcommand() {
        Some(("login", sub)) => {
            let username = sub.get_one::<String>("username").expect("required");
            let password = sub.get_one::<String>("password").expect("required");
            session
                .login(username, password)
                .await
                .context("login failed")?;
            println!("signed in as {}", describe(&session.principal()));
        }

        Some(("logout", _)) => {
            session.logout();
            println!("signed out");
        }

        Some(("whoami", _)) => {
            println!("{}", describe(&session.principal()));
        }

        Some(("restaurants", sub)) => {
            ensure_access(&session, "/restaurant")?;
            let admin = gateway.admin();
            match sub.subcommand() {
                Some(("list", _)) => {
                    for r in admin.list().await? {
                        let state = if r.is_active { "active" } else { "inactive" };
                        println!("{}\t{}\t{}", r.slug, r.name, state);
                    }
                }
                Some(("add", args)) => {
                    let draft = RestaurantDraft {
                        name: args.get_one::<String>("name").expect("required").clone(),
                        slug: RestaurantSlug::from(
                            args.get_one::<String>("slug").expect("required").clone(),
                        ),
                        username: args.get_one::<String>("username").expect("required").clone(),
                        password: args.get_one::<String>("password").expect("required").clone(),
                    };
                    let created = admin.create(&draft).await?;
                    println!("created {} ({})", created.slug, created.id);
                }
                Some(("rm", args)) => {
                    let slug = args.get_one::<String>("slug").expect("required");
                    admin.delete(slug).await?;
                    println!("deleted {slug}");
                }
                Some(("toggle", args)) => {
                    let slug = args.get_one::<String>("slug").expect("required");
                    let updated = admin.toggle_active(slug).await?;
                    let state = if updated.is_active { "active" } else { "inactive" };
                    println!("{} is now {state}", updated.slug);
                }
                _ => unreachable!("subcommand required"),
            }
        }

        Some(("categories", sub)) => {
            let slug = sub.get_one::<String>("slug").expect("required");
            ensure_access(&session, &format!("/restaurant/{slug}/edit"))?;
            let workspace = gateway.restaurant(RestaurantSlug::from(slug.clone()));
            match sub.subcommand() {
                Some(("list", _)) => {
                    for c in workspace.list_categories().await? {
                        println!("{}\t{}", c.id, c.name);
                    }
                }
                Some(("add", args)) => {
                    let draft = CategoryDraft {
                        name: args.get_one::<String>("name").expect("required").clone(),
                    };
                    let created = workspace.create_category(&draft).await?;
                    println!("created {}\t{}", created.id, created.name);
                }
                Some(("rm", args)) => {
                    let id: CategoryId = args
                        .get_one::<String>("id")
                        .expect("required")
                        .parse()
                        .context("category id must be an integer")?;
                    workspace.delete_category(id).await?;
                    println!("deleted category {id}");
                }
                _ => unreachable!("subcommand required"),
            }
        }

        Some(("products", sub)) => {
            let slug = sub.get_one::<String>("slug").expect("required");
            ensure_access(&session, &format!("/restaurant/{slug}/edit"))?;
            let workspace = gateway.restaurant(RestaurantSlug::from(slug.clone()));
            match sub.subcommand() {
                Some(("list", _)) => {
                    for p in workspace.list_products().await? {
                        println!(
                            "{}\t{}\t{:.2} / {:.2}",
                            p.id, p.name, p.price_currency_1, p.price_currency_2
                        );
                    }
                }
                _ => unreachable!("subcommand required"),
            }
        }

        Some(("menu", sub)) => {
            let slug = sub.get_one::<String>("slug").expect("required");
            let menu = gateway
                .public_menu(&RestaurantSlug::from(slug.clone()))
                .await?;
            println!("{} ({} / {})", menu.setting.company_name, menu.setting.currency_1, menu.setting.currency_2);
            for category in &menu.categories {
                println!("\n== {} ==", category.name);
                for product in &category.products {
                    println!(
                        "  {}\t{:.2} {} / {:.2} {}",
                        product.name,
                        product.price_currency_1,
                        menu.setting.currency_1,
                        product.price_currency_2,
                        menu.setting.currency_2
                    );
                    if !product.ingredient_names.is_empty() {
                        println!("  \t{}", product.ingredient_names.join(", "));
                    }
                }
            }
        }

        _ => unreachable!("subcommand required"),
    }

    Ok(())
}

fn describe(principal: &carta_auth::Principal) -> String {
    use carta_auth::Principal;

    match principal {
        Principal::Anonymous => "anonymous".to_owned(),
        Principal::Admin => "admin".to_owned(),
        Principal::Manager {
            restaurant_slug: Some(slug),
        } => format!("manager of {slug}"),
        Principal::Manager {
            restaurant_slug: None,
        } => "manager (no restaurant assigned)".to_owned(),
        Principal::Other { role: Some(role) } => format!("unrecognized role {role:?}"),
        Principal::Other { role: None } => "authenticated (no role)".to_owned(),
    }
}
