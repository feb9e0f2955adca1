use anyhow::Result;
use clap::{Parser, Subcommand};
#[cfg(target_family = "windows")]
use colored::control::set_virtual_terminal;
use colored::Colorize;
use std::sync::Arc;
use std::time::Duration;
use tour_of_heroes::api::API_HEROES;
use tour_of_heroes::config::ServiceConfig;
use tour_of_heroes::route::{History, RouteSnapshot};
use tour_of_heroes::{
    Hero, HeroDetail, HeroService, InMemoryHeroService, Lookup, MessageService, NewHero,
    RemoteHeroService,
};
use tracing_subscriber::EnvFilter;

/// Browse and edit the hero roster
#[derive(Parser, Debug)]
#[command(name = "tour-of-heroes", version)]
struct Args {
    /// Hero collection endpoint
    #[arg(long, env = "HEROES_URL", default_value = API_HEROES)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "HEROES_TIMEOUT", default_value_t = 10)]
    timeout: u64,

    /// Use the built-in hero list instead of the endpoint
    #[arg(long)]
    in_memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all heroes
    List,
    /// Show one hero
    Show { id: String },
    /// Search heroes by name
    Search { term: String },
    /// Add a hero
    Add { name: String },
    /// Rename a hero
    Rename { id: String, name: String },
    /// Delete a hero
    Delete { id: String },
}

fn print_hero(hero: &Hero) {
    println!("{:>4}  {}", hero.id.to_string().yellow(), hero.name);
}

fn print_heroes(heroes: &[Hero]) {
    if heroes.is_empty() {
        println!("{}", "no heroes".red());
    }
    for hero in heroes {
        print_hero(hero);
    }
}

/// Routes `detail/{id}` the way the router would. Ids that do not match the
/// pattern or do not parse end up as an unknown id.
fn detail_route(id: &str) -> (String, RouteSnapshot) {
    let path = format!("detail/{id}");
    let route = RouteSnapshot::from_path("detail/:id", &path).unwrap_or_default();
    (path, route)
}

async fn open_detail(
    service: Arc<dyn HeroService>,
    history: Arc<History>,
    id: &str,
) -> HeroDetail {
    let (path, route) = detail_route(id);
    history.push(path);
    let mut detail = HeroDetail::new(route, service, history);
    detail.load().await;
    detail
}

async fn run(command: Command, service: Arc<dyn HeroService>) {
    let history = Arc::new(History::new());
    history.push("heroes");

    match command {
        Command::List => print_heroes(&service.get_heroes().await),
        Command::Show { id } => {
            let detail = open_detail(service, history, &id).await;
            match detail.hero() {
                Some(hero) => print_hero(hero),
                None => println!("{}", format!("no hero with id {id}").red()),
            }
        }
        Command::Search { term } => print_heroes(&service.search_heroes(&term).await),
        Command::Add { name } => match service.add_hero(NewHero::new(name)).await {
            Some(hero) => print_hero(&hero),
            None => println!("{}", "hero was not added".red()),
        },
        Command::Rename { id, name } => {
            let mut detail = open_detail(service, history, &id).await;
            if detail.hero().is_none() {
                println!("{}", format!("no hero with id {id}").red());
                return;
            }
            detail.set_name(name);
            detail.save().await;
            if let Some(hero) = detail.hero() {
                print_hero(hero);
            }
        }
        Command::Delete { id } => {
            let (_, route) = detail_route(&id);
            match service.get_hero(route.id_param("id")).await {
                Lookup::Found(hero) => match service.delete_hero(&hero).await {
                    Some(()) => println!("{} {}", "deleted".green(), hero.name),
                    None => println!("{}", format!("could not delete {}", hero.name).red()),
                },
                Lookup::NotFound => println!("{}", format!("no hero with id {id}").red()),
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tour_of_heroes=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    #[cfg(target_family = "windows")]
    {
        if set_virtual_terminal(true).is_err() {
            eprintln!("failed to print colorfully.")
        };
    }

    let messages = Arc::new(MessageService::new());
    let service: Arc<dyn HeroService> = if args.in_memory {
        Arc::new(InMemoryHeroService::new(messages.clone()))
    } else {
        let config = ServiceConfig {
            base_url: args.base_url,
            timeout: Duration::from_secs(args.timeout),
        };
        let client = config.build_client()?;
        Arc::new(RemoteHeroService::new(client, config.base_url, messages.clone()))
    };

    run(args.command, service).await;

    if !messages.is_empty() {
        println!();
        println!("{}", "Messages".bold());
        for message in messages.messages() {
            println!("  {}", message.dimmed());
        }
    }

    Ok(())
}
