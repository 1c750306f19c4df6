//! Prints one page of an admin list section.
//!
//! Usage: `bookstore-admin <section> [search] [page]` where `section` is one of
//! books, orders, users, authors, categories or labels and `page` is
//! one-indexed. Settings come from the YAML file named by
//! `BOOKSTORE_ADMIN_CONFIG` (optional) and `BOOKSTORE_ADMIN__*` variables.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use dotenvy::dotenv;

use bookstore_admin::domain::author::Author;
use bookstore_admin::domain::book::Book;
use bookstore_admin::domain::category::Category;
use bookstore_admin::domain::label::Label;
use bookstore_admin::domain::order::Order;
use bookstore_admin::domain::user::User;
use bookstore_admin::domain::Searchable;
use bookstore_admin::dto::list_view::ListSnapshot;
use bookstore_admin::models::config::{AdminConfig, load_config};
use bookstore_admin::repository::CollectionReader;
use bookstore_admin::repository::collections::{
    Authors, Books, Categories, Collection, Labels, Orders, Users,
};
use bookstore_admin::repository::http::HttpCollectionReader;
use bookstore_admin::services::full_list::load_all;
use bookstore_admin::{ClientPager, ListOptions, ListQueryCoordinator};

const USAGE: &str =
    "usage: bookstore-admin <books|orders|users|authors|categories|labels> [search] [page]";

trait TableRow {
    fn row(&self) -> String;
}

impl TableRow for Book {
    fn row(&self) -> String {
        let author = self.author.as_ref().map_or("-", |a| a.name.as_str());
        format!(
            "#{:<5} {:<40} {:<25} {:>8.2} stock {}",
            self.id.get(),
            self.title,
            author,
            self.price,
            self.stock
        )
    }
}

impl TableRow for Order {
    fn row(&self) -> String {
        format!(
            "#{:<5} {:<12} {:<30} {:>9.2} {}",
            self.id.get(),
            self.reference.as_deref().unwrap_or("-"),
            self.customer_email.as_deref().unwrap_or("-"),
            self.total_amount,
            self.status
        )
    }
}

impl TableRow for User {
    fn row(&self) -> String {
        let state = if self.active { "active" } else { "inactive" };
        format!(
            "#{:<5} {:<30} {:<30} {:?} {state}",
            self.id.get(),
            self.display_name(),
            self.email,
            self.role
        )
    }
}

impl TableRow for Author {
    fn row(&self) -> String {
        format!("#{:<5} {}", self.id.get(), self.name)
    }
}

impl TableRow for Category {
    fn row(&self) -> String {
        format!(
            "#{:<5} {:<25} {}",
            self.id.get(),
            self.name,
            self.description.as_deref().unwrap_or("")
        )
    }
}

impl TableRow for Label {
    fn row(&self) -> String {
        format!("#{:<5} {:<25} {}", self.id.get(), self.name, self.color.as_deref().unwrap_or(""))
    }
}

fn render_links(links: &[Option<usize>], current: usize) -> String {
    links
        .iter()
        .map(|link| match link {
            Some(page) if *page == current => format!("[{page}]"),
            Some(page) => page.to_string(),
            None => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

async fn show_remote<C>(
    reader: Arc<dyn CollectionReader>,
    config: &AdminConfig,
    search: &str,
    page_number: usize,
) -> Result<(), String>
where
    C: Collection,
    C::Item: TableRow,
{
    let list = ListQueryCoordinator::<C>::new(reader, ListOptions::from(config));
    let searching = !search.trim().is_empty();
    if searching {
        list.set_search_text(search);
        list.settled().await;
    }
    if !searching || page_number > 1 {
        list.set_page(page_number.saturating_sub(1));
    }
    let snapshot: ListSnapshot<C::Item> = list.settled().await;

    if let Some(error) = snapshot.error() {
        return Err(error.message.clone());
    }

    println!(
        "{}: page {}/{} ({} items)",
        C::NAME,
        snapshot.display_page(),
        snapshot.result.total_pages.max(1),
        snapshot.result.total_items
    );
    for item in snapshot.items() {
        println!("  {}", item.row());
    }
    println!("{}", render_links(&snapshot.page_links(), snapshot.display_page()));
    Ok(())
}

async fn show_local<C>(
    reader: &dyn CollectionReader,
    config: &AdminConfig,
    search: &str,
    page_number: usize,
) -> Result<(), String>
where
    C: Collection,
    C::Item: TableRow + Searchable,
{
    let items = load_all::<C, _>(reader).await.map_err(|err| err.to_string())?;
    let mut pager = ClientPager::new(items, config.page_size);
    pager.set_search_text(search);
    pager.set_display_page(page_number);

    println!(
        "{}: page {}/{} ({} items)",
        C::NAME,
        pager.display_page(),
        pager.total_pages().max(1),
        pager.total_items()
    );
    for item in pager.paginated_items() {
        println!("  {}", item.row());
    }
    println!("{}", render_links(&pager.page_links(), pager.display_page()));
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let Some(section) = args.next() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };
    let search = args.next().unwrap_or_default();
    let page_number = match args.next().map(|raw| raw.parse::<usize>()) {
        None => 1,
        Some(Ok(page)) => page,
        Some(Err(err)) => {
            eprintln!("invalid page number: {err}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let config_path = env::var("BOOKSTORE_ADMIN_CONFIG").ok();
    let config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let reader: Arc<dyn CollectionReader> = match HttpCollectionReader::new(&config) {
        Ok(reader) => Arc::new(reader),
        Err(err) => {
            log::error!("Failed to build HTTP client: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = match section.as_str() {
        "books" => show_remote::<Books>(reader, &config, &search, page_number).await,
        "orders" => show_remote::<Orders>(reader, &config, &search, page_number).await,
        "users" => show_remote::<Users>(reader, &config, &search, page_number).await,
        "authors" => show_local::<Authors>(reader.as_ref(), &config, &search, page_number).await,
        "categories" => {
            show_local::<Categories>(reader.as_ref(), &config, &search, page_number).await
        }
        "labels" => show_local::<Labels>(reader.as_ref(), &config, &search, page_number).await,
        other => {
            eprintln!("unknown section `{other}`\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            log::error!("{section}: {message}");
            ExitCode::FAILURE
        }
    }
}
