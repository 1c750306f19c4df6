use async_trait::async_trait;
use bookstore_admin::ClientPager;
use bookstore_admin::domain::author::Author;
use bookstore_admin::repository::collections::Authors;
use bookstore_admin::repository::errors::{RepositoryError, RepositoryResult};
use bookstore_admin::repository::{CollectionReader, PageRequest};
use bookstore_admin::services::full_list::{load_all, reload_pager};
use serde_json::{Value, json};

/// Author directory served whole, as `/authors` does.
struct AuthorDirectory(Vec<(i64, &'static str, &'static str)>);

#[async_trait]
impl CollectionReader for AuthorDirectory {
    async fn fetch_page(&self, path: &str, _request: &PageRequest) -> RepositoryResult<Value> {
        Err(RepositoryError::Unexpected(format!("{path} is not paginated")))
    }

    async fn fetch_all(&self, _path: &str) -> RepositoryResult<Value> {
        let authors: Vec<Value> = self
            .0
            .iter()
            .map(|(id, name, nationality)| {
                json!({"id": id, "name": name, "nationality": nationality})
            })
            .collect();
        Ok(json!(authors))
    }
}

fn directory(count: i64) -> AuthorDirectory {
    let nationalities = ["French", "Belgian", "Swiss"];
    let names = [
        "Hugo",
        "Simenon",
        "Ramuz",
        "Zola",
        "Hergé",
        "Cendrars",
        "Camus",
        "Yourcenar",
        "Dürrenmatt",
    ];
    AuthorDirectory(
        (1..=count)
            .map(|id| {
                let index = (id as usize - 1) % names.len();
                (id, names[index], nationalities[index % nationalities.len()])
            })
            .collect(),
    )
}

#[tokio::test]
async fn loaded_collection_is_sliced_into_pages() {
    let authors = load_all::<Authors, _>(&directory(23)).await.unwrap();
    let mut pager = ClientPager::new(authors, 10);

    pager.set_display_page(3);

    let ids: Vec<i64> = pager.paginated_items().iter().map(|a| a.id.get()).collect();
    assert_eq!(ids, vec![21, 22, 23]);
    assert_eq!(pager.total_pages(), 3);
    assert_eq!(pager.page_links(), vec![Some(1), Some(2), Some(3)]);
}

#[tokio::test]
async fn deleting_the_last_items_moves_back_a_page() {
    let authors = load_all::<Authors, _>(&directory(12)).await.unwrap();
    let mut pager = ClientPager::new(authors, 5);
    pager.set_display_page(3);
    assert_eq!(pager.paginated_items().len(), 2);

    pager.retain(|author: &Author| author.id.get() <= 10);

    assert_eq!(pager.display_page(), 2);
    assert_eq!(pager.paginated_items().len(), 5);
}

#[tokio::test]
async fn reload_keeps_search_and_clamps_page() {
    let mut pager = ClientPager::new(Vec::new(), 2);
    reload_pager::<Authors, _>(&directory(18), &mut pager).await.unwrap();
    pager.set_search_text("swiss");
    assert_eq!(pager.total_items(), 6);
    pager.set_page(2);

    reload_pager::<Authors, _>(&directory(9), &mut pager).await.unwrap();

    assert_eq!(pager.total_items(), 3);
    assert_eq!(pager.total_pages(), 2);
    assert_eq!(pager.page(), 1);
    assert_eq!(pager.paginated_items()[0].name, "Dürrenmatt");
}
