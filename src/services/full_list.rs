//! Loading of sections that page on the client (authors, categories, labels).

use crate::pagination::ClientPager;
use crate::repository::CollectionReader;
use crate::repository::collections::Collection;
use crate::repository::errors::RepositoryResult;
use crate::repository::page::items_from_value;

/// Fetches the whole collection `C` in one request.
pub async fn load_all<C, R>(reader: &R) -> RepositoryResult<Vec<C::Item>>
where
    C: Collection,
    R: CollectionReader + ?Sized,
{
    let value = reader.fetch_all(C::PATH).await.map_err(|err| {
        log::error!("{}: failed to load collection: {err}", C::NAME);
        err
    })?;
    let items = items_from_value(value)?;
    log::debug!("{}: loaded {} items", C::NAME, items.len());
    Ok(items)
}

/// Reloads `pager` from the backend, keeping its page when it still exists.
pub async fn reload_pager<C, R>(
    reader: &R,
    pager: &mut ClientPager<C::Item>,
) -> RepositoryResult<()>
where
    C: Collection,
    R: CollectionReader + ?Sized,
{
    let items = load_all::<C, R>(reader).await?;
    pager.set_source_items(items);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::repository::collections::{Categories, Labels};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockBackend;

    #[tokio::test]
    async fn load_all_accepts_bare_arrays() {
        let mut backend = MockBackend::new();
        backend
            .expect_fetch_all()
            .withf(|path| path.to_string() == "/etiquettes")
            .returning(|_| {
                Ok(json!([
                    {"id": 1, "name": "Promo"},
                    {"id": 2, "name": "Best-seller"}
                ]))
            });

        let labels = load_all::<Labels, _>(&backend).await.unwrap();

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[1].name, "Best-seller");
    }

    #[tokio::test]
    async fn reload_keeps_page_and_clamps_after_shrink() {
        let mut backend = MockBackend::new();
        let mut sequence = mockall::Sequence::new();
        backend
            .expect_fetch_all()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| {
                let content: Vec<_> = (1..=12)
                    .map(|id| json!({"id": id, "name": format!("Cat {id}")}))
                    .collect();
                Ok(json!({ "content": content }))
            });
        backend
            .expect_fetch_all()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(json!([{"id": 1, "name": "Cat 1"}])));

        let mut pager = ClientPager::new(Vec::new(), 5);
        reload_pager::<Categories, _>(&backend, &mut pager).await.unwrap();
        pager.set_display_page(3);
        assert_eq!(pager.paginated_items().len(), 2);

        reload_pager::<Categories, _>(&backend, &mut pager).await.unwrap();
        assert_eq!(pager.display_page(), 1);
        assert_eq!(pager.total_items(), 1);
    }

    #[tokio::test]
    async fn load_errors_are_returned() {
        let mut backend = MockBackend::new();
        backend
            .expect_fetch_all()
            .returning(|_| Err(RepositoryError::Transport("connection reset".into())));

        let err = load_all::<Labels, _>(&backend).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Transport(_)));
    }
}
