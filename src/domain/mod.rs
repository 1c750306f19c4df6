//! Domain records shown by the admin list views.

pub mod author;
pub mod book;
pub mod category;
pub mod label;
pub mod order;
pub mod types;
pub mod user;

/// Records that can be narrowed by the free-text box of a client-side list.
pub trait Searchable {
    /// Text fields compared against the search term.
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match. A blank term matches everything.
    fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
