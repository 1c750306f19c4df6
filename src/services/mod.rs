pub mod debounce;
pub mod full_list;
pub mod list_query;
