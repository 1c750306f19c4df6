use crate::pagination::page_window;
use crate::repository::errors::RepositoryError;

const TRANSPORT_MESSAGE: &str = "Unable to reach the server. Check your connection and retry.";
const INVALID_RESPONSE_MESSAGE: &str = "The server sent an unexpected response. Please retry.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network unreachable, timeout, or a request that could not be built.
    Transport,
    /// Non-2xx response.
    Server,
    /// 2xx response whose body is not a collection page.
    InvalidResponse,
}

/// Failure of the latest fetch, in a form the rendering layer can show as is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ErrorInfo {
    /// Whether a manual retry can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            ErrorKind::Transport | ErrorKind::InvalidResponse => true,
            ErrorKind::Server => self
                .status
                .is_none_or(|status| status >= 500 || status == 408 || status == 429),
        }
    }
}

impl From<&RepositoryError> for ErrorInfo {
    fn from(err: &RepositoryError) -> Self {
        match err {
            RepositoryError::Server { status, message } => ErrorInfo {
                kind: ErrorKind::Server,
                status: Some(*status),
                message: message.clone().unwrap_or_else(|| {
                    format!("The server returned an error (status {status}).")
                }),
            },
            RepositoryError::Decode(_) => ErrorInfo {
                kind: ErrorKind::InvalidResponse,
                status: None,
                message: INVALID_RESPONSE_MESSAGE.to_string(),
            },
            RepositoryError::Transport(_)
            | RepositoryError::Unexpected(_)
            | RepositoryError::Cancelled => ErrorInfo {
                kind: ErrorKind::Transport,
                status: None,
                message: TRANSPORT_MESSAGE.to_string(),
            },
        }
    }
}

/// Outcome of the most recent live fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchResult<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub total_pages: usize,
    pub is_loading: bool,
    pub error: Option<ErrorInfo>,
}

impl<T> Default for FetchResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_pages: 0,
            is_loading: false,
            error: None,
        }
    }
}

/// Everything a server-paginated table needs to render one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ListSnapshot<T> {
    pub result: FetchResult<T>,
    /// Raw search box content, echoed back for the input.
    pub search_text: String,
    /// A search edit is waiting for its debounce delay.
    pub search_pending: bool,
    /// Zero-indexed page of the latest issued fetch.
    pub page: usize,
    pub page_size: usize,
}

impl<T> ListSnapshot<T> {
    pub fn items(&self) -> &[T] {
        &self.result.items
    }

    pub fn is_loading(&self) -> bool {
        self.result.is_loading
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.result.error.as_ref()
    }

    /// Nothing is in flight and no search edit is waiting.
    pub fn is_settled(&self) -> bool {
        !self.result.is_loading && !self.search_pending
    }

    /// One-indexed page number for display.
    pub fn display_page(&self) -> usize {
        self.page.saturating_add(1)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.result.total_pages
    }

    /// One-indexed page links for the pagination control, `None` marking gaps.
    pub fn page_links(&self) -> Vec<Option<usize>> {
        page_window(self.result.total_pages, self.page)
    }
}
