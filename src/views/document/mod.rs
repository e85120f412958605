mod document_view;

pub use document_view::{format_age, DocumentView};
