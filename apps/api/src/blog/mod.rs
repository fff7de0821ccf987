// Blog tools: extract a post's text from its URL, summarise or translate it,
// and archive it to the document store.

pub mod archive;
pub mod extract;
pub mod handlers;
