//! ============================================================================
//! Publisher Module - Tistory Post Publishing
//! ============================================================================
//! - load_content: read the prepared post body from disk
//! - TistoryPublisher: submit the post and check the embedded status
//! - append_outputs: hand post id/url to the CI step output file
//! ============================================================================

mod content;
mod output;
mod tistory;

pub use content::load_content;
pub use output::append_outputs;
pub use tistory::TistoryPublisher;
