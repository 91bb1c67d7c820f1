pub mod text;
pub mod time;

pub use text::{pad_to_width, truncate_to_width};
pub use time::snapshot_timestamp_slug;
