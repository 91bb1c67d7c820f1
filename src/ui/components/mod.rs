pub mod layout;
pub mod listing_detail;
pub mod notice;

pub use layout::centered_rect;
pub use listing_detail::render_listing_detail;
pub use notice::render_notice;
