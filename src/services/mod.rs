pub mod content_scraper;
pub mod droid;
pub mod rank_collector;
pub mod readability;

pub use content_scraper::*;
pub use droid::*;
pub use rank_collector::*;
pub use readability::*;
