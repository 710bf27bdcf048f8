//! Thin async client for the YouTube Data API v3.
//!
//! Every operation validates that a key is set, builds a fresh query, issues
//! one GET (or one per page for the fetch-all calls) and returns the JSON
//! payload as the API sent it.
//!
//! ```no_run
//! # async fn demo() -> Result<(), yt_data::Error> {
//! use yt_data::{Limit, YouTube};
//!
//! let youtube = YouTube::new()?.with_key("API_KEY");
//! let video = youtube.video_by_id("dQw4w9WgXcQ").await?;
//! let threads = youtube
//!     .comment_threads_by_video_id("dQw4w9WgXcQ", None, Limit::AtMost(500))
//!     .await?;
//! # let _ = (video, threads);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod youtube;

pub use config::Config;
pub use youtube::{ApiError, Error, Limit, Page, Query, YouTube};
