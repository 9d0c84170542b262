//! Drive page requests: folder listing and the video info endpoint.
//!
//! # Example
//!
//! ```no_run
//! use videoloader_core::drive::DriveClient;
//! use videoloader_core::parser::locate_stream;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DriveClient::new()?;
//! let info = client.fetch_info("abc-Qt12kjmS21kjDm2kjd").await?;
//! let stream = locate_stream(&info.text);
//! println!("{:?}", stream.url);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::{DEFAULT_BASE_URL, DriveClient, InfoResponse, ORIGINATOR_APP};
pub use error::DriveError;
