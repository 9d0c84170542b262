//! Text parsing for share links, folder pages, and info responses.
//!
//! Everything here is pure string processing; fetching is done by
//! [`crate::drive`].
//!
//! # Current Support
//!
//! - File ids from `/file/d/<id>` share links (or raw ids)
//! - Folder link detection
//! - `data-id` attributes in folder page HTML
//! - Stream URL and title from `get_video_info` responses
//!
//! # Example
//!
//! ```
//! use videoloader_core::parser::{extract_data_ids, extract_identifier, is_folder_url};
//!
//! assert_eq!(extract_identifier("https://drive.google.com/file/d/abc123/view"), "abc123");
//! assert!(is_folder_url("https://drive.google.com/drive/folders/xyz"));
//! assert_eq!(extract_data_ids(r#"<div data-id="abcdef">"#), vec!["abcdef"]);
//! ```

mod folder;
mod identifier;
mod stream;

pub use folder::{MIN_DATA_ID_LEN, extract_data_ids};
pub use identifier::{extract_identifier, is_folder_url};
pub use stream::{StreamDescriptor, locate_stream};
