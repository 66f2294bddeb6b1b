//! maqraa-client: HTTP client for the maqraa back-office API
//!
//! Wraps the backend's envelope/paged-list conventions: every list call
//! goes through the paged-response normalizer before typed DTOs come out,
//! and the authenticated session lives in a pluggable store.
//!
//! # Examples
//!
//! ## Listing with filters
//!
//! ```no_run
//! use maqraa_client::HttpClient;
//! use maqraa_api::dto::user::UserRole;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new("http://localhost:5000")?;
//!
//! let students = client.list_users()
//!     .role(UserRole::Student)
//!     .search("ahmad")
//!     .page(0, 20)
//!     .send()
//!     .await?;
//! println!("{} of {}", students.items.len(), students.total_count);
//! # Ok(())
//! # }
//! ```
//!
//! ## Driving a list view
//!
//! ```no_run
//! use maqraa_client::{HttpClient, ListPager};
//! use maqraa_api::dto::circle::Circle;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new("http://localhost:5000")?;
//! let mut pager: ListPager<Circle> = ListPager::new(20);
//!
//! let plan = pager.reload();
//! match client.list_circles().request(plan.request).send().await {
//!     Ok(page) => { pager.apply_page(plan.generation, page); }
//!     Err(_) => { pager.fail(plan.generation); }
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod circles;
pub mod config;
pub mod dashboard;
pub mod deleted;
pub mod error;
pub mod http;
pub mod invoices;
pub mod lookup;
pub mod pager;
pub mod prefs;
pub mod reports;
pub mod session;
pub mod subscriptions;

pub use auth::LoginOutcome;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use http::HttpClient;
pub use pager::{ListPager, LoadPlan};
pub use prefs::{Preferences, PreferencesStore};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
