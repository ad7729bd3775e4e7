//! # PotatoPay API client
//!
//! Talks to the remote document API that owns every surface's block
//! collection. Authentication is an explicit [`AuthSession`] value.
//!
//! ```rust,ignore
//! let api = HttpDocumentApi::new("https://api.potatopay.co/v1", AuthSession::new(token))?;
//! let controller = AutosaveController::load(api, Surface::Overlay, AutosaveConfig::default()).await;
//! ```

mod client;
mod response;
mod session;

pub use client::{build_client, HttpDocumentApi, USER_AGENT};
pub use response::ApiResponse;
pub use session::AuthSession;
