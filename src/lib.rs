// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

pub mod auth;
pub mod config;
pub mod page;
pub mod server;
pub mod store;
pub mod types;
pub mod utils;

pub use config::*;
pub use page::*;
pub use server::*;
pub use store::*;
pub use types::*;
