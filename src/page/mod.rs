// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

pub mod filters;
pub mod resource;
pub mod response;
pub mod sanitize;
pub mod schema;
pub mod types;


pub use filters::*;
pub use resource::*;
pub use response::*;
pub use sanitize::*;
pub use schema::*;
pub use types::*;
