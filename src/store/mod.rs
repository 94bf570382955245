// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

pub mod db;
pub mod factory;
pub mod file;
pub mod memory;
pub mod traits;


pub use db::DbStore;
pub use factory::store_from_config;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::PageStore;
