pub mod blocking;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod router;
pub mod session;
pub mod workbook;

pub use error::DeskError;
pub use session::SessionContext;
