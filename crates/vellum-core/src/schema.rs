pub mod app;
pub use app::Registry;

pub mod db;
