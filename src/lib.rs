pub mod app;
pub mod book;
pub mod calendar;
pub mod errors;
pub mod excel;
pub mod handlers;
pub mod models;
pub mod records;
pub mod roster;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use book::AttendanceBook;
pub use state::AppState;
pub use storage::{DataPaths, load_book, resolve_data_paths};
