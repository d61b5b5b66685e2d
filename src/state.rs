use crate::book::AttendanceBook;
use crate::models::WeekInfo;
use crate::storage::DataPaths;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub paths: DataPaths,
    pub weeks: Arc<Vec<WeekInfo>>,
    pub data: Arc<Mutex<AttendanceBook>>,
}

impl AppState {
    pub fn new(paths: DataPaths, weeks: Vec<WeekInfo>, data: AttendanceBook) -> Self {
        Self {
            paths,
            weeks: Arc::new(weeks),
            data: Arc::new(Mutex::new(data)),
        }
    }
}
