use chrono::Duration;

#[derive(Clone, Debug)]
pub struct Settings {
    pub questions_per_page: usize,
    pub progress_ttl: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            questions_per_page: 20,
            progress_ttl: Duration::days(7),
        }
    }
}
