pub mod api;
pub mod app;
pub mod config;
pub mod errors;
pub mod flex_id;
pub mod handlers;
pub mod parser;
pub mod player;
pub mod preprocessing;
pub mod session;
pub mod setup;
pub mod start_time;
pub mod ui;

#[cfg(test)]
mod tests {
    use crate::app::{App, Pane, StatusFilter};
    use crate::config::AppConfig;

    #[test]
    fn test_app_new() {
        let app = App::new(AppConfig::default(), true);
        assert_eq!(app.active_pane, Pane::Matches);
        assert_eq!(app.status_filter, StatusFilter::All);
        assert!(app.snapshot.is_none());
        assert!(app.session.current().is_none());
    }

    #[test]
    fn test_status_filter_cycles() {
        let mut app = App::new(AppConfig::default(), true);
        app.cycle_status_filter();
        assert_eq!(app.status_filter, StatusFilter::Live);
        app.cycle_status_filter();
        assert_eq!(app.status_filter, StatusFilter::Upcoming);
        app.cycle_status_filter();
        assert_eq!(app.status_filter, StatusFilter::All);
    }
}
