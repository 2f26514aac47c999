pub mod attendance;
pub mod coins;
pub mod dashboard;
pub mod marks;

pub use attendance::AttendanceView;
pub use coins::CoinsHistoryView;
pub use dashboard::DashboardView;
pub use marks::MarksView;
