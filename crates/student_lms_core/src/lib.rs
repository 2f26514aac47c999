pub mod domain;
pub mod ports;

pub use domain::{
    CoinsHistoryPage, DashboardData, Group, GroupDays, GroupMember, Introduction,
    LeaderboardEntry, Pagination, Session, Statistics, Student, StudentMarks, StudentProfile,
    Transaction, TransactionKind,
};
pub use ports::{
    HttpRequest, HttpResponse, HttpTransport, Method, PortError, PortResult, SessionStorage,
};
