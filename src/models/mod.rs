pub mod checkin_log;
pub mod department;
pub mod role;
pub mod user;
