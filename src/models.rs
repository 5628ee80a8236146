pub mod billing;
pub mod dashboard;
pub mod intake;
pub mod status;
pub mod tutoring;
pub mod users;
