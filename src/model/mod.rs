pub mod attendance;
pub mod record;
pub mod role;
pub mod session;
pub mod student;
