// Recruiter hiring posts and the public job board.

pub mod handlers;
