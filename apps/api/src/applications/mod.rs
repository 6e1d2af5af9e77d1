// Application intake and the recruiter-driven status transition flow.

pub mod caller;
pub mod handlers;
pub mod transition;
