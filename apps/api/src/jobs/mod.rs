// Job postings: storage access, startup seeding, and the /jobs endpoints.

pub mod handlers;
pub mod seed;
pub mod store;
