pub mod address_list;
pub mod duration;
pub mod rate_limiter;
