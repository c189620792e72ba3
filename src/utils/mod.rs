pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{base_url, is_valid_url, join_url, origin, with_query_param};
