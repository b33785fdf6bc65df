mod middleware;
mod public;
mod rate_limit;

pub use middleware::RequestContext;
pub use public::{HttpState, build_router};
pub use rate_limit::RateLimiter;

const DATASTAR_REQUEST_HEADER: &str = "datastar-request";
