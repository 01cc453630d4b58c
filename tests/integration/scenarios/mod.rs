mod common_endpoints;
mod rate_limit;
