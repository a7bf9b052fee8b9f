pub mod v1;

use crate::server::Server;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

/// Every route with error recovery and request tracing applied.
pub fn service(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Infallible> + Clone {
    v1::routes(server)
        .recover(v1::recover_error)
        .with(warp::trace::request())
}
