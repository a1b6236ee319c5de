//! Travel-time resolution between consecutive classes.
//!
//! For each class after the first, one distance query is issued with the
//! previous class's location as origin, the class's own location as
//! destination and the class's own transport mode. The duration text from
//! the first matrix element is shown in that class's row. Failures only
//! affect their own row.

mod error;
mod proxy;
mod resolver;
mod source;

pub use error::TravelQueryError;
pub use proxy::ProxyClient;
pub use resolver::{TravelTime, TravelTimeResolver, extract_travel_time};
pub use source::{TravelBackend, TravelTimeSource};
