//! Handlers 模块

pub mod bins;
pub mod categories;
pub mod controllers;
pub mod health;
pub mod locate;
pub mod locations;
pub mod metrics;
pub mod parts;
pub mod stock_status;

pub use bins::*;
pub use categories::*;
pub use controllers::*;
pub use health::*;
pub use locate::*;
pub use locations::*;
pub use metrics::*;
pub use parts::*;
pub use stock_status::*;
