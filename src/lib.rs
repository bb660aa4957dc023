//! Beanpedia: catalog of roasted coffee beans and the roasteries that produce them,
//! stored in PostgreSQL and served over HTTP.

pub mod config;
pub mod countries;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{Address, Bean, BeanComposition, BeanProcessing, DegreeOfRoasting, NewBean, NewBeanWithoutRoasteryId, NewRoastery, Roastery};
pub use routes::{app, catalog_routes, common_routes};
pub use service::{BeanService, PgBeanService, PgRoasteryService, RoasteryService};
pub use state::AppState;
pub use store::{connect, ensure_database_exists};
