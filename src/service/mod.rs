//! Catalog core: one transaction per operation over the relational store.

pub mod address;
pub mod bean;
pub mod country;
pub mod roastery;
pub mod unit_of_work;
mod validation;

pub use bean::{BeanService, PgBeanService};
pub use roastery::{PgRoasteryService, RoasteryService};
pub use unit_of_work::UnitOfWork;
pub use validation::{RequestValidator, MAX_VARCHAR};
