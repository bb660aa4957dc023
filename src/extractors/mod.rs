pub mod external_id;

pub use external_id::ExternalId;
