//! Relational schema: table DDL in dependency order. Declarations only; the services
//! own all reads and writes.
//!
//! Foreign-key behavior carries the delete semantics:
//! - `bean.roastery_id` cascades, so deleting a roastery removes its beans;
//! - `bean_origin.bean_id` cascades, so deleting a bean removes its origin rows;
//! - `roastery.address_id` is unique (addresses are never shared) and set null when
//!   the address row is removed.

pub const COUNTRY: &str = r#"
CREATE TABLE IF NOT EXISTS country (
    id SERIAL PRIMARY KEY,
    alpha2_code CHAR(2) NOT NULL UNIQUE
)"#;

pub const ADDRESS: &str = r#"
CREATE TABLE IF NOT EXISTS address (
    id SERIAL PRIMARY KEY,
    address1 VARCHAR(255) NOT NULL,
    address2 VARCHAR(255),
    address3 VARCHAR(255),
    city VARCHAR(255) NOT NULL,
    postal_code VARCHAR(255) NOT NULL,
    country_id INTEGER NOT NULL REFERENCES country (id) ON UPDATE RESTRICT ON DELETE RESTRICT
)"#;

pub const ROASTERY: &str = r#"
CREATE TABLE IF NOT EXISTS roastery (
    id SERIAL PRIMARY KEY,
    external_id UUID NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    address_id INTEGER UNIQUE REFERENCES address (id) ON UPDATE RESTRICT ON DELETE SET NULL,
    phone_number VARCHAR(255),
    website VARCHAR(255),
    facebook VARCHAR(255),
    instagram VARCHAR(255),
    twitter VARCHAR(255)
)"#;

pub const BEAN: &str = r#"
CREATE TABLE IF NOT EXISTS bean (
    id SERIAL PRIMARY KEY,
    external_id UUID NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    roastery_id INTEGER NOT NULL REFERENCES roastery (id) ON UPDATE RESTRICT ON DELETE CASCADE,
    altitude VARCHAR(255),
    degree_of_roasting VARCHAR(6) CHECK (degree_of_roasting IN ('LIGHT', 'MEDIUM', 'DARK')),
    description TEXT,
    is_washed BOOLEAN,
    is_semi_washed BOOLEAN,
    is_natural BOOLEAN,
    contains_arabica BOOLEAN,
    contains_robusta BOOLEAN,
    arabica_fraction NUMERIC(3, 2),
    robusta_fraction NUMERIC(3, 2)
)"#;

pub const BEAN_ORIGIN: &str = r#"
CREATE TABLE IF NOT EXISTS bean_origin (
    bean_id INTEGER NOT NULL REFERENCES bean (id) ON UPDATE RESTRICT ON DELETE CASCADE,
    country_id INTEGER NOT NULL REFERENCES country (id) ON UPDATE RESTRICT ON DELETE RESTRICT,
    CONSTRAINT bean_origin_unique UNIQUE (bean_id, country_id)
)"#;

pub const BEAN_ROASTERY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS bean_roastery_id_idx ON bean (roastery_id)";

/// All statements, in the order they must be applied.
pub const STATEMENTS: &[&str] = &[COUNTRY, ADDRESS, ROASTERY, BEAN, BEAN_ORIGIN, BEAN_ROASTERY_INDEX];
