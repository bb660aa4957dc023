//! Request validation against column limits, applied by handlers before a service call.
//! Postgres text columns cannot hold NUL, so every string is checked for it here.

use crate::error::AppError;
use crate::model::{Address, BeanComposition, NewBean, NewRoastery};

/// Length of every VARCHAR column.
pub const MAX_VARCHAR: usize = 255;

pub struct RequestValidator;

impl RequestValidator {
    pub fn roastery(input: &NewRoastery) -> Result<(), AppError> {
        validate_name(&input.name)?;
        validate_optional_text("description", input.description.as_deref())?;
        for (field, value) in [
            ("phoneNumber", &input.phone_number),
            ("website", &input.website),
            ("facebook", &input.facebook),
            ("instagram", &input.instagram),
            ("twitter", &input.twitter),
        ] {
            validate_optional_length(field, value.as_deref())?;
        }
        if let Some(address) = &input.address {
            validate_address(address)?;
        }
        Ok(())
    }

    pub fn bean(input: &NewBean) -> Result<(), AppError> {
        validate_name(&input.name)?;
        validate_optional_length("altitude", input.altitude.as_deref())?;
        validate_optional_text("description", input.description.as_deref())?;
        for code in input.origin_codes() {
            validate_text("origins", code)?;
        }
        if let Some(composition) = &input.composition {
            validate_composition(composition)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::MalformedInput("name is required".into()));
    }
    validate_length("name", name)
}

/// Any text bound for the database.
fn validate_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.contains('\0') {
        return Err(AppError::MalformedInput(format!("{} must not contain NUL characters", field)));
    }
    Ok(())
}

fn validate_optional_text(field: &str, value: Option<&str>) -> Result<(), AppError> {
    match value {
        Some(v) => validate_text(field, v),
        None => Ok(()),
    }
}

fn validate_length(field: &str, value: &str) -> Result<(), AppError> {
    validate_text(field, value)?;
    if value.chars().count() > MAX_VARCHAR {
        return Err(AppError::MalformedInput(format!(
            "{} must be at most {} characters",
            field, MAX_VARCHAR
        )));
    }
    Ok(())
}

fn validate_optional_length(field: &str, value: Option<&str>) -> Result<(), AppError> {
    match value {
        Some(v) => validate_length(field, v),
        None => Ok(()),
    }
}

fn validate_address(address: &Address) -> Result<(), AppError> {
    validate_length("address.address1", &address.address1)?;
    validate_optional_length("address.address2", address.address2.as_deref())?;
    validate_optional_length("address.address3", address.address3.as_deref())?;
    validate_length("address.city", &address.city)?;
    validate_length("address.postalCode", &address.postal_code)?;
    validate_text("address.country", &address.country)
}

fn validate_composition(composition: &BeanComposition) -> Result<(), AppError> {
    for (field, value) in [
        ("composition.arabicaFraction", composition.arabica_fraction),
        ("composition.robustaFraction", composition.robusta_fraction),
    ] {
        if let Some(f) = value {
            if !(0.0..=1.0).contains(&f) {
                return Err(AppError::MalformedInput(format!("{} must be between 0 and 1", field)));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn blank_name_is_rejected() {
        let err = RequestValidator::roastery(&NewRoastery::named("   ")).unwrap_err();
        assert_eq!(err.to_string(), "malformed input: name is required");
    }

    #[test]
    fn overlong_optional_field_is_rejected() {
        let mut input = NewRoastery::named("Roastery");
        input.website = Some("w".repeat(MAX_VARCHAR + 1));
        assert!(RequestValidator::roastery(&input).is_err());
        input.website = Some("w".repeat(MAX_VARCHAR));
        assert!(RequestValidator::roastery(&input).is_ok());
    }

    #[test]
    fn address_lines_are_bounded() {
        let mut input = NewRoastery::named("Roastery");
        input.address = Some(Address {
            address1: "Main St 1".into(),
            address2: None,
            address3: Some("x".repeat(300)),
            city: "Oslo".into(),
            postal_code: "0150".into(),
            country: "NO".into(),
        });
        let err = RequestValidator::roastery(&input).unwrap_err();
        assert!(err.to_string().contains("address.address3"));
    }

    #[test]
    fn nul_characters_are_rejected_in_every_text() {
        let mut input = NewRoastery::named("Road\0ster");
        let err = RequestValidator::roastery(&input).unwrap_err();
        assert_eq!(err.to_string(), "malformed input: name must not contain NUL characters");

        input.name = "Roaster".into();
        input.description = Some("light\0roast".into());
        assert!(RequestValidator::roastery(&input).is_err());

        input.description = None;
        input.address = Some(Address {
            address1: "Main St 1".into(),
            address2: None,
            address3: None,
            city: "Oslo".into(),
            postal_code: "0150".into(),
            country: "N\0".into(),
        });
        let err = RequestValidator::roastery(&input).unwrap_err();
        assert!(err.to_string().contains("address.country"));

        let mut bean = NewBean::new("Hambela", Uuid::new_v4());
        bean.origins = Some(["E\0".to_string()].into_iter().collect());
        let err = RequestValidator::bean(&bean).unwrap_err();
        assert!(err.to_string().contains("origins"));

        bean.origins = None;
        bean.altitude = Some("1800\0m".into());
        assert!(RequestValidator::bean(&bean).is_err());
    }

    #[test]
    fn fractions_must_be_within_unit_interval() {
        let mut input = NewBean::new("Blend", Uuid::new_v4());
        input.composition = Some(BeanComposition {
            contains_arabica: true,
            contains_robusta: true,
            arabica_fraction: Some(0.7),
            robusta_fraction: Some(1.3),
        });
        let err = RequestValidator::bean(&input).unwrap_err();
        assert!(err.to_string().contains("robustaFraction"));

        input.composition = Some(BeanComposition {
            contains_arabica: true,
            contains_robusta: true,
            arabica_fraction: Some(0.7),
            robusta_fraction: Some(0.3),
        });
        assert!(RequestValidator::bean(&input).is_ok());
    }
}
