//! Fixtures and in-memory service implementations shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use beanpedia::{
    Address, AppError, Bean, BeanComposition, BeanProcessing, BeanService, DegreeOfRoasting, NewBean,
    NewRoastery, Roastery, RoasteryService,
};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub fn address_in(country: &str) -> Address {
    Address {
        address1: "Main St 1".into(),
        address2: Some("Unit 4".into()),
        address3: None,
        city: "Oslo".into(),
        postal_code: "0150".into(),
        country: country.into(),
    }
}

pub fn new_roastery(name: &str, country: Option<&str>) -> NewRoastery {
    NewRoastery {
        name: name.into(),
        description: Some(format!("{} roasts light Nordic coffee", name)),
        address: country.map(address_in),
        phone_number: Some("+47 22 00 00 00".into()),
        website: Some("example.com".into()),
        facebook: None,
        instagram: Some("@roastery".into()),
        twitter: None,
    }
}

pub fn origins(codes: &[&str]) -> Option<BTreeSet<String>> {
    Some(codes.iter().map(|c| c.to_string()).collect())
}

pub fn new_bean(name: &str, roastery_id: Uuid, codes: &[&str]) -> NewBean {
    NewBean {
        name: name.into(),
        roastery_id,
        altitude: Some("1800 m".into()),
        processing: Some(BeanProcessing {
            is_washed: true,
            is_semi_washed: false,
            is_natural: false,
        }),
        composition: Some(BeanComposition {
            contains_arabica: true,
            contains_robusta: false,
            arabica_fraction: Some(1.0),
            robusta_fraction: None,
        }),
        origins: if codes.is_empty() { None } else { origins(codes) },
        degree_of_roasting: Some(DegreeOfRoasting::Light),
        description: Some("Stone fruit and jasmine".into()),
    }
}

/// Roasteries kept in insertion order.
#[derive(Default)]
pub struct InMemoryRoasteryService {
    roasteries: Mutex<Vec<Roastery>>,
}

impl InMemoryRoasteryService {
    pub fn contains(&self, id: Uuid) -> bool {
        self.roasteries.lock().unwrap().iter().any(|r| r.id == id)
    }
}

#[async_trait]
impl RoasteryService for InMemoryRoasteryService {
    async fn list(&self) -> Result<Vec<Roastery>, AppError> {
        Ok(self.roasteries.lock().unwrap().clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Roastery>, AppError> {
        Ok(self.roasteries.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, input: &NewRoastery) -> Result<Roastery, AppError> {
        let roastery = input.clone().into_roastery(Uuid::new_v4());
        self.roasteries.lock().unwrap().push(roastery.clone());
        Ok(roastery)
    }

    async fn update(&self, input: &NewRoastery, id: Uuid) -> Result<Roastery, AppError> {
        let mut roasteries = self.roasteries.lock().unwrap();
        let slot = roasteries
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::not_found("roastery", id))?;
        *slot = input.clone().into_roastery(id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut roasteries = self.roasteries.lock().unwrap();
        let before = roasteries.len();
        roasteries.retain(|r| r.id != id);
        if roasteries.len() == before {
            return Err(AppError::not_found("roastery", id));
        }
        Ok(())
    }
}

pub struct InMemoryBeanService {
    roasteries: Arc<InMemoryRoasteryService>,
    beans: Mutex<Vec<Bean>>,
}

impl InMemoryBeanService {
    pub fn new(roasteries: Arc<InMemoryRoasteryService>) -> Self {
        InMemoryBeanService {
            roasteries,
            beans: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BeanService for InMemoryBeanService {
    async fn list(&self) -> Result<Vec<Bean>, AppError> {
        Ok(self.beans.lock().unwrap().clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Bean>, AppError> {
        Ok(self.beans.lock().unwrap().iter().find(|b| b.id == id).cloned())
    }

    async fn create(&self, input: &NewBean) -> Result<Bean, AppError> {
        if !self.roasteries.contains(input.roastery_id) {
            return Err(AppError::unresolved("roastery", input.roastery_id));
        }
        let bean = input.clone().into_bean(Uuid::new_v4());
        self.beans.lock().unwrap().push(bean.clone());
        Ok(bean)
    }

    async fn create_for_roastery(&self, roastery_id: Uuid, input: &NewBean) -> Result<Bean, AppError> {
        if !self.roasteries.contains(roastery_id) {
            return Err(AppError::not_found("roastery", roastery_id));
        }
        let mut input = input.clone();
        input.roastery_id = roastery_id;
        let bean = input.into_bean(Uuid::new_v4());
        self.beans.lock().unwrap().push(bean.clone());
        Ok(bean)
    }

    async fn update(&self, input: &NewBean, id: Uuid) -> Result<Bean, AppError> {
        if !self.roasteries.contains(input.roastery_id) {
            return Err(AppError::unresolved("roastery", input.roastery_id));
        }
        let mut beans = self.beans.lock().unwrap();
        let slot = beans
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::not_found("bean", id))?;
        *slot = input.clone().into_bean(id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut beans = self.beans.lock().unwrap();
        let before = beans.len();
        beans.retain(|b| b.id != id);
        if beans.len() == before {
            return Err(AppError::not_found("bean", id));
        }
        Ok(())
    }

    async fn list_for_roastery(&self, roastery_id: Uuid) -> Result<Vec<Bean>, AppError> {
        if !self.roasteries.contains(roastery_id) {
            return Err(AppError::not_found("roastery", roastery_id));
        }
        Ok(self
            .beans
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.roastery_id == roastery_id)
            .cloned()
            .collect())
    }
}
