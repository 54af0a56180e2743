use uuid::Uuid;

use crate::ledger::{Ledger, Property};

use super::{ServiceError, ServiceResult};

pub struct PropertyService;

impl PropertyService {
    pub fn add(ledger: &mut Ledger, property: Property) -> ServiceResult<Uuid> {
        let name = property.name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("Property name is required".into()));
        }
        if ledger
            .properties
            .iter()
            .any(|existing| existing.name.eq_ignore_ascii_case(name))
        {
            return Err(ServiceError::Validation(format!(
                "Property `{name}` already exists"
            )));
        }
        Ok(ledger.add_property(property))
    }

    pub fn get(ledger: &Ledger, id: Uuid) -> ServiceResult<&Property> {
        ledger
            .property(id)
            .ok_or(ServiceError::PropertyNotFound(id))
    }

    pub fn list(ledger: &Ledger) -> Vec<&Property> {
        ledger.properties.iter().collect()
    }
}
