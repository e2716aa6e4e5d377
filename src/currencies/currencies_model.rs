use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::currencies_constants::SEED_CURRENCIES;

/// Public shape of a currency reference record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub country_code: String,
    pub country_name: String,
}

/// Storage row backing a [`Currency`].
#[derive(Queryable, Insertable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::currencies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CurrencyEntity {
    pub country_code: String,
    pub country_name: String,
}

impl CurrencyEntity {
    /// The fixed seed set, in its reference order.
    pub fn seed_set() -> Vec<CurrencyEntity> {
        SEED_CURRENCIES
            .iter()
            .map(|(code, name)| CurrencyEntity {
                country_code: (*code).to_string(),
                country_name: (*name).to_string(),
            })
            .collect()
    }
}

impl From<CurrencyEntity> for Currency {
    fn from(entity: CurrencyEntity) -> Self {
        Currency {
            country_code: entity.country_code,
            country_name: entity.country_name,
        }
    }
}
