//! Modelo de GasStation

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GasStation {
    pub id: Uuid,
    pub name: String,
    pub number: String,
    pub address: String,
    pub company: String,
}

impl GasStation {
    /// "Компания Название №Номер", sin número si no lo hay
    pub fn display_name(&self) -> String {
        let base = format!("{} {}", self.company, self.name);
        let base = base.trim();
        if self.number.is_empty() {
            base.to_string()
        } else {
            format!("{} №{}", base, self.number)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(number: &str) -> GasStation {
        GasStation {
            id: Uuid::new_v4(),
            name: "Северная".to_string(),
            number: number.to_string(),
            address: String::new(),
            company: "Лукойл".to_string(),
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(station("12").display_name(), "Лукойл Северная №12");
        assert_eq!(station("").display_name(), "Лукойл Северная");
    }
}
