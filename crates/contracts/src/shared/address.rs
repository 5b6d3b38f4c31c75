use serde::{Deserialize, Serialize};

use super::documents::only_digits;

/// Address block shared by clients and employees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub cep: String,
    #[serde(rename = "logradouro", default)]
    pub street: String,
    #[serde(rename = "numero", default)]
    pub number: String,
    #[serde(rename = "complemento", default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    #[serde(rename = "bairro", default)]
    pub neighborhood: String,
    #[serde(rename = "cidade", default)]
    pub city: String,
    #[serde(rename = "estado", default)]
    pub state: String,
}

/// Postal-code lookup response (ViaCEP layout).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CepLookupResponse {
    #[serde(default)]
    pub cep: String,
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub localidade: String,
    #[serde(default)]
    pub uf: String,
    /// Present (`true`, or `"true"` on newer versions) when the code does not exist
    #[serde(default)]
    pub erro: Option<serde_json::Value>,
}

impl CepLookupResponse {
    pub fn is_not_found(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::String(s)) => s == "true",
            _ => false,
        }
    }

    /// Fills the looked-up fields, leaving number and complement untouched.
    pub fn apply_to(&self, address: &mut Address) {
        address.street = self.logradouro.clone();
        address.neighborhood = self.bairro.clone();
        address.city = self.localidade.clone();
        address.state = self.uf.clone();
    }
}

/// Lookups are only issued once the postal code is complete.
pub fn is_complete_cep(value: &str) -> bool {
    only_digits(value).len() == 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_lookup_fills_address() {
        let body = r#"{"cep":"01310-100","logradouro":"Avenida Paulista","bairro":"Bela Vista","localidade":"São Paulo","uf":"SP"}"#;
        let resp: CepLookupResponse = serde_json::from_str(body).unwrap();
        assert!(!resp.is_not_found());

        let mut address = Address {
            number: "1000".into(),
            ..Default::default()
        };
        resp.apply_to(&mut address);
        assert_eq!(address.street, "Avenida Paulista");
        assert_eq!(address.city, "São Paulo");
        assert_eq!(address.state, "SP");
        assert_eq!(address.number, "1000");
    }

    #[test]
    fn test_not_found_lookup() {
        let resp: CepLookupResponse = serde_json::from_str(r#"{"erro":true}"#).unwrap();
        assert!(resp.is_not_found());
        let resp: CepLookupResponse = serde_json::from_str(r#"{"erro":"true"}"#).unwrap();
        assert!(resp.is_not_found());
    }

    #[test]
    fn test_complete_cep() {
        assert!(is_complete_cep("01310-100"));
        assert!(!is_complete_cep("01310-10"));
    }
}
