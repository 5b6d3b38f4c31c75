use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{CrudEntity, Reactivatable, RecordId, Resource, ValidationContext};
use crate::shared::address::Address;
use crate::shared::documents::{only_digits, validate_cnpj, validate_cpf};
use crate::shared::masks::{mask_cep, mask_cnpj, mask_cpf, mask_phone, mask_rg, mask_state_registration};
use crate::shared::validation::{
    has_full_name, is_blank, is_name_taken, optional_text, past_date, require, FieldErrors,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonType {
    /// Pessoa física (CPF)
    #[default]
    #[serde(rename = "FISICA")]
    Individual,
    /// Pessoa jurídica (CNPJ)
    #[serde(rename = "JURIDICA")]
    Company,
}

impl PersonType {
    pub fn label(&self) -> &'static str {
        match self {
            PersonType::Individual => "Pessoa física",
            PersonType::Company => "Pessoa jurídica",
        }
    }

    pub fn document_label(&self) -> &'static str {
        match self {
            PersonType::Individual => "CPF",
            PersonType::Company => "CNPJ",
        }
    }

    pub fn reference_date_label(&self) -> &'static str {
        match self {
            PersonType::Individual => "Data de nascimento",
            PersonType::Company => "Data de fundação",
        }
    }

    pub fn mask_document(&self, value: &str) -> String {
        match self {
            PersonType::Individual => mask_cpf(value),
            PersonType::Company => mask_cnpj(value),
        }
    }

    pub fn is_valid_document(&self, value: &str) -> bool {
        match self {
            PersonType::Individual => validate_cpf(value),
            PersonType::Company => validate_cnpj(value),
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            PersonType::Individual => "FISICA",
            PersonType::Company => "JURIDICA",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "JURIDICA" => PersonType::Company,
            _ => PersonType::Individual,
        }
    }
}

/// Cliente
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: RecordId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipoPessoa")]
    pub person_type: PersonType,
    /// CPF or CNPJ, digits only
    #[serde(rename = "documento")]
    pub document: String,
    #[serde(default)]
    pub rg: Option<String>,
    #[serde(rename = "inscricaoEstadual", default)]
    pub state_registration: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub address: Address,
    #[serde(rename = "dataNascimento", default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "dataFundacao", default)]
    pub founding_date: Option<NaiveDate>,
    #[serde(rename = "ativo")]
    pub active: bool,
    #[serde(rename = "possuiAtendimentosAtivos", default)]
    pub has_active_appointments: bool,
}

impl Client {
    /// Birth date for individuals, founding date for companies
    pub fn reference_date(&self) -> Option<NaiveDate> {
        match self.person_type {
            PersonType::Individual => self.birth_date,
            PersonType::Company => self.founding_date,
        }
    }

    pub fn formatted_document(&self) -> String {
        self.person_type.mask_document(&self.document)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientForm {
    pub person_type: PersonType,
    pub name: String,
    /// Masked as typed
    pub document: String,
    pub rg: String,
    pub state_registration: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    /// `YYYY-MM-DD`
    pub reference_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientPayload {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipoPessoa")]
    pub person_type: PersonType,
    #[serde(rename = "documento")]
    pub document: String,
    pub rg: Option<String>,
    #[serde(rename = "inscricaoEstadual")]
    pub state_registration: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub address: Address,
    #[serde(rename = "dataNascimento")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "dataFundacao")]
    pub founding_date: Option<NaiveDate>,
}

/// Loose e-mail shape check; the backend has the final word.
pub fn is_plausible_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((user, domain)) => {
            !user.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Shared contact / address checks for clients and employees.
pub(crate) fn validate_contact(errors: &mut FieldErrors, email: &str, phone: &str, address: &Address) {
    if !is_blank(email) && !is_plausible_email(email) {
        errors.add("email", "E-mail inválido");
    }
    let phone_digits = only_digits(phone);
    if !phone_digits.is_empty() && !(10..=11).contains(&phone_digits.len()) {
        errors.add("telefone", "Telefone deve ter 10 ou 11 dígitos");
    }
    let cep_digits = only_digits(&address.cep);
    if !cep_digits.is_empty() && cep_digits.len() != 8 {
        errors.add("cep", "CEP deve ter 8 dígitos");
    }
}

/// Address as sent to the backend (digits-only postal code, trimmed fields).
pub(crate) fn normalized_address(address: &Address) -> Address {
    Address {
        cep: only_digits(&address.cep),
        street: address.street.trim().to_string(),
        number: address.number.trim().to_string(),
        complement: address.complement.as_deref().and_then(optional_text),
        neighborhood: address.neighborhood.trim().to_string(),
        city: address.city.trim().to_string(),
        state: address.state.trim().to_uppercase(),
    }
}

pub(crate) fn masked_address(address: &Address) -> Address {
    Address {
        cep: mask_cep(&address.cep),
        ..address.clone()
    }
}

impl Resource for Client {
    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "clientes"
    }

    fn element_name() -> &'static str {
        "Cliente"
    }

    fn list_name() -> &'static str {
        "Clientes"
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl CrudEntity for Client {
    type Form = ClientForm;
    type Payload = ClientPayload;

    fn to_form(&self) -> ClientForm {
        ClientForm {
            person_type: self.person_type,
            name: self.name.clone(),
            document: self.formatted_document(),
            rg: self.rg.as_deref().map(mask_rg).unwrap_or_default(),
            state_registration: self
                .state_registration
                .as_deref()
                .map(mask_state_registration)
                .unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            phone: self.phone.as_deref().map(mask_phone).unwrap_or_default(),
            address: masked_address(&self.address),
            reference_date: self
                .reference_date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    fn validate(
        form: &ClientForm,
        ctx: &ValidationContext<'_, Self>,
    ) -> Result<ClientPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let kind = form.person_type;

        require(&mut errors, "nome", &form.name, "Nome é obrigatório");
        if !is_blank(&form.name) && !has_full_name(&form.name) {
            errors.add("nome", "Informe o nome completo");
        }
        if is_name_taken(&form.name, ctx.sibling_names()) {
            errors.add("nome", "Já existe um cliente com este nome");
        }

        let document = only_digits(&form.document);
        if document.is_empty() {
            errors.add("documento", format!("{} é obrigatório", kind.document_label()));
        } else if !kind.is_valid_document(&document) {
            errors.add("documento", format!("{} inválido", kind.document_label()));
        } else if ctx
            .existing
            .iter()
            .any(|c| Some(c.id) != ctx.editing_id && only_digits(&c.document) == document)
        {
            errors.add(
                "documento",
                format!("Já existe um cliente com este {}", kind.document_label()),
            );
        }

        let reference_date = past_date(
            &mut errors,
            "dataReferencia",
            &form.reference_date,
            ctx.today,
            kind.reference_date_label(),
        );

        validate_contact(&mut errors, &form.email, &form.phone, &form.address);

        errors.into_result(|| {
            let (rg, state_registration) = match kind {
                PersonType::Individual => (optional_text(&only_digits(&form.rg)), None),
                PersonType::Company => (
                    None,
                    optional_text(&only_digits(&form.state_registration)),
                ),
            };
            let (birth_date, founding_date) = match kind {
                PersonType::Individual => (reference_date, None),
                PersonType::Company => (None, reference_date),
            };
            ClientPayload {
                name: form.name.trim().to_string(),
                person_type: kind,
                document,
                rg,
                state_registration,
                email: optional_text(&form.email),
                phone: optional_text(&only_digits(&form.phone)),
                address: normalized_address(&form.address),
                birth_date,
                founding_date,
            }
        })
    }

    fn deactivation_blocker(&self) -> Option<&'static str> {
        self.has_active_appointments
            .then_some("Este cliente possui atendimentos ativos e não pode ser inativado.")
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name,
            self.document,
            self.formatted_document(),
            self.address.city
        )
    }
}

impl Reactivatable for Client {}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn individual_form() -> ClientForm {
        ClientForm {
            person_type: PersonType::Individual,
            name: "Maria da Silva".into(),
            document: "529.982.247-25".into(),
            rg: "12.345.678-9".into(),
            state_registration: "110.042.490.114".into(),
            email: "maria@exemplo.com.br".into(),
            phone: "(11) 99999-8888".into(),
            address: Address {
                cep: "01310-100".into(),
                street: "Avenida Paulista".into(),
                number: "1000".into(),
                complement: Some("  ".into()),
                neighborhood: "Bela Vista".into(),
                city: "São Paulo".into(),
                state: "sp".into(),
            },
            reference_date: "1990-04-20".into(),
        }
    }

    #[test]
    fn test_valid_individual_payload() {
        let payload =
            Client::validate(&individual_form(), &ValidationContext::new(None, &[], today())).unwrap();
        assert_eq!(payload.document, "52998224725");
        assert_eq!(payload.rg.as_deref(), Some("123456789"));
        assert_eq!(payload.state_registration, None);
        assert_eq!(payload.phone.as_deref(), Some("11999998888"));
        assert_eq!(payload.address.cep, "01310100");
        assert_eq!(payload.address.state, "SP");
        assert_eq!(payload.address.complement, None);
        assert_eq!(payload.birth_date, NaiveDate::from_ymd_opt(1990, 4, 20));
        assert_eq!(payload.founding_date, None);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["tipoPessoa"], "FISICA");
        assert_eq!(json["logradouro"], "Avenida Paulista");
        assert_eq!(json["dataNascimento"], "1990-04-20");
    }

    #[test]
    fn test_company_requires_valid_cnpj() {
        let mut form = individual_form();
        form.person_type = PersonType::Company;
        form.name = "Padaria Central".into();
        let errors = Client::validate(&form, &ValidationContext::new(None, &[], today())).unwrap_err();
        assert_eq!(errors.get("documento"), Some("CNPJ inválido"));

        form.document = "11.222.333/0001-81".into();
        let payload = Client::validate(&form, &ValidationContext::new(None, &[], today())).unwrap();
        assert_eq!(payload.rg, None);
        assert_eq!(payload.state_registration.as_deref(), Some("110042490114"));
        assert_eq!(payload.founding_date, NaiveDate::from_ymd_opt(1990, 4, 20));
    }

    #[test]
    fn test_name_and_date_rules() {
        let mut form = individual_form();
        form.name = "Maria".into();
        form.reference_date = "2024-06-11".into();
        let errors = Client::validate(&form, &ValidationContext::new(None, &[], today())).unwrap_err();
        assert_eq!(errors.get("nome"), Some("Informe o nome completo"));
        assert_eq!(
            errors.get("dataReferencia"),
            Some("Data de nascimento não pode ser futura")
        );
    }

    #[test]
    fn test_duplicate_document_excluding_self() {
        let existing: Client = serde_json::from_value(serde_json::json!({
            "id": 5, "nome": "Maria da Silva", "tipoPessoa": "FISICA",
            "documento": "52998224725", "ativo": false, "cep": "01310100"
        }))
        .unwrap();
        let existing = vec![existing];
        let errors = Client::validate(&individual_form(), &ValidationContext::new(None, &existing, today()))
            .unwrap_err();
        assert!(errors.contains("documento"));
        assert!(Client::validate(&individual_form(), &ValidationContext::new(Some(5), &existing, today())).is_ok());
    }

    #[test]
    fn test_duplicate_name_is_case_insensitive() {
        let existing: Client = serde_json::from_value(serde_json::json!({
            "id": 8, "nome": "MARIA DA SILVA", "tipoPessoa": "JURIDICA",
            "documento": "11222333000181", "ativo": true, "cep": "01310100"
        }))
        .unwrap();
        let existing = vec![existing];
        let errors = Client::validate(&individual_form(), &ValidationContext::new(None, &existing, today()))
            .unwrap_err();
        assert_eq!(errors.get("nome"), Some("Já existe um cliente com este nome"));
        assert!(!errors.contains("documento"));
        assert!(Client::validate(&individual_form(), &ValidationContext::new(Some(8), &existing, today())).is_ok());
    }

    #[test]
    fn test_to_form_masks_values() {
        let client: Client = serde_json::from_value(serde_json::json!({
            "id": 1, "nome": "Padaria Central", "tipoPessoa": "JURIDICA",
            "documento": "11222333000181", "telefone": "1133334444",
            "dataFundacao": "2001-02-03", "ativo": true, "cep": "01310100"
        }))
        .unwrap();
        let form = client.to_form();
        assert_eq!(form.document, "11.222.333/0001-81");
        assert_eq!(form.phone, "(11) 3333-4444");
        assert_eq!(form.address.cep, "01310-100");
        assert_eq!(form.reference_date, "2001-02-03");
    }

    #[test]
    fn test_email_shape() {
        assert!(is_plausible_email("a@b.com"));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email("@b.com"));
        assert!(!is_plausible_email("ab.com"));
    }
}
