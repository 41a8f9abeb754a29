//! Quote request data model and per-step validation

use super::step::Step;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern is valid")
});

/// Kind of service the client is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Website,
    Ecommerce,
    Mobile,
    Automation,
    Saas,
    Other,
}

impl ServiceType {
    pub const ALL: [ServiceType; 6] = [
        ServiceType::Website,
        ServiceType::Ecommerce,
        ServiceType::Mobile,
        ServiceType::Automation,
        ServiceType::Saas,
        ServiceType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Website => "Site institucional",
            Self::Ecommerce => "Loja virtual (E-commerce)",
            Self::Mobile => "Aplicativo mobile",
            Self::Automation => "Automação de processos",
            Self::Saas => "SaaS (Software como Serviço)",
            Self::Other => "Outro",
        }
    }
}

/// Ordered set of selected services
///
/// Keeps the order in which services were picked; a tag appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ServiceType>", into = "Vec<ServiceType>")]
pub struct ServiceSelection(Vec<ServiceType>);

impl ServiceSelection {
    pub fn contains(&self, service: ServiceType) -> bool {
        self.0.contains(&service)
    }

    /// Flip membership of `service`; returns true if it is selected afterwards
    pub fn toggle(&mut self, service: ServiceType) -> bool {
        if let Some(pos) = self.0.iter().position(|s| *s == service) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(service);
            true
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ServiceType> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<ServiceType>> for ServiceSelection {
    fn from(services: Vec<ServiceType>) -> Self {
        let mut selection = Vec::with_capacity(services.len());
        for service in services {
            if !selection.contains(&service) {
                selection.push(service);
            }
        }
        Self(selection)
    }
}

impl From<ServiceSelection> for Vec<ServiceType> {
    fn from(selection: ServiceSelection) -> Self {
        selection.0
    }
}

impl FromIterator<ServiceType> for ServiceSelection {
    fn from_iter<I: IntoIterator<Item = ServiceType>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

/// Whether the client already owns a domain / hosting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HasDomain {
    Yes,
    #[default]
    No,
    Help,
}

impl HasDomain {
    pub fn next(self) -> Self {
        match self {
            Self::Yes => Self::No,
            Self::No => Self::Help,
            Self::Help => Self::Yes,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Yes => Self::Help,
            Self::No => Self::Yes,
            Self::Help => Self::No,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "Sim",
            Self::No => "Não",
            Self::Help => "Preciso de ajuda com isso",
        }
    }
}

/// Budget range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Budget {
    #[serde(rename = "under3k")]
    Under3k,
    #[default]
    #[serde(rename = "3k-10k")]
    From3kTo10k,
    #[serde(rename = "over10k")]
    Over10k,
    #[serde(rename = "suggestion")]
    Suggestion,
}

impl Budget {
    pub fn next(self) -> Self {
        match self {
            Self::Under3k => Self::From3kTo10k,
            Self::From3kTo10k => Self::Over10k,
            Self::Over10k => Self::Suggestion,
            Self::Suggestion => Self::Under3k,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Under3k => Self::Suggestion,
            Self::From3kTo10k => Self::Under3k,
            Self::Over10k => Self::From3kTo10k,
            Self::Suggestion => Self::Over10k,
        }
    }

    /// Option text shown in the wizard
    pub fn label(self) -> &'static str {
        match self {
            Self::Suggestion => "Preciso de uma sugestão",
            other => other.summary_text(),
        }
    }

    /// Text sent to the relay (third person, as read by the sales team)
    pub fn summary_text(self) -> &'static str {
        match self {
            Self::Under3k => "Até R$ 3.000",
            Self::From3kTo10k => "R$ 3.000 – R$ 10.000",
            Self::Over10k => "Acima de R$ 10.000",
            Self::Suggestion => "Precisa de uma sugestão",
        }
    }
}

/// Desired delivery timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Deadline {
    #[serde(rename = "urgent")]
    Urgent,
    #[default]
    #[serde(rename = "1-3months")]
    OneToThreeMonths,
    #[serde(rename = "flexible")]
    Flexible,
}

impl Deadline {
    pub fn next(self) -> Self {
        match self {
            Self::Urgent => Self::OneToThreeMonths,
            Self::OneToThreeMonths => Self::Flexible,
            Self::Flexible => Self::Urgent,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Urgent => Self::Flexible,
            Self::OneToThreeMonths => Self::Urgent,
            Self::Flexible => Self::OneToThreeMonths,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Flexible => "Sem pressa, quero algo bem elaborado",
            other => other.summary_text(),
        }
    }

    pub fn summary_text(self) -> &'static str {
        match self {
            Self::Urgent => "Urgente (Menos de 1 mês)",
            Self::OneToThreeMonths => "1 a 3 meses",
            Self::Flexible => "Sem pressa, quer algo bem elaborado",
        }
    }
}

/// Free-text fields of the quote form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    Company,
    Email,
    Phone,
    ServiceTypeOther,
    Objective,
    Features,
    References,
}

impl TextField {
    pub fn is_multiline(self) -> bool {
        matches!(self, Self::Objective | Self::Features | Self::References)
    }

    fn required_message(self) -> &'static str {
        match self {
            Self::Name => "Nome é obrigatório",
            Self::Email => "Email é obrigatório",
            Self::Phone => "Telefone é obrigatório",
            Self::ServiceTypeOther => "Por favor especifique o serviço",
            Self::Objective => "O objetivo do projeto é obrigatório",
            Self::Features => "As funcionalidades do projeto são obrigatórias",
            Self::Company | Self::References => "Campo obrigatório",
        }
    }
}

/// A required field is empty or malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", .0.required_message())]
    Required(TextField),
    #[error("Email inválido")]
    InvalidEmail,
    #[error("Escolha pelo menos um serviço")]
    NoServiceSelected,
    #[error("É preciso autorizar o contato para enviar a solicitação")]
    ConsentRequired,
}


/// All answers collected by the wizard
///
/// Field names serialize in camelCase; these are the snapshot keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteForm {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "serviceType")]
    pub services: ServiceSelection,
    pub service_type_other: String,
    pub objective: String,
    pub features: String,
    pub references: String,
    pub has_domain: HasDomain,
    pub budget: Budget,
    pub deadline: Deadline,
    pub gdpr_consent: bool,
}

impl QuoteForm {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::Company => &self.company,
            TextField::Email => &self.email,
            TextField::Phone => &self.phone,
            TextField::ServiceTypeOther => &self.service_type_other,
            TextField::Objective => &self.objective,
            TextField::Features => &self.features,
            TextField::References => &self.references,
        }
    }

    pub fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Name => &mut self.name,
            TextField::Company => &mut self.company,
            TextField::Email => &mut self.email,
            TextField::Phone => &mut self.phone,
            TextField::ServiceTypeOther => &mut self.service_type_other,
            TextField::Objective => &mut self.objective,
            TextField::Features => &mut self.features,
            TextField::References => &mut self.references,
        }
    }

    /// Elaboration text, only while `other` is selected and it is filled in
    pub fn other_service(&self) -> Option<&str> {
        let text = self.service_type_other.trim();
        (self.services.contains(ServiceType::Other) && !text.is_empty()).then_some(text)
    }

    pub fn has_valid_email(&self) -> bool {
        EMAIL_PATTERN.is_match(self.email.trim())
    }

    /// Errors blocking `step`, in field order; empty when the step is valid
    pub fn validate_step(&self, step: Step) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        match step {
            Step::Contact => {
                self.require(TextField::Name, &mut errors);
                if self.is_blank(TextField::Email) {
                    errors.push(ValidationError::Required(TextField::Email));
                } else if !self.has_valid_email() {
                    errors.push(ValidationError::InvalidEmail);
                }
                self.require(TextField::Phone, &mut errors);
            }
            Step::Services => {
                if self.services.is_empty() {
                    errors.push(ValidationError::NoServiceSelected);
                } else if self.services.contains(ServiceType::Other) {
                    self.require(TextField::ServiceTypeOther, &mut errors);
                }
            }
            Step::Project => {
                self.require(TextField::Objective, &mut errors);
                self.require(TextField::Features, &mut errors);
            }
            // Budget and deadline are enums with defaults, so always set.
            Step::Commercial => {}
            Step::Confirmation => {
                if !self.gdpr_consent {
                    errors.push(ValidationError::ConsentRequired);
                }
            }
        }
        errors
    }

    fn is_blank(&self, field: TextField) -> bool {
        self.text(field).trim().is_empty()
    }

    fn require(&self, field: TextField, errors: &mut Vec<ValidationError>) {
        if self.is_blank(field) {
            errors.push(ValidationError::Required(field));
        }
    }
}
