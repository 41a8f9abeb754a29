//! Field descriptors for each wizard step

use crate::state::{QuoteForm, ServiceType, Step, TextField, ValidationError};

/// An interactable field on a wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Text(TextField),
    /// Checkbox list of service types
    Services,
    HasDomain,
    Budget,
    Deadline,
    GdprConsent,
}

impl FieldId {
    pub fn label(self) -> &'static str {
        match self {
            FieldId::Text(field) => match field {
                TextField::Name => "Nome completo",
                TextField::Company => "Nome da empresa",
                TextField::Email => "Email",
                TextField::Phone => "Telefone / WhatsApp",
                TextField::ServiceTypeOther => "Especifique o serviço",
                TextField::Objective => "Objetivo principal",
                TextField::Features => "Funcionalidades essenciais",
                TextField::References => "Referências ou Inspirações",
            },
            FieldId::Services => "Tipo de serviço",
            FieldId::HasDomain => "Já possui domínio/servidor?",
            FieldId::Budget => "Faixa de orçamento",
            FieldId::Deadline => "Prazo ideal para entrega",
            FieldId::GdprConsent => "Consentimento",
        }
    }

    /// Short help shown in the status bar while the field is focused
    pub fn hint(self) -> Option<&'static str> {
        match self {
            FieldId::Text(TextField::Name) => Some("Como você gostaria de ser chamado?"),
            FieldId::Text(TextField::Company) => Some("Se aplicável para o seu projeto"),
            FieldId::Text(TextField::Email) => Some("Para onde podemos enviar sua proposta?"),
            FieldId::Text(TextField::Phone) => Some("Caso prefira contato direto"),
            FieldId::Text(TextField::Objective) => Some(
                "Ex: Quero um site para captar leads ou um app para melhorar o atendimento ao cliente.",
            ),
            FieldId::Text(TextField::Features) => Some(
                "Ex: login de usuários, integração com APIs, sistema de pagamentos, etc.",
            ),
            FieldId::Text(TextField::References) => {
                Some("Links de sites/apps que gosta ou quer algo parecido.")
            }
            _ => None,
        }
    }

    /// Text displayed while an optional or empty field is not focused
    pub fn placeholder(self) -> &'static str {
        match self {
            FieldId::Text(TextField::Name) => "Seu nome completo",
            FieldId::Text(TextField::Company) => "Nome da sua empresa (opcional)",
            FieldId::Text(TextField::Email) => "seu@email.com",
            FieldId::Text(TextField::Phone) => "(00) 00000-0000",
            FieldId::Text(TextField::ServiceTypeOther) => "Descreva o serviço que você precisa",
            FieldId::Text(TextField::Objective) => {
                "Descreva o objetivo principal do seu projeto"
            }
            FieldId::Text(TextField::Features) => {
                "Liste as principais funcionalidades que seu projeto deve ter"
            }
            FieldId::Text(TextField::References) => {
                "Compartilhe links ou exemplos de projetos que te inspiram (opcional)"
            }
            _ => "",
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, FieldId::Text(field) if field.is_multiline())
    }

    /// The error among `errors` that is displayed under this field
    pub fn error_in(self, errors: &[ValidationError]) -> Option<&ValidationError> {
        errors.iter().find(|error| match error {
            ValidationError::Required(field) => self == FieldId::Text(*field),
            ValidationError::InvalidEmail => self == FieldId::Text(TextField::Email),
            ValidationError::NoServiceSelected => self == FieldId::Services,
            ValidationError::ConsentRequired => self == FieldId::GdprConsent,
        })
    }
}

/// Fields shown on `step`, in focus order
///
/// The "other" elaboration only appears while `other` is selected.
pub fn step_fields(step: Step, form: &QuoteForm) -> Vec<FieldId> {
    match step {
        Step::Contact => vec![
            FieldId::Text(TextField::Name),
            FieldId::Text(TextField::Company),
            FieldId::Text(TextField::Email),
            FieldId::Text(TextField::Phone),
        ],
        Step::Services => {
            let mut fields = vec![FieldId::Services];
            if form.services.contains(ServiceType::Other) {
                fields.push(FieldId::Text(TextField::ServiceTypeOther));
            }
            fields
        }
        Step::Project => vec![
            FieldId::Text(TextField::Objective),
            FieldId::Text(TextField::Features),
            FieldId::Text(TextField::References),
            FieldId::HasDomain,
        ],
        Step::Commercial => vec![FieldId::Budget, FieldId::Deadline],
        Step::Confirmation => vec![FieldId::GdprConsent],
    }
}
