//! Flattened, human-readable rendering of a quote request

use crate::state::{QuoteForm, ServiceType};
use chrono::{DateTime, Local};

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Ordered form fields posted to the relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    fields: Vec<(&'static str, String)>,
}

impl SubmissionPayload {
    /// Build the multipart field list; enumerations are expanded to display text
    pub fn build(form: &QuoteForm, cc: Option<&str>, requested_at: &DateTime<Local>) -> Self {
        let mut fields = vec![
            ("name", form.name.trim().to_string()),
            ("email", form.email.trim().to_string()),
            ("_subject", subject(form)),
            ("company", form.company.trim().to_string()),
            ("phone", form.phone.trim().to_string()),
            ("serviceType", services_text(form)),
        ];
        if let Some(other) = form.other_service() {
            fields.push(("serviceTypeOther", other.to_string()));
        }
        fields.extend([
            ("objective", form.objective.trim().to_string()),
            ("features", form.features.trim().to_string()),
            ("references", form.references.trim().to_string()),
            ("hasDomain", form.has_domain.label().to_string()),
            ("budget", form.budget.summary_text().to_string()),
            ("deadline", form.deadline.summary_text().to_string()),
            ("gdprConsent", form.gdpr_consent.to_string()),
            ("message", summary_html(form, requested_at)),
        ]);
        if let Some(cc) = cc.filter(|cc| !cc.trim().is_empty()) {
            fields.push(("_cc", cc.trim().to_string()));
        }
        fields.push(("_template", "table".to_string()));
        fields.push(("_captcha", "false".to_string()));
        Self { fields }
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Mail subject line for the request
pub fn subject(form: &QuoteForm) -> String {
    format!("Nova solicitação de orçamento - {}", form.name.trim())
}

/// Selected services as display labels, in selection order
///
/// `other` is replaced by the client's elaboration when there is one.
pub fn services_text(form: &QuoteForm) -> String {
    form.services
        .iter()
        .map(|service| match service {
            ServiceType::Other => form.other_service().unwrap_or(service.label()),
            _ => service.label(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// HTML body used by the relay's e-mail template
pub fn summary_html(form: &QuoteForm, requested_at: &DateTime<Local>) -> String {
    let or_default = |value: &str, default: &str| {
        let value = value.trim();
        if value.is_empty() {
            default.to_string()
        } else {
            escape_html(value)
        }
    };

    let rows = [
        ("Nome", escape_html(form.name.trim())),
        ("Empresa", or_default(&form.company, "N/A")),
        ("Email", escape_html(form.email.trim())),
        ("Telefone", escape_html(form.phone.trim())),
        ("Tipo de serviço", escape_html(&services_text(form))),
        ("Objetivo do projeto", escape_html(form.objective.trim())),
        ("Funcionalidades essenciais", escape_html(form.features.trim())),
        ("Referências", or_default(&form.references, "Nenhuma")),
        ("Já possui domínio", form.has_domain.label().to_string()),
        ("Orçamento", form.budget.summary_text().to_string()),
        ("Prazo", form.deadline.summary_text().to_string()),
        (
            "Data da solicitação",
            requested_at.format(TIMESTAMP_FORMAT).to_string(),
        ),
    ];

    let mut html = String::from("<h2>Nova solicitação de orçamento</h2>\n");
    for (label, value) in rows {
        html.push_str(&format!("<p><strong>{label}:</strong> {value}</p>\n"));
    }
    html
}

/// Plain-text body for the mail client fallback
pub fn summary_text(form: &QuoteForm) -> String {
    let rows = [
        ("Nome", form.name.trim().to_string()),
        ("Email", form.email.trim().to_string()),
        ("Telefone", form.phone.trim().to_string()),
        ("Tipo de serviço", services_text(form)),
        ("Objetivo", form.objective.trim().to_string()),
        ("Funcionalidades", form.features.trim().to_string()),
        ("Orçamento", form.budget.summary_text().to_string()),
        ("Prazo", form.deadline.summary_text().to_string()),
    ];
    rows.iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
