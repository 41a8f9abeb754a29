//! `mailto:` fallback channel

use super::MailLauncher;

/// Build a percent-encoded `mailto:` link
pub fn mailto_link(recipient: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}

/// Hands links to the desktop's default handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMailLauncher;

impl MailLauncher for SystemMailLauncher {
    fn open(&self, link: &str) -> std::io::Result<()> {
        open::that(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mailto_link_encodes_subject_and_body() {
        let link = mailto_link(
            "orcamentos@example.com",
            "Nova solicitação - Ana & Cia",
            "Nome: Ana\nPrazo: 1 a 3 meses",
        );
        assert_eq!(
            link,
            "mailto:orcamentos@example.com?subject=Nova%20solicita%C3%A7%C3%A3o%20-%20Ana%20%26%20Cia\
             &body=Nome%3A%20Ana%0APrazo%3A%201%20a%203%20meses"
        );
    }

    #[test]
    fn test_mailto_link_with_empty_body() {
        assert_eq!(
            mailto_link("a@b.co", "Oi", ""),
            "mailto:a@b.co?subject=Oi&body="
        );
    }
}
