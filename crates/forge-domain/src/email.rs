// email.rs
use forge_core::{Field, KitError, Product, Prototype, StepBuilder};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Asunto usado cuando no se define uno.
pub const DEFAULT_SUBJECT: &str = "(no subject)";

/// Correo finalizado. Inmutable desde fuera: sólo expone getters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    id: Uuid,
    from: String,
    to: Vec<String>,
    cc: Vec<String>,
    subject: String,
    body: String,
    headers: IndexMap<String, String>,
}

impl Email {
    /// Identidad propia de cada producto construido.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &[String] {
        &self.to
    }

    pub fn cc(&self) -> &[String] {
        &self.cc
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    /// Todas las direcciones del correo (remitente, destinatarios y copias).
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.from.as_str()).chain(self.to.iter().map(String::as_str))
                                           .chain(self.cc.iter().map(String::as_str))
    }
}

// Igualdad campo a campo, ignorando la identidad.
impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
        && self.to == other.to
        && self.cc == other.cc
        && self.subject == other.subject
        && self.body == other.body
        && self.headers == other.headers
    }
}

impl Product for Email {
    fn variant(&self) -> &str {
        "email"
    }
}

impl Prototype for Email {}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Email(from: {}, to: {}, subject: {})", self.from, self.to.join(", "), self.subject)
    }
}

/// Builder de `Email`.
///
/// Campos obligatorios: `from` y `to`. Valores por defecto: asunto
/// [`DEFAULT_SUBJECT`], cuerpo vacío, sin copias ni cabeceras.
#[derive(Debug, Clone)]
pub struct EmailBuilder {
    from: Field<String>,
    to: Field<Vec<String>>,
    cc: Field<Vec<String>>,
    subject: Field<String>,
    body: Field<String>,
    headers: Field<IndexMap<String, String>>,
}

impl EmailBuilder {
    pub fn new() -> Self {
        Self { from: Field::mandatory("from"),
               to: Field::mandatory("to"),
               cc: Field::optional("cc"),
               subject: Field::with_default("subject", DEFAULT_SUBJECT.to_string()),
               body: Field::optional("body"),
               headers: Field::optional("headers") }
    }

    pub fn from(&mut self, address: impl Into<String>) -> &mut Self {
        self.from.set(address.into());
        self
    }

    /// Reemplaza la lista completa de destinatarios.
    pub fn to<I, S>(&mut self, recipients: I) -> &mut Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.to.set(recipients.into_iter().map(Into::into).collect());
        self
    }

    /// Reemplaza la lista de copias.
    pub fn cc<I, S>(&mut self, recipients: I) -> &mut Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.cc.set(recipients.into_iter().map(Into::into).collect());
        self
    }

    pub fn subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.subject.set(subject.into());
        self
    }

    pub fn body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body.set(body.into());
        self
    }

    /// Fija una cabecera; la última escritura de cada clave gana.
    pub fn header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        if let Some(headers) = self.headers.get_mut() {
            headers.insert(name.into(), value.into());
        }
        self
    }
}

impl Default for EmailBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StepBuilder for EmailBuilder {
    type Output = Email;

    fn assemble(&self) -> Result<Email, KitError> {
        Ok(Email { id: Uuid::new_v4(),
                   from: self.from.resolve()?,
                   to: self.to.resolve()?,
                   cc: self.cc.resolve()?,
                   subject: self.subject.resolve()?,
                   body: self.body.resolve()?,
                   headers: self.headers.resolve()? })
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Builder de `Email` que además valida el formato de las direcciones y
/// exige al menos un destinatario.
///
/// Tiene sus propios setters: encadenarlos siempre termina en el `build`
/// de este tipo, con su validación.
#[derive(Debug, Clone, Default)]
pub struct StrictEmailBuilder {
    fields: EmailBuilder,
}

impl StrictEmailBuilder {
    pub fn new() -> Self {
        Self { fields: EmailBuilder::new() }
    }

    pub fn from(&mut self, address: impl Into<String>) -> &mut Self {
        self.fields.from(address);
        self
    }

    pub fn to<I, S>(&mut self, recipients: I) -> &mut Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.fields.to(recipients);
        self
    }

    pub fn cc<I, S>(&mut self, recipients: I) -> &mut Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.fields.cc(recipients);
        self
    }

    pub fn subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.fields.subject(subject);
        self
    }

    pub fn body(&mut self, body: impl Into<String>) -> &mut Self {
        self.fields.body(body);
        self
    }

    pub fn header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.header(name, value);
        self
    }
}

/// Comprobación mínima `local@dominio.tld`.
pub fn is_valid_address(address: &str) -> bool {
    match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
            && !domain.contains('@')
            && domain.split('.').count() >= 2
            && domain.split('.').all(|label| !label.is_empty())
            && !address.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

impl StepBuilder for StrictEmailBuilder {
    type Output = Email;

    fn assemble(&self) -> Result<Email, KitError> {
        self.fields.assemble()
    }

    fn validate(&self, email: &Email) -> Result<(), KitError> {
        if email.to().is_empty() {
            return Err(KitError::Validation("at least one recipient is required".into()));
        }
        if let Some(bad) = email.addresses().find(|a| !is_valid_address(a)) {
            return Err(KitError::Validation(format!("invalid address: {bad}")));
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.fields.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> EmailBuilder {
        let mut b = EmailBuilder::new();
        b.from("ops@example.com")
         .to(["dev@example.com"])
         .subject("deploy")
         .header("X-Priority", "1");
        b
    }

    #[test]
    fn test_defaults_for_unset_fields() {
        let email = filled().build().unwrap();
        assert_eq!(email.body(), "");
        assert!(email.cc().is_empty());

        let mut b = EmailBuilder::new();
        b.from("a@b.io").to(["c@d.io"]);
        assert_eq!(b.build().unwrap().subject(), DEFAULT_SUBJECT);
    }

    #[test]
    fn test_missing_to_names_field() {
        let mut b = EmailBuilder::new();
        b.from("a@b.io");
        assert_eq!(b.build().unwrap_err(), KitError::MissingField("to".into()));
        b.to(["x@y.io"]);
        assert!(b.build().is_ok());
    }

    #[test]
    fn test_header_last_write_wins() {
        let mut b = filled();
        b.header("X-Priority", "5");
        assert_eq!(b.build().unwrap().headers()["X-Priority"], "5");
    }

    #[test]
    fn test_strict_rejects_bad_address() {
        let mut b = StrictEmailBuilder::new();
        b.from("ops@example.com").to(["not-an-address"]);
        assert_eq!(b.build().unwrap_err(), KitError::Validation("invalid address: not-an-address".into()));
        b.to(Vec::<String>::new());
        assert_eq!(b.build().unwrap_err(), KitError::Validation("at least one recipient is required".into()));
    }

    #[test]
    fn test_strict_chain_ends_in_strict_build() {
        let result = StrictEmailBuilder::new().from("ops@example.com")
                                              .to(["not-an-address"])
                                              .build();
        assert_eq!(result.unwrap_err(), KitError::Validation("invalid address: not-an-address".into()));

        let email = StrictEmailBuilder::new().from("ops@example.com")
                                             .to(["dev@example.com"])
                                             .cc(["qa@example.com"])
                                             .subject("deploy")
                                             .body("done")
                                             .header("X-Priority", "1")
                                             .build()
                                             .unwrap();
        assert_eq!(email.cc(), ["qa@example.com".to_string()]);
        assert_eq!(email.headers()["X-Priority"], "1");
    }

    #[test]
    fn test_address_check() {
        assert!(is_valid_address("a.b@mail.example.org"));
        assert!(!is_valid_address("a@b"));
        assert!(!is_valid_address("@b.io"));
        assert!(!is_valid_address("a@@b.io"));
        assert!(!is_valid_address("a b@c.io"));
    }
}
