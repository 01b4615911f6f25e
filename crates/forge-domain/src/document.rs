//! Documentos usados como plantillas de prototipo.
//!
//! Un `Document` contiene estructuras anidadas (secciones con párrafos,
//! metadatos JSON) para que la copia profunda sea observable: modificar una
//! sección de una copia no toca la plantilla. Un documento con un
//! `ResourceHandle` abierto no es copiable y el registro lo rechaza.

use forge_core::hashing;
use forge_core::{KitError, Product, Prototype, PrototypeRegistry};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Recurso externo abierto (fichero, socket...) asociado a un documento.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHandle {
    pub kind: String,
    pub target: String,
}

impl ResourceHandle {
    pub fn describe(&self) -> String {
        format!("{}:{}", self.kind, self.target)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub kind: String,
    pub title: String,
    pub tags: Vec<String>,
    /// Nombre de sección -> párrafos, en orden de inserción.
    pub sections: IndexMap<String, Vec<String>>,
    pub metadata: Value,
    /// No forma parte de la huella de contenido.
    #[serde(skip)]
    pub handle: Option<ResourceHandle>,
}

impl Document {
    pub fn new(kind: impl Into<String>, title: impl Into<String>) -> Self {
        Document { kind: kind.into(),
                   title: title.into(),
                   tags: Vec::new(),
                   sections: IndexMap::new(),
                   metadata: Value::Object(Default::default()),
                   handle: None }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_paragraph(mut self, section: impl Into<String>, text: impl Into<String>) -> Self {
        self.add_paragraph(section, text);
        self
    }

    pub fn add_paragraph(&mut self, section: impl Into<String>, text: impl Into<String>) {
        self.sections.entry(section.into()).or_default().push(text.into());
    }

    /// Fija una clave de metadatos. Si `metadata` no era un objeto se
    /// reemplaza por uno.
    pub fn set_meta(&mut self, key: impl Into<String>, value: Value) {
        if !self.metadata.is_object() {
            self.metadata = Value::Object(Default::default());
        }
        if let Value::Object(map) = &mut self.metadata {
            map.insert(key.into(), value);
        }
    }

    pub fn attach(mut self, handle: ResourceHandle) -> Self {
        self.handle = Some(handle);
        self
    }

    pub fn detach(&mut self) -> Option<ResourceHandle> {
        self.handle.take()
    }

    /// Huella estructural del contenido (ignora el handle).
    pub fn fingerprint(&self) -> Result<String, KitError> {
        hashing::fingerprint(self).map_err(|e| KitError::Validation(format!("document not serializable: {e}")))
    }
}

impl Product for Document {
    fn variant(&self) -> &str {
        &self.kind
    }
}

impl Prototype for Document {
    fn uncloneable_resources(&self) -> Vec<String> {
        self.handle.iter().map(ResourceHandle::describe).collect()
    }
}

/// Registro con las plantillas de documento de uso común.
pub fn standard_templates() -> Result<PrototypeRegistry<Document>, KitError> {
    let registry = PrototypeRegistry::new();
    registry.register("report",
                      Document::new("report", "Monthly report").with_tag("internal")
                                                               .with_paragraph("summary", "TBD")
                                                               .with_paragraph("figures", "TBD"))?;
    registry.register("invoice",
                      Document::new("invoice", "Invoice").with_tag("billing")
                                                         .with_paragraph("lines", "")
                                                         .with_paragraph("totals", "0.00"))?;
    Ok(registry)
}
