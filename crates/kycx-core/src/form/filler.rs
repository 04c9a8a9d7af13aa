//! AcroForm filling using lopdf.

use std::collections::BTreeSet;

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use tracing::{debug, info, trace};

use super::{FieldSink, FieldUpdates, FillReport, Result, SinkValue};
use crate::error::FormError;

/// Field trees deeper than this are treated as malformed.
const MAX_FIELD_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Button,
    Other,
}

impl FieldKind {
    fn from_type(field_type: Option<&[u8]>) -> Self {
        match field_type {
            Some(b"Tx") => FieldKind::Text,
            Some(b"Btn") => FieldKind::Button,
            _ => FieldKind::Other,
        }
    }
}

/// A terminal field of the form with the widgets that display it.
#[derive(Debug, Clone)]
struct FormField {
    id: ObjectId,
    name: String,
    kind: FieldKind,
    widgets: Vec<ObjectId>,
}

/// Fills the interactive form of a PDF template.
pub struct AcroFormFiller {
    document: Document,
    need_appearances: bool,
}

impl AcroFormFiller {
    /// Load a template from bytes.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut document = Document::load_mem(data).map_err(|e| FormError::Template(e.to_string()))?;

        if document.is_encrypted() {
            document
                .decrypt("")
                .map_err(|e| FormError::Template(format!("encrypted template: {}", e)))?;
            debug!("Decrypted template with empty password");
        }

        Ok(Self {
            document,
            need_appearances: true,
        })
    }

    /// Ask viewers to regenerate field appearances after filling.
    pub fn with_need_appearances(mut self, need_appearances: bool) -> Self {
        self.need_appearances = need_appearances;
        self
    }

    fn acroform(&self) -> Result<&Dictionary> {
        let catalog = self
            .document
            .catalog()
            .map_err(|e| FormError::Template(e.to_string()))?;
        let object = catalog.get(b"AcroForm").map_err(|_| FormError::NoAcroForm)?;
        let (_, object) = self
            .document
            .dereference(object)
            .map_err(|_| FormError::NoAcroForm)?;
        object.as_dict().map_err(|_| FormError::NoAcroForm)
    }

    /// Collect every terminal field of the form.
    fn fields(&self) -> Result<Vec<FormField>> {
        let roots = match self.acroform()?.get(b"Fields") {
            Ok(Object::Array(roots)) => roots.clone(),
            Ok(Object::Reference(id)) => self
                .document
                .get_object(*id)
                .and_then(Object::as_array)
                .map(|roots| roots.to_vec())
                .map_err(|_| FormError::NoAcroForm)?,
            _ => return Err(FormError::NoAcroForm),
        };

        let mut fields = Vec::new();
        for root in roots.iter().filter_map(|r| r.as_reference().ok()) {
            self.collect(root, None, None, 0, &mut fields);
        }
        Ok(fields)
    }

    fn collect(
        &self,
        id: ObjectId,
        parent_name: Option<&str>,
        inherited_type: Option<&[u8]>,
        depth: usize,
        out: &mut Vec<FormField>,
    ) {
        if depth > MAX_FIELD_DEPTH {
            debug!("Field tree too deep at {:?}, skipping", id);
            return;
        }
        let Ok(dict) = self.document.get_dictionary(id) else {
            return;
        };

        let partial = dict.get(b"T").ok().and_then(|t| t.as_str().ok()).map(decode_text);
        let name = match (parent_name, partial) {
            (Some(parent), Some(partial)) => Some(format!("{parent}.{partial}")),
            (None, Some(partial)) => Some(partial),
            (parent, None) => parent.map(str::to_string),
        };
        let field_type = dict
            .get(b"FT")
            .ok()
            .and_then(|ft| ft.as_name().ok())
            .or(inherited_type);

        let kids: Vec<ObjectId> = dict
            .get(b"Kids")
            .and_then(Object::as_array)
            .map(|kids| kids.iter().filter_map(|k| k.as_reference().ok()).collect())
            .unwrap_or_default();

        // Kids without a partial name are widgets of this field.
        let (child_fields, widgets): (Vec<ObjectId>, Vec<ObjectId>) = kids.into_iter().partition(|kid| {
            self.document
                .get_dictionary(*kid)
                .map(|d| d.has(b"T"))
                .unwrap_or(false)
        });

        for child in child_fields {
            self.collect(child, name.as_deref(), field_type, depth + 1, out);
        }

        let Some(name) = name else {
            return;
        };
        if !widgets.is_empty() || dict.has(b"Rect") || field_type.is_some() {
            let widgets = if widgets.is_empty() { vec![id] } else { widgets };
            trace!("Form field {:?} ({} widgets)", name, widgets.len());
            out.push(FormField {
                id,
                name,
                kind: FieldKind::from_type(field_type),
                widgets,
            });
        }
    }

    /// The name a checkbox widget uses for its checked state.
    fn on_state(&self, widget: ObjectId) -> Vec<u8> {
        let states = self
            .document
            .get_dictionary(widget)
            .and_then(|d| d.get(b"AP"))
            .and_then(|ap| self.document.dereference(ap))
            .and_then(|(_, ap)| ap.as_dict())
            .and_then(|ap| ap.get(b"N"))
            .and_then(|n| self.document.dereference(n))
            .and_then(|(_, n)| n.as_dict());

        states
            .ok()
            .and_then(|n| n.iter().map(|(key, _)| key).find(|key| key.as_slice() != b"Off").cloned())
            .unwrap_or_else(|| b"Yes".to_vec())
    }

    fn set_text(&mut self, field: &FormField, value: &str) -> Result<()> {
        let dict = self
            .document
            .get_dictionary_mut(field.id)
            .map_err(|e| FormError::Template(e.to_string()))?;
        dict.set("V", encode_text(value));
        Ok(())
    }

    fn set_toggle(&mut self, field: &FormField, checked: bool) -> Result<()> {
        let states: Vec<(ObjectId, Vec<u8>)> = field
            .widgets
            .iter()
            .map(|&widget| {
                let state = if checked { self.on_state(widget) } else { b"Off".to_vec() };
                (widget, state)
            })
            .collect();

        let value = states
            .first()
            .map(|(_, state)| state.clone())
            .unwrap_or_else(|| b"Off".to_vec());

        for (widget, state) in states {
            if let Ok(dict) = self.document.get_dictionary_mut(widget) {
                dict.set("AS", Object::Name(state));
            }
        }

        let dict = self
            .document
            .get_dictionary_mut(field.id)
            .map_err(|e| FormError::Template(e.to_string()))?;
        dict.set("V", Object::Name(value));
        Ok(())
    }

    fn set_need_appearances(&mut self) -> Result<()> {
        let root = self
            .document
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .map_err(|e| FormError::Template(e.to_string()))?;

        let acroform_ref = self
            .document
            .get_dictionary(root)
            .and_then(|catalog| catalog.get(b"AcroForm"))
            .and_then(Object::as_reference);

        let acroform = match acroform_ref {
            Ok(id) => self.document.get_dictionary_mut(id),
            Err(_) => self
                .document
                .get_dictionary_mut(root)
                .and_then(|catalog| catalog.get_mut(b"AcroForm"))
                .and_then(Object::as_dict_mut),
        }
        .map_err(|_| FormError::NoAcroForm)?;

        acroform.set("NeedAppearances", Object::Boolean(true));
        Ok(())
    }
}

impl FieldSink for AcroFormFiller {
    fn field_names(&self) -> Result<Vec<String>> {
        Ok(self.fields()?.into_iter().map(|f| f.name).collect())
    }

    fn fill(&mut self, updates: &FieldUpdates) -> Result<FillReport> {
        let fields = self.fields()?;
        let mut matched = BTreeSet::new();

        for field in &fields {
            let Some(value) = updates.get(&field.name) else {
                continue;
            };
            match (field.kind, value) {
                (FieldKind::Button, value) => self.set_toggle(field, value.is_checked())?,
                (_, SinkValue::Text(text)) => self.set_text(field, text)?,
                (_, toggle) => self.set_text(field, toggle.as_str())?,
            }
            debug!("Filled {:?} = {:?}", field.name, value.as_str());
            matched.insert(field.name.as_str());
        }

        let unmatched: Vec<String> = updates
            .keys()
            .filter(|name| !matched.contains(name.as_str()))
            .cloned()
            .collect();
        let filled = matched.len();

        if self.need_appearances {
            self.set_need_appearances()?;
        }

        let mut bytes = Vec::new();
        self.document
            .save_to(&mut bytes)
            .map_err(|e| FormError::Template(e.to_string()))?;

        info!(
            "Filled {} of {} form fields, {} updates unmatched",
            filled,
            fields.len(),
            unmatched.len()
        );

        Ok(FillReport {
            bytes,
            filled,
            unmatched,
        })
    }
}

/// Decode a PDF text string (UTF-16BE with BOM, or PDFDocEncoding read as Latin-1).
fn decode_text(bytes: &[u8]) -> String {
    match bytes.strip_prefix(&[0xFE, 0xFF]) {
        Some(utf16) => {
            let units: Vec<u16> = utf16
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        None => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn encode_text(value: &str) -> Object {
    if value.is_ascii() {
        return Object::string_literal(value);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}
