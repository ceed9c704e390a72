use crate::{
    domain::{Blueprint, BlueprintId, FieldDefinition, FieldId, FieldKind},
    error::BlueprintError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftField {
    pub id: FieldId,
    pub kind: FieldKind,
    pub label: String,
    pub required: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BlueprintBuilder {
    name: String,
    fields: Vec<DraftField>,
}

impl BlueprintBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn fields(&self) -> &[DraftField] {
        &self.fields
    }

    pub fn add_field(&mut self, kind: FieldKind) -> FieldId {
        let id = FieldId::generate();
        self.fields.push(DraftField {
            id: id.clone(),
            kind,
            label: String::new(),
            required: false,
        });
        id
    }

    pub fn with_field(mut self, kind: FieldKind, label: impl Into<String>) -> Self {
        let id = self.add_field(kind);
        if let Some(field) = self.fields.iter_mut().find(|f| f.id == id) {
            field.label = label.into();
        }
        self
    }

    pub fn set_label(
        &mut self,
        id: &FieldId,
        label: impl Into<String>,
    ) -> Result<(), BlueprintError> {
        self.field_mut(id)?.label = label.into();
        Ok(())
    }

    pub fn set_required(&mut self, id: &FieldId, required: bool) -> Result<(), BlueprintError> {
        self.field_mut(id)?.required = required;
        Ok(())
    }

    pub fn remove_field(&mut self, id: &FieldId) -> Result<(), BlueprintError> {
        let before = self.fields.len();
        self.fields.retain(|field| &field.id != id);
        if self.fields.len() == before {
            return Err(BlueprintError::UnknownField(id.clone()));
        }
        Ok(())
    }

    /// Swaps the field at `index` with its neighbour. Moving past either end
    /// leaves the order untouched.
    pub fn move_field(&mut self, index: usize, direction: MoveDirection) {
        match direction {
            MoveDirection::Up if index > 0 && index < self.fields.len() => {
                self.fields.swap(index, index - 1);
            }
            MoveDirection::Down if index + 1 < self.fields.len() => {
                self.fields.swap(index, index + 1);
            }
            _ => {}
        }
    }

    pub fn build(&self) -> Result<Blueprint, BlueprintError> {
        if self.name.trim().is_empty() {
            return Err(BlueprintError::EmptyName);
        }
        if self.fields.is_empty() {
            return Err(BlueprintError::NoFields);
        }

        let fields = self
            .fields
            .iter()
            .zip(1u32..)
            .map(|(draft, position)| FieldDefinition {
                id: draft.id.clone(),
                kind: draft.kind,
                label: draft.label.clone(),
                position,
                required: draft.required.then_some(true),
            })
            .collect();

        Ok(Blueprint {
            id: BlueprintId::generate(),
            name: self.name.clone(),
            fields,
        })
    }

    fn field_mut(&mut self, id: &FieldId) -> Result<&mut DraftField, BlueprintError> {
        self.fields
            .iter_mut()
            .find(|field| &field.id == id)
            .ok_or_else(|| BlueprintError::UnknownField(id.clone()))
    }
}

#[cfg(test)]
#[path = "tests/builder_tests.rs"]
mod tests;
