/// A leaf entity that always belongs to exactly one [`super::Category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub notes: Option<String>,
    pub category_id: i64,
}

impl Ingredient {
    pub fn new(id: i64, name: impl Into<String>, category_id: i64) -> Self {
        Self {
            id,
            name: name.into(),
            notes: None,
            category_id,
        }
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    /// Overwrite both editable fields. `None` clears the notes.
    pub fn overwrite(&mut self, name: impl Into<String>, notes: Option<String>) {
        self.name = name.into();
        self.notes = notes;
    }
}
