use ustr::Ustr;

/// Ids of the checked rows, in the order they were checked.
///
/// Every change yields a new value; nothing ever mutates a selection that
/// someone else may still be reading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<Ustr>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adding an id that is already selected returns an equal selection.
    #[must_use]
    pub fn with(&self, id: Ustr) -> Self {
        if self.contains(id) {
            return self.clone();
        }
        let mut ids = self.ids.clone();
        ids.push(id);
        Self { ids }
    }

    /// Removing an absent id returns an equal selection.
    #[must_use]
    pub fn without(&self, id: Ustr) -> Self {
        Self {
            ids: self.ids.iter().copied().filter(|x| *x != id).collect(),
        }
    }

    #[must_use]
    pub fn toggled(&self, id: Ustr, checked: bool) -> Self {
        if checked {
            self.with(id)
        } else {
            self.without(id)
        }
    }

    pub fn contains(&self, id: Ustr) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[Ustr] {
        &self.ids
    }
}
