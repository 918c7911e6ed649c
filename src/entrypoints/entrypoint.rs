//! A named mount point.

/// Key plus the data selected by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entrypoint<T> {
    name: String,
    user_data: T,
}

impl<T> Entrypoint<T> {
    pub(crate) fn new(name: String, user_data: T) -> Self {
        Self { name, user_data }
    }

    /// The lookup key, e.g. `billing` for `/billing/invoices`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user_data(&self) -> &T {
        &self.user_data
    }

    pub fn user_data_mut(&mut self) -> &mut T {
        &mut self.user_data
    }

    pub fn into_user_data(self) -> T {
        self.user_data
    }
}
