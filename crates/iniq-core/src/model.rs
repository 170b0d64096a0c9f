/// A bracketed section header in the settings file.
///
/// One record is created per setting line, not per distinct name, so
/// several records may carry the same name. `get_categories()` relies on
/// this duplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Dense, increasing in encounter order.
    pub id: usize,
    pub name: String,
}

/// A single key/value line belonging to the most recently seen category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    /// Dense, increasing in encounter order.
    pub id: usize,
    pub key: String,
    pub value: String,
    /// Owned exclusively; never shared between settings even when
    /// category names collide.
    pub category: Category,
}
