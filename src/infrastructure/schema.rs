/// Migration-relevant shape of one persisted entity
///
/// A descriptor names the table it owns, the DDL that brings that table into
/// existence, and the tables it holds foreign keys to.
///
/// # Invariants
/// - A descriptor must be migrated after every entity it references
/// - DDL statements must be idempotent (`IF NOT EXISTS`)
///
/// # Example
/// ```
/// use storefront_api::infrastructure::schema::SchemaDescriptor;
///
/// const CATEGORY: SchemaDescriptor = SchemaDescriptor::new(
///     "categories",
///     &["CREATE TABLE IF NOT EXISTS categories (id BIGSERIAL PRIMARY KEY)"],
/// );
/// const PRODUCT: SchemaDescriptor = SchemaDescriptor::new(
///     "products",
///     &["CREATE TABLE IF NOT EXISTS products (id BIGSERIAL PRIMARY KEY, \
///        category_id BIGINT REFERENCES categories (id))"],
/// )
/// .referencing(&["categories"]);
///
/// assert_eq!(PRODUCT.references(), &["categories"]);
/// assert!(CATEGORY.references().is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaDescriptor {
    entity: &'static str,
    statements: &'static [&'static str],
    references: &'static [&'static str],
}

impl SchemaDescriptor {
    /// Declares an entity with no foreign references
    pub const fn new(entity: &'static str, statements: &'static [&'static str]) -> Self {
        Self {
            entity,
            statements,
            references: &[],
        }
    }

    /// Declares the entities this one holds references to
    pub const fn referencing(self, references: &'static [&'static str]) -> Self {
        Self { references, ..self }
    }

    /// Table name of the entity
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// DDL statements, executed in order
    pub fn statements(&self) -> &'static [&'static str] {
        self.statements
    }

    /// Entities that must exist before this one is created
    pub fn references(&self) -> &'static [&'static str] {
        self.references
    }
}
