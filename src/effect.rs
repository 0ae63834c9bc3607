//! Effects - side effects declared by the reducer

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Run the catalog listing plus detail enrichment pipeline
    LoadCatalog { api_base: String, limit: usize },
}
