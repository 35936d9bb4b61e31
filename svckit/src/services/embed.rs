// svckit/src/services/embed.rs
//
// Power BI report embed placeholder
// Real integration: GenerateToken against the Power BI REST API using a
// service principal or user token, returning a short-lived embed URL.
//

use tracing::debug;

use super::EmbedResolver;
use crate::errors::FabricError;
use crate::types::EmbedReference;

/// No live embed exists yet; every report resolves to `Unavailable`
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderEmbed;

impl EmbedResolver for PlaceholderEmbed {
    fn resolve(&self, report_id: &str) -> Result<EmbedReference, FabricError> {
        debug!("No embed configured for report {}", report_id);
        Ok(EmbedReference::Unavailable)
    }
}
