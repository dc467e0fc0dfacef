use crate::client::NymeriaClient;
use crate::errors::{NymeriaError, Result};
use crate::models::{Company, Envelope};
use crate::query::{clamp_limit, with_query, Query};
use serde::{Deserialize, Serialize};

/// Filters for a company search. At least one of name, location, country,
/// industry or size is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub name: String,
    pub location: String,
    pub country: String,
    pub industry: String,
    /// Employee-count bucket, e.g. "11-50".
    pub size: String,
    pub limit: i64,
    pub offset: i64,
}

impl SearchParams {
    pub fn is_invalid(&self) -> bool {
        self.name.is_empty()
            && self.location.is_empty()
            && self.country.is_empty()
            && self.industry.is_empty()
            && self.size.is_empty()
    }

    pub fn to_query(&self) -> String {
        let mut query = Query::new();
        query
            .push("limit", &clamp_limit(self.limit).to_string())
            .push("offset", &self.offset.to_string())
            .push_opt("name", &self.name)
            .push_opt("size", &self.size)
            .push_opt("location", &self.location)
            .push_opt("country", &self.country)
            .push_opt("industry", &self.industry);
        query.finish()
    }
}

/// Identifiers for a company enrichment: website, profile URL, name or
/// LinkedIn id (at least one).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichParams {
    pub website: String,
    pub profile: String,
    pub name: String,
    /// Numeric LinkedIn company id; `None` or zero means absent.
    pub linkedin_id: Option<u64>,
}

impl EnrichParams {
    fn linkedin_id(&self) -> Option<u64> {
        self.linkedin_id.filter(|id| *id > 0)
    }

    pub fn is_invalid(&self) -> bool {
        self.website.is_empty()
            && self.profile.is_empty()
            && self.name.is_empty()
            && self.linkedin_id().is_none()
    }

    pub fn to_query(&self) -> String {
        let mut query = Query::new();
        query
            .push_opt("website", &self.website)
            .push_opt("name", &self.name)
            .push_opt("profile", &self.profile);
        if let Some(id) = self.linkedin_id() {
            query.push("linkedin_id", &id.to_string());
        }
        query.finish()
    }
}

/// Company endpoints, obtained from [`NymeriaClient::company`].
pub struct CompanyApi<'a> {
    client: &'a NymeriaClient,
}

impl<'a> CompanyApi<'a> {
    pub(crate) fn new(client: &'a NymeriaClient) -> Self {
        Self { client }
    }

    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Company>> {
        if params.is_invalid() {
            return Err(NymeriaError::InvalidParameters);
        }

        let path = with_query("/company/search", &params.to_query());
        let response: Envelope<Vec<Company>> = self.client.get(&path).await?;
        tracing::debug!("Company search returned {} records", response.data.len());
        Ok(response.data)
    }

    pub async fn enrich(&self, params: &EnrichParams) -> Result<Company> {
        if params.is_invalid() {
            return Err(NymeriaError::InvalidParameters);
        }

        let path = with_query("/company/enrich", &params.to_query());
        let response: Envelope<Company> = self.client.get(&path).await?;
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_requires_a_filter() {
        assert!(SearchParams::default().is_invalid());
        assert!(!SearchParams {
            size: "11-50".to_string(),
            ..Default::default()
        }
        .is_invalid());
    }

    #[test]
    fn test_search_query() {
        let params = SearchParams {
            name: "Acme".to_string(),
            country: "united states".to_string(),
            limit: -5,
            ..Default::default()
        };
        assert_eq!(
            params.to_query(),
            "limit=10&offset=0&name=Acme&country=united+states"
        );
    }

    #[test]
    fn test_enrich_zero_linkedin_id_is_absent() {
        let params = EnrichParams {
            linkedin_id: Some(0),
            ..Default::default()
        };
        assert!(params.is_invalid());
        assert_eq!(params.to_query(), "");

        let params = EnrichParams {
            linkedin_id: Some(1441),
            ..Default::default()
        };
        assert!(!params.is_invalid());
        assert_eq!(params.to_query(), "linkedin_id=1441");
    }

    #[test]
    fn test_enrich_query_escapes_website() {
        let params = EnrichParams {
            website: "https://acme.com".to_string(),
            ..Default::default()
        };
        assert_eq!(params.to_query(), "website=https%3A%2F%2Facme.com");
    }
}
