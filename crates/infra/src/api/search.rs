//! Search API (`api/search`)

use dataverse_core::{Plain, ResponseHandle};
use dataverse_domain::{Result, SearchOptions, SearchResult};
use tracing::instrument;

use super::client::DataverseClient;
use crate::http::{HttpRequest, QueryParams};

const SEARCH_PATH: &str = "api/search";

pub struct SearchApi<'a> {
    client: &'a DataverseClient,
}

impl<'a> SearchApi<'a> {
    pub(crate) fn new(client: &'a DataverseClient) -> Self {
        Self { client }
    }

    /// Run `query` (Solr syntax, `*` for everything).
    ///
    /// # Errors
    /// `DataverseError::Api` or `DataverseError::Transport` on failure.
    #[instrument(skip(self, options))]
    pub fn find(&self, query: &str, options: &SearchOptions) -> Result<ResponseHandle<Plain<SearchResult>>> {
        let request = HttpRequest::get(SEARCH_PATH).params(search_params(query, options));
        self.client.call(request)
    }
}

fn search_params(query: &str, options: &SearchOptions) -> QueryParams {
    let mut params = QueryParams::new();
    params.add("q", query);
    for item_type in &options.types {
        params.add("type", item_type.as_str());
    }
    for fq in &options.filter_queries {
        params.add("fq", fq.clone());
    }
    for subtree in &options.sub_trees {
        params.add("subtree", subtree.clone());
    }
    if let Some(sort) = &options.sort_field {
        params.add("sort", sort.clone());
    }
    if let Some(order) = &options.order {
        params.add("order", order.clone());
    }
    params
        .add("per_page", options.per_page.to_string())
        .add("start", options.start.to_string())
        .add("show_relevance", options.show_relevance.to_string())
        .add("show_facets", options.show_facets.to_string())
        .add("show_entity_ids", options.show_entity_ids.to_string());
    params
}
