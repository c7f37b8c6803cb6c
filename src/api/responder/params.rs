use axum::{extract::Query, http::Uri};
use std::collections::BTreeMap;
use tracing::debug;

use crate::map::Map;

/// Query, variables, operation name and raw flag of one GraphQL request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphQLParams {
    pub query: Option<String>,
    pub variables: Option<BTreeMap<String, Map>>,
    pub operation_name: Option<String>,
    pub raw: Option<bool>,
}

impl GraphQLParams {
    /// Collect parameters from the URL query string, falling back to the
    /// decoded body for anything the URL did not provide.
    ///
    /// Body fields of the wrong type are treated as missing.
    #[must_use]
    pub fn extract(uri: &Uri, content: Option<&Map>) -> Self {
        let mut params = Self::from_query_items(&query_items(uri));

        if let Some(content) = content {
            params.fill_from_content(content);
        }

        params
    }

    fn from_query_items(items: &[(String, String)]) -> Self {
        let mut params = Self::default();

        for (name, value) in items {
            match name.as_str() {
                "query" => params.query = Some(value.clone()).filter(|q| !q.is_empty()),
                "variables" => {
                    // TODO: decode the `variables` parameter as a JSON object
                    debug!("ignoring `variables` URL parameter");
                }
                "operationName" => params.operation_name = Some(value.clone()),
                "raw" => params.raw = value.parse::<bool>().ok(),
                _ => {}
            }
        }

        params
    }

    fn fill_from_content(&mut self, content: &Map) {
        if self.query.is_none() {
            self.query = content.get("query").and_then(Map::as_str).map(str::to_owned);
        }

        if self.variables.is_none() {
            self.variables = content
                .get("variables")
                .and_then(Map::as_dictionary)
                .cloned();
        }

        if self.operation_name.is_none() {
            self.operation_name = content
                .get("operationName")
                .and_then(Map::as_str)
                .map(str::to_owned);
        }

        if self.raw.is_none() {
            self.raw = content.get("raw").and_then(Map::as_bool);
        }
    }
}

fn query_items(uri: &Uri) -> Vec<(String, String)> {
    match Query::<Vec<(String, String)>>::try_from_uri(uri) {
        Ok(Query(items)) => items,
        Err(e) => {
            debug!("unreadable query string: {e}");
            Vec::new()
        }
    }
}
