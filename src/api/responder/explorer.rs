//! GraphiQL page pre-populated with the request being explored.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::map::Map;

const GRAPHIQL_VERSION: &str = "1.4.7";
const REACT_VERSION: &str = "17";

/// Values shown in the explorer when the page loads
#[derive(Debug, Default)]
pub struct ExplorerPage<'a> {
    pub query: Option<&'a str>,
    pub variables: Option<&'a BTreeMap<String, Map>>,
    pub operation_name: Option<&'a str>,
    pub result: Option<&'a Map>,
}

/// JSON-encode `value` for embedding inside a `<script>` element.
fn script_literal<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

fn pretty<T: Serialize + ?Sized>(value: &T) -> Option<String> {
    serde_json::to_string_pretty(value).ok()
}

impl ExplorerPage<'_> {
    #[must_use]
    pub fn render(&self) -> String {
        let query = script_literal(&self.query);
        let variables = script_literal(&self.variables.and_then(pretty));
        let operation_name = script_literal(&self.operation_name);
        let result = script_literal(&self.result.and_then(pretty));

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <title>GraphiQL</title>
  <meta name="robots" content="noindex" />
  <style>
    html, body, #graphiql {{ height: 100%; margin: 0; overflow: hidden; width: 100%; }}
  </style>
  <link href="https://unpkg.com/graphiql@{GRAPHIQL_VERSION}/graphiql.min.css" rel="stylesheet" />
  <script src="https://unpkg.com/react@{REACT_VERSION}/umd/react.production.min.js"></script>
  <script src="https://unpkg.com/react-dom@{REACT_VERSION}/umd/react-dom.production.min.js"></script>
  <script src="https://unpkg.com/graphiql@{GRAPHIQL_VERSION}/graphiql.min.js"></script>
</head>
<body>
  <div id="graphiql">Loading...</div>
  <script>
    var parameters = {{}};
    location.search.substr(1).split('&').forEach(function (entry) {{
      var eq = entry.indexOf('=');
      if (eq >= 0) {{
        parameters[decodeURIComponent(entry.slice(0, eq))] =
          decodeURIComponent(entry.slice(eq + 1).replace(/\+/g, ' '));
      }}
    }});

    function locationQuery(params) {{
      return '?' + Object.keys(params).filter(function (key) {{
        return params[key] != null;
      }}).map(function (key) {{
        return encodeURIComponent(key) + '=' + encodeURIComponent(params[key]);
      }}).join('&');
    }}

    function updateURL() {{
      history.replaceState(null, null, locationQuery(parameters));
    }}

    function graphQLFetcher(graphQLParams) {{
      var body = Object.assign({{ raw: true }}, graphQLParams);
      return fetch(location.pathname, {{
        method: 'post',
        headers: {{
          'Accept': 'application/json',
          'Content-Type': 'application/json'
        }},
        body: JSON.stringify(body),
        credentials: 'include',
      }}).then(function (response) {{
        return response.text();
      }}).then(function (text) {{
        try {{
          return JSON.parse(text);
        }} catch (error) {{
          return text;
        }}
      }});
    }}

    ReactDOM.render(
      React.createElement(GraphiQL, {{
        fetcher: graphQLFetcher,
        onEditQuery: function (query) {{ parameters.query = query; updateURL(); }},
        onEditVariables: function (variables) {{ parameters.variables = variables; updateURL(); }},
        onEditOperationName: function (name) {{ parameters.operationName = name; updateURL(); }},
        query: {query},
        response: {result},
        variables: {variables},
        operationName: {operation_name},
      }}),
      document.getElementById('graphiql')
    );
  </script>
</body>
</html>
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_embeds_request_and_result() {
        let mut variables = BTreeMap::new();
        variables.insert("a".to_string(), Map::Int(1));
        let result = Map::from(json!({"data": {"add": 3}}));

        let html = ExplorerPage {
            query: Some("query Add($a: Int!) { add(a: $a, b: 2) }"),
            variables: Some(&variables),
            operation_name: Some("Add"),
            result: Some(&result),
        }
        .render();

        assert!(html.contains(r#"query: "query Add($a: Int!) { add(a: $a, b: 2) }""#));
        assert!(html.contains(r#"operationName: "Add""#));
        assert!(html.contains(r#"\"add\": 3"#));
        assert!(html.contains(r#"\"a\": 1"#));
    }

    #[test]
    fn test_empty_page_has_null_fields() {
        let html = ExplorerPage::default().render();
        assert!(html.contains("query: null"));
        assert!(html.contains("response: null"));
        assert!(html.contains("variables: null"));
        assert!(html.contains("operationName: null"));
    }

    #[test]
    fn test_script_breakout_is_escaped() {
        let html = ExplorerPage {
            query: Some("</script><script>alert(1)</script>"),
            ..ExplorerPage::default()
        }
        .render();
        assert!(!html.contains("</script><script>alert(1)"));
        assert!(html.contains(r"\u003c/script\u003e\u003cscript\u003ealert(1)"));
    }
}
