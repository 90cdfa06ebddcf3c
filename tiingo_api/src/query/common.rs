//! Shared query infrastructure: the [`Query`] trait and [`QueryCommon`] fields.

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// the shared `columns` builder methods.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Requests a single column. Tiingo always adds the date/ticker key itself.
    fn with_column(mut self, column: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().columns.push(column.to_string());
        self
    }

    /// Requests several columns. An empty set means "all columns".
    fn with_columns(mut self, columns: &[String]) -> Self
    where
        Self: Sized,
    {
        self.get_common().columns.extend_from_slice(columns);
        self
    }
}

/// Fields shared by all query types.
#[derive(Clone, Debug, Default)]
pub struct QueryCommon {
    /// Column filter. Sent comma-joined; omitted when empty.
    pub columns: Vec<String>,
}

impl QueryCommon {
    /// Appends `format=json` and the column filter to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut().append_pair("format", "json");
        if !self.columns.is_empty() {
            url.query_pairs_mut()
                .append_pair("columns", &self.columns.join(","));
        }
        url
    }
}
