use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;

use super::{check, decode, BackendClient, BackendError};

/// Builder for a single table request.
///
/// Filters are equality-only and combine with AND, which covers every query
/// the app issues (`user_id = me`, `id = x`).
pub struct TableQuery<'a> {
    backend: &'a BackendClient,
    table: String,
    access_token: String,
    columns: String,
    filters: Vec<(String, String)>,
    order: Option<String>,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(backend: &'a BackendClient, table: &str, access_token: &str) -> Self {
        Self {
            backend,
            table: table.to_string(),
            access_token: access_token.to_string(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
        }
    }

    /// Restrict the returned columns (default `*`)
    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    /// `column = value`
    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters.push((column.to_string(), format!("eq.{}", value)));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order = Some(format!("{}.{}", column, direction));
        self
    }

    fn build(&self, method: Method) -> RequestBuilder {
        let path = format!("/rest/v1/{}", self.table);
        let mut request = self
            .backend
            .request(method, &path, Some(&self.access_token))
            .query(&self.filters);

        if let Some(order) = &self.order {
            request = request.query(&[("order", order)]);
        }
        request
    }

    /// Fetch all matching rows
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, BackendError> {
        tracing::debug!("SELECT {} FROM {}", self.columns, self.table);

        let response = self
            .build(Method::GET)
            .query(&[("select", &self.columns)])
            .send()
            .await?;

        decode(response).await
    }

    /// Fetch exactly one row. No match yields a `PGRST116` error.
    pub async fn single<T: DeserializeOwned>(self) -> Result<T, BackendError> {
        let response = self
            .build(Method::GET)
            .query(&[("select", &self.columns)])
            .header("Accept", "application/vnd.pgrst.object+json")
            .send()
            .await?;

        decode(response).await
    }

    /// Insert one or more rows
    pub async fn insert<B: Serialize + ?Sized>(self, rows: &B) -> Result<(), BackendError> {
        tracing::debug!("INSERT INTO {}", self.table);

        let response = self
            .build(Method::POST)
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    /// Insert or merge on primary key
    pub async fn upsert<B: Serialize + ?Sized>(self, row: &B) -> Result<(), BackendError> {
        tracing::debug!("UPSERT INTO {}", self.table);

        let response = self
            .build(Method::POST)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(row)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    /// Patch every row matching the filters
    pub async fn update<B: Serialize + ?Sized>(self, patch: &B) -> Result<(), BackendError> {
        tracing::debug!("UPDATE {} WHERE {:?}", self.table, self.filters);

        let response = self
            .build(Method::PATCH)
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    /// Delete every row matching the filters
    pub async fn delete(self) -> Result<(), BackendError> {
        tracing::debug!("DELETE FROM {} WHERE {:?}", self.table, self.filters);

        let response = self.build(Method::DELETE).send().await?;

        check(response).await?;
        Ok(())
    }
}
