//! PostgREST row access. Every call runs as the user behind `token`.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{SupabaseClient, SupabaseError, send_json};

const RETURN_REPRESENTATION: &str = "return=representation";

impl SupabaseClient {
    /// `GET /rest/v1/{table}` with PostgREST query pairs such as
    /// `("order", "created_at.asc")`.
    ///
    /// # Errors
    ///
    /// Returns a [`SupabaseError`] on transport, API or decode failure.
    pub async fn select_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        token: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, SupabaseError> {
        let request = self
            .request(Method::GET, &format!("/rest/v1/{table}"), Some(token))
            .query(query);
        send_json(request).await
    }

    /// Insert one row and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns a [`SupabaseError`] on failure, or [`SupabaseError::Parse`]
    /// when PostgREST returns no representation.
    pub async fn insert_row<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        table: &str,
        token: &str,
        row: &T,
    ) -> Result<R, SupabaseError> {
        let request = self
            .request(Method::POST, &format!("/rest/v1/{table}"), Some(token))
            .header("Prefer", RETURN_REPRESENTATION)
            .json(row);
        first_row(send_json(request).await?)
    }

    /// Insert one row, merging into an existing row with the same primary key.
    ///
    /// # Errors
    ///
    /// Same as [`SupabaseClient::insert_row`].
    pub async fn upsert_row<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        table: &str,
        token: &str,
        row: &T,
    ) -> Result<R, SupabaseError> {
        let request = self
            .request(Method::POST, &format!("/rest/v1/{table}"), Some(token))
            .header("Prefer", format!("{RETURN_REPRESENTATION},resolution=merge-duplicates"))
            .json(row);
        first_row(send_json(request).await?)
    }

    /// `PATCH` the row with primary key `id`. Returns `None` when no visible
    /// row matched.
    ///
    /// # Errors
    ///
    /// Returns a [`SupabaseError`] on transport, API or decode failure.
    pub async fn update_rows<P: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        table: &str,
        token: &str,
        id: &str,
        patch: &P,
    ) -> Result<Option<R>, SupabaseError> {
        let request = self
            .request(Method::PATCH, &format!("/rest/v1/{table}"), Some(token))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(patch);
        let rows: Vec<R> = send_json(request).await?;
        Ok(rows.into_iter().next())
    }

    /// Delete the row with primary key `id`. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns a [`SupabaseError`] on transport or API failure.
    pub async fn delete_row(&self, table: &str, token: &str, id: &str) -> Result<bool, SupabaseError> {
        let request = self
            .request(Method::DELETE, &format!("/rest/v1/{table}"), Some(token))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", RETURN_REPRESENTATION);
        let removed: Vec<serde_json::Value> = send_json(request).await?;
        Ok(!removed.is_empty())
    }
}

fn first_row<R>(rows: Vec<R>) -> Result<R, SupabaseError> {
    rows.into_iter()
        .next()
        .ok_or_else(|| SupabaseError::Parse("write returned no rows".into()))
}
