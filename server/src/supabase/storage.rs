//! Storage object upload and public URLs.

use reqwest::Method;

use super::{SupabaseClient, SupabaseError, send_empty};

impl SupabaseClient {
    /// Upload (or overwrite) `bucket/path` with the caller's token.
    ///
    /// # Errors
    ///
    /// Returns a [`SupabaseError`] on transport or API failure.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        token: &str,
        content_type: &str,
        bytes: impl Into<reqwest::Body>,
    ) -> Result<(), SupabaseError> {
        let request = self
            .request(Method::POST, &format!("/storage/v1/object/{bucket}/{path}"), Some(token))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes);
        send_empty(request).await
    }

    /// URL of an object in a public bucket.
    #[must_use]
    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.base_url)
    }
}
