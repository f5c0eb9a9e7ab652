use async_trait::async_trait;
use isg_common::DeviceTable;
use isg_http::{HttpClient, RequestOpts};

use crate::error::ScrapeError;
use crate::Result;

/// Read and write access to one ISG.
///
/// [`IsgClient`] talks HTTP; tests substitute canned pages.
#[async_trait]
pub trait Device: Send + Sync {
    /// Fetch the raw body of the page at `page` (a suffix such as `?s=1,0`).
    async fn fetch(&self, page: &str) -> Result<String>;

    /// Save one parameter and return the device's raw confirmation text.
    async fn submit(&self, key: &str, value: &str) -> Result<String>;
}

/// HTTP-backed [`Device`].
#[derive(Clone, Debug)]
pub struct IsgClient {
    http: HttpClient,
    save_page: String,
}

impl IsgClient {
    pub fn new(http: HttpClient, table: &DeviceTable) -> Self {
        Self {
            http,
            save_page: table.pages.save.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        self.http.base().as_str()
    }
}

#[async_trait]
impl Device for IsgClient {
    async fn fetch(&self, page: &str) -> Result<String> {
        Ok(self.http.get_text(page, RequestOpts::default()).await?)
    }

    async fn submit(&self, key: &str, value: &str) -> Result<String> {
        let payload = save_payload(key, value)?;
        tracing::info!(key, value, "isg.submit");
        let reply = self
            .http
            .post_form(&self.save_page, &[("data", payload.as_str())], RequestOpts::default())
            .await?;
        tracing::debug!(key, reply_len = reply.len(), "isg.submit.reply");
        Ok(reply)
    }
}

/// The `data` field the save endpoint expects for a single parameter.
///
/// The device parses this byte for byte, including the space after the comma.
///
/// ```
/// assert_eq!(
///     isg_scrape::save_payload("val16", "24,0").unwrap(),
///     r#"[{"name":"val16", "value":"24,0"}]"#
/// );
/// ```
pub fn save_payload(key: &str, value: &str) -> Result<String> {
    check_embeddable("name", key)?;
    check_embeddable("value", value)?;
    Ok(format!(r#"[{{"name":"{key}", "value":"{value}"}}]"#))
}

fn check_embeddable(field: &'static str, s: &str) -> Result<()> {
    if s.chars().any(|c| c == '"' || c == '\\' || c.is_control()) {
        return Err(ScrapeError::InvalidPayload {
            field,
            value: s.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_byte_exact() {
        assert_eq!(
            save_payload("val16", "24,0").unwrap(),
            "[{\"name\":\"val16\", \"value\":\"24,0\"}]"
        );
        assert_eq!(
            save_payload("val25", "0.70").unwrap(),
            "[{\"name\":\"val25\", \"value\":\"0.70\"}]"
        );
    }

    #[test]
    fn empty_value_is_passed_through() {
        assert_eq!(
            save_payload("val17", "").unwrap(),
            "[{\"name\":\"val17\", \"value\":\"\"}]"
        );
    }

    #[test]
    fn quotes_and_backslashes_are_rejected() {
        assert!(matches!(
            save_payload("val16", "1\"}]"),
            Err(ScrapeError::InvalidPayload { field: "value", .. })
        ));
        assert!(matches!(
            save_payload("val\\16", "1"),
            Err(ScrapeError::InvalidPayload { field: "name", .. })
        ));
        assert!(save_payload("val16", "1\n2").is_err());
    }
}
