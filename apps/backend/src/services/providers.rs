//! HTTP translation providers.

use async_trait::async_trait;
use mixlingo_core::{Language, ProviderError, TranslationProvider};
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};

fn network(err: reqwest::Error) -> ProviderError {
    ProviderError::Network(err.to_string())
}

fn success(resp: Response) -> Result<Response, ProviderError> {
    if !resp.status().is_success() {
        return Err(ProviderError::Status(resp.status().as_u16()));
    }
    Ok(resp)
}

fn non_empty(text: String) -> Result<String, ProviderError> {
    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(ProviderError::Empty);
    }
    Ok(text)
}

// === LibreTranslate ===

#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// `POST {url}/translate`
pub struct LibreTranslate {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl LibreTranslate {
    pub fn new(client: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslate {
    fn name(&self) -> &str {
        "libretranslate"
    }

    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, ProviderError> {
        let request = LibreRequest {
            q: text,
            source: source.code(),
            target: target.code(),
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let resp = self
            .client
            .post(format!("{}/translate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(network)?;

        let body: LibreResponse = success(resp)?
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        non_empty(body.translated_text)
    }
}

// === Lingva ===

#[derive(Debug, Deserialize)]
struct LingvaResponse {
    translation: String,
}

/// `GET {url}/api/v1/{source}/{target}/{query}`
pub struct Lingva {
    client: Client,
    base_url: String,
}

impl Lingva {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    fn url(&self, text: &str, source: Language, target: Language) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ProviderError::Network(format!("invalid base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::Network("base url cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(["api", "v1", source.code(), target.code(), text]);
        Ok(url)
    }
}

#[async_trait]
impl TranslationProvider for Lingva {
    fn name(&self) -> &str {
        "lingva"
    }

    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, ProviderError> {
        let url = self.url(text, source, target)?;
        let resp = self.client.get(url).send().await.map_err(network)?;

        let body: LingvaResponse = success(resp)?
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        non_empty(body.translation)
    }
}

// === MyMemory ===

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: MyMemoryData,
    /// Sent as a number or a string depending on the error path.
    #[serde(rename = "responseStatus")]
    response_status: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct MyMemoryData {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl MyMemoryResponse {
    fn into_translation(self) -> Result<String, ProviderError> {
        let status = match &self.response_status {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        };
        match status {
            Some(200) => non_empty(self.response_data.translated_text),
            Some(code) => Err(ProviderError::Status(u16::try_from(code).unwrap_or(u16::MAX))),
            None => Err(ProviderError::Malformed(format!(
                "responseStatus {}",
                self.response_status
            ))),
        }
    }
}

/// `GET {url}/get?q=…&langpair=src|tgt`
pub struct MyMemory {
    client: Client,
    base_url: String,
    email: Option<String>,
}

impl MyMemory {
    pub fn new(client: Client, base_url: &str, email: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            email,
        }
    }
}

#[async_trait]
impl TranslationProvider for MyMemory {
    fn name(&self) -> &str {
        "mymemory"
    }

    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, ProviderError> {
        let langpair = format!("{}|{}", source.code(), target.code());
        let mut query = vec![("q", text), ("langpair", langpair.as_str())];
        if let Some(email) = &self.email {
            query.push(("de", email.as_str()));
        }

        let resp = self
            .client
            .get(format!("{}/get", self.base_url))
            .query(&query)
            .send()
            .await
            .map_err(network)?;

        let body: MyMemoryResponse = success(resp)?
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        body.into_translation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lingva_url_encodes_query() {
        let lingva = Lingva::new(Client::new(), "https://lingva.example/");
        let url = lingva
            .url("good morning/evening", Language::English, Language::Japanese)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://lingva.example/api/v1/en/ja/good%20morning%2Fevening"
        );
    }

    #[test]
    fn test_lingva_rejects_bad_base_url() {
        let lingva = Lingva::new(Client::new(), "not a url");
        assert!(lingva
            .url("cat", Language::English, Language::Spanish)
            .is_err());
    }

    #[test]
    fn test_libre_request_shape() {
        let request = LibreRequest {
            q: "cat",
            source: "en",
            target: "es",
            format: "text",
            api_key: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"q": "cat", "source": "en", "target": "es", "format": "text"})
        );
    }

    #[test]
    fn test_mymemory_status_handling() {
        let ok: MyMemoryResponse = serde_json::from_str(
            r#"{"responseData":{"translatedText":"gato"},"responseStatus":200}"#,
        )
        .unwrap();
        assert_eq!(ok.into_translation().unwrap(), "gato");

        let quota: MyMemoryResponse = serde_json::from_str(
            r#"{"responseData":{"translatedText":"QUOTA EXCEEDED"},"responseStatus":"429"}"#,
        )
        .unwrap();
        assert!(matches!(quota.into_translation(), Err(ProviderError::Status(429))));

        let blank: MyMemoryResponse = serde_json::from_str(
            r#"{"responseData":{"translatedText":"  "},"responseStatus":200}"#,
        )
        .unwrap();
        assert!(matches!(blank.into_translation(), Err(ProviderError::Empty)));
    }
}
