//! Message template endpoints

use super::models::{ApiResponse, Template, TemplateList, TemplateSuggestion};
use super::{ApiClient, ApiRequest, API_PREFIX};
use crate::error::{DeskError, DeskResult};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

#[derive(Serialize)]
struct TemplateBody<'a> {
    name: &'a str,
    content: &'a str,
    variables: Vec<String>,
}

impl<'a> TemplateBody<'a> {
    fn new(name: &'a str, content: &'a str) -> Self {
        Self {
            name,
            content,
            variables: template_variables(content),
        }
    }
}

/// Client for `/api/v1/templates`
#[derive(Clone)]
pub struct TemplatesApi {
    client: ApiClient,
}

impl TemplatesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn path(suffix: &str) -> String {
        format!("{}/templates{}", API_PREFIX, suffix)
    }

    fn item_path(id: &str, suffix: &str) -> String {
        Self::path(&format!("/{}{}", urlencoding::encode(id), suffix))
    }

    pub async fn list(&self) -> DeskResult<TemplateList> {
        self.client.get_json(&Self::path("/")).await
    }

    pub async fn get(&self, id: &str) -> DeskResult<Template> {
        self.client.get_json(&Self::item_path(id, "")).await
    }

    /// Create a template and return its id
    pub async fn create(&self, name: &str, content: &str) -> DeskResult<String> {
        let response: ApiResponse = self
            .client
            .post_json(&Self::path("/"), &TemplateBody::new(name, content))
            .await?;

        let id = response
            .data_field("template_id")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                DeskError::UnexpectedResponse("template created without an id".to_string())
            })?;

        info!("Created template {} ({})", name, id);
        Ok(id)
    }

    pub async fn update(&self, id: &str, name: &str, content: &str) -> DeskResult<ApiResponse> {
        self.client
            .put_json(&Self::item_path(id, ""), &TemplateBody::new(name, content))
            .await
    }

    pub async fn delete(&self, id: &str) -> DeskResult<ApiResponse> {
        self.client.delete_json(&Self::item_path(id, "")).await
    }

    /// Render a template server-side with sample values
    pub async fn preview(&self, id: &str, sample: &BTreeMap<String, String>) -> DeskResult<String> {
        let response: ApiResponse = self
            .client
            .post_json(&Self::item_path(id, "/preview"), sample)
            .await?;

        response
            .data_field("preview")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| DeskError::UnexpectedResponse("preview missing from response".to_string()))
    }

    /// Ask the backend for template drafts for a kind of business and purpose
    pub async fn generate(
        &self,
        business_type: &str,
        purpose: &str,
    ) -> DeskResult<Vec<TemplateSuggestion>> {
        let request = ApiRequest::post(Self::path("/generate"))
            .query("business_type", business_type)
            .query("purpose", purpose);
        let response: ApiResponse = self.client.send_json(request).await?;

        let suggestions = response.data_field("suggestions").ok_or_else(|| {
            DeskError::UnexpectedResponse("suggestions missing from response".to_string())
        })?;
        Ok(suggestions_from(suggestions))
    }
}

/// Drafts come back keyed by tone (`{"casual": "..."}`) or as a plain list
fn suggestions_from(value: &serde_json::Value) -> Vec<TemplateSuggestion> {
    fn text(value: &serde_json::Value) -> String {
        match value.as_str() {
            Some(s) => s.to_string(),
            None => value.to_string(),
        }
    }

    match value {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(style, content)| TemplateSuggestion {
                style: style.clone(),
                content: text(content),
            })
            .collect(),
        serde_json::Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, content)| TemplateSuggestion {
                style: format!("#{}", i + 1),
                content: text(content),
            })
            .collect(),
        other => vec![TemplateSuggestion {
            style: "suggestion".to_string(),
            content: text(other),
        }],
    }
}

/// Placeholders in a template body.
///
/// A placeholder is a whitespace-delimited word wrapped in braces, e.g.
/// `{name}`. Punctuation glued to the braces (`{name},`) does not count.
/// Bare `{}` is skipped here, although the backend records it as an empty
/// name. Result is sorted and deduplicated.
pub fn template_variables(content: &str) -> Vec<String> {
    content
        .split_whitespace()
        .filter(|word| word.len() > 2 && word.starts_with('{') && word.ends_with('}'))
        .map(|word| word[1..word.len() - 1].to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Substitute `{key}` placeholders locally, the way the backend preview does.
///
/// Keys match exactly: `{Name}` is only replaced by a `Name` value.
pub fn render_template(content: &str, values: &BTreeMap<String, String>) -> String {
    values.iter().fold(content.to_string(), |rendered, (key, value)| {
        rendered.replace(&format!("{{{}}}", key), value)
    })
}
