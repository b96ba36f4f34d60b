// src/services/gemini_client.rs
// DOCUMENTATION: Generative-AI (Gemini) API client
// PURPOSE: Send prompts with a JSON response schema and return the generated text

use crate::errors::TripsError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// Gemini REST client
/// DOCUMENTATION: Handles authentication and generateContent calls
pub struct GeminiClient {
    /// HTTP client for making requests
    client: Client,
    /// API key sent as query parameter
    api_key: String,
    /// Base URL (e.g., https://generativelanguage.googleapis.com/v1beta)
    base_url: String,
    /// Model name (e.g., gemini-2.5-flash)
    model: String,
}

/// Response from generateContent
/// DOCUMENTATION: Only the fields we read are modelled
#[derive(Debug, Deserialize, Serialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GeminiCandidate {
    pub content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GeminiPart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate's first part
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

impl GeminiClient {
    /// Create new client
    /// DOCUMENTATION: Falls back to a default reqwest client if the builder fails
    pub fn new(api_key: String, base_url: String, model: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Request body for a JSON-constrained generation
    pub fn request_body(prompt: &str, response_schema: &Value) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema
            }
        })
    }

    /// Generate JSON text for a prompt
    /// DOCUMENTATION: Returns the raw JSON text produced by the model
    ///
    /// # Arguments
    /// * `prompt` - Natural-language instruction
    /// * `response_schema` - OpenAPI-style schema the output must follow
    pub async fn generate_json(
        &self,
        prompt: &str,
        response_schema: &Value,
    ) -> Result<String, TripsError> {
        log::debug!("Gemini generateContent: model={}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::request_body(prompt, response_schema))
            .send()
            .await
            .map_err(|e| {
                log::error!("Gemini API request failed: {}", e);
                TripsError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Gemini API error {}: {}", status, body);
            return Err(TripsError::ExternalApiError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            log::error!("Failed to parse Gemini response: {}", e);
            TripsError::ExternalApiError(format!("Parse error: {}", e))
        })?;

        api_response
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| TripsError::ExternalApiError("Empty model response".to_string()))
    }
}

/// Prompt for the candidate list
pub fn candidates_prompt(destination: &str, budget: f64) -> String {
    format!(
        "Suggest 8 popular and distinct tourist places to visit in {}.\n\
         The user has a total budget of ${}.\n\
         Return a JSON list.",
        destination, budget
    )
}

/// Response schema for the candidate list
pub fn candidates_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "description": { "type": "STRING" }
            },
            "required": ["name"]
        }
    })
}

/// Prompt for the ordered itinerary
pub fn itinerary_prompt(
    destination: &str,
    days: i32,
    selected_places: &[String],
    notes: &[String],
) -> String {
    format!(
        "Create an optimized travel itinerary for {days} days in {destination}.\n\
         Selected Places to visit: {places}.\n\
         User Notes/Reminders for this trip: {notes}.\n\
         \n\
         1. Route Optimization: treat this as a Traveling Salesperson Problem. Reorder the \
         selected places to minimize total travel distance and group nearby locations together.\n\
         2. Between each place, provide a 'transport' item.\n\
         3. For 'transport' items, provide 3 options: METRO, TAXI and WALK.\n\
         4. Provide realistic costs in USD: lunch around $10-$30, metro tickets ~$2-$10, \
         taxi based on distance ($10-$50).\n\
         5. Append the user notes to the description of the places they fit.\n\
         6. Accommodation: insert an 'accommodation' item at the end of each day or after \
         every 3rd place, with 3 hotel/hostel recommendations (real names if possible, \
         realistic price per night $50-$300 depending on budget, rating 1-5).\n\
         \n\
         Return a flat JSON array of sequence items.",
        days = days,
        destination = destination,
        places = selected_places.join(", "),
        notes = notes.join(", "),
    )
}

/// Response schema for the ordered itinerary
pub fn itinerary_schema() -> Value {
    let modes = json!(["walk", "taxi", "bus", "train", "metro"]);

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "type": { "type": "STRING", "enum": ["place", "transport", "lunch", "accommodation"] },
                "title": { "type": "STRING" },
                "description": { "type": "STRING" },
                "durationMinutes": { "type": "NUMBER" },
                "cost": { "type": "NUMBER" },
                "transportType": { "type": "STRING", "enum": modes },
                "transportOptions": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "type": { "type": "STRING", "enum": modes },
                            "durationMinutes": { "type": "NUMBER" },
                            "cost": { "type": "NUMBER" },
                            "recommended": { "type": "BOOLEAN" }
                        }
                    }
                },
                "accommodationOptions": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": { "type": "STRING" },
                            "pricePerNight": { "type": "NUMBER" },
                            "rating": { "type": "NUMBER" },
                            "address": { "type": "STRING" },
                            "recommended": { "type": "BOOLEAN" }
                        }
                    }
                }
            },
            "required": ["type", "title"]
        }
    })
}
