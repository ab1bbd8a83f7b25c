//! OpenAI chat-completions pairing provider
//!
//! Sends the dish and the catalog snapshot in one prompt and asks for a JSON
//! object back. Drinks are listed with their catalog ids and the model must
//! answer with those ids, so the mapping never depends on list position.

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, time::Duration};

use crate::{
    error::{AppError, AppResult},
    models::{
        CatalogSnapshot, Dish, DishAnalysis, DrinkSummary, GenerativePairingResponse, Pairing,
        PairingResult, MAX_KEY_CHARACTERISTICS, MIN_KEY_CHARACTERISTICS,
    },
    services::{
        engine::assembler::DEFAULT_KEY_CHARACTERISTICS,
        providers::{PairingProvider, MAX_PAIRINGS},
    },
};

const DEFAULT_EXPLANATION: &str = "A great British pairing for your dish!";
const DEFAULT_MATCH_SCORE: i64 = 80;
const MAX_COMPLETION_TOKENS: u32 = 1024;

const SYSTEM_PROMPT: &str = "You are an expert sommelier and food pairing specialist focusing on British drinks - both alcoholic and non-alcoholic.
Your task is to analyse a dish and recommend the best British drink pairings from a provided database.

GUIDELINES:
- Base your pairing on flavour contrast/complement rules
- Consider the dish's key flavours, textures, and cooking methods
- Match intensity of flavours between food and drink
- Be fun, friendly, and engaging in your explanations
- Keep explanations concise but informative (2-3 sentences)
- Use British English spelling
- ALWAYS include at least one non-alcoholic option (tea, soft drink) in your recommendations
- Drinks with 0% ABV are non-alcoholic";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, api_url: String, model: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    fn build_user_prompt(dish: &Dish, snapshot: &CatalogSnapshot) -> String {
        let catalog: String = snapshot
            .drinks()
            .iter()
            .map(|d| {
                format!(
                    "\n[id {}] {} ({})\n   - Flavour: {}\n   - Region: {}\n   - ABV: {}\n   - Recommended foods: {}\n",
                    d.id, d.name, d.drink_type, d.flavour_notes, d.region, d.abv, d.recommended_foods
                )
            })
            .collect();

        format!(
            r#"Dish to analyse: "{dish}"

Available British drinks database:
{catalog}
Please provide:
1. A flavour profile analysis of the dish (2-3 sentences describing key flavours and characteristics)
2. 3-5 key characteristics as single words or short phrases
3. Select 2-3 BEST matching drinks from the database above. At least ONE must be non-alcoholic (0% ABV).
4. For each selected drink, a fun, engaging explanation (2-3 sentences) of why it pairs well
5. A match score from 1-100 for each pairing

Respond in this exact JSON format:
{{
  "dishAnalysis": {{
    "flavourProfile": "Description of the dish's flavour profile",
    "keyCharacteristics": ["characteristic1", "characteristic2", "characteristic3"]
  }},
  "selectedDrinkIds": [12, 3, 17],
  "pairingExplanations": {{
    "12": {{ "explanation": "Why this drink pairs well...", "matchScore": 95 }},
    "3": {{ "explanation": "Why this drink pairs well...", "matchScore": 88 }}
  }}
}}

Use the exact [id N] values shown in the database. Return valid JSON only."#,
            dish = dish.as_str().trim(),
            catalog = catalog,
        )
    }

    /// Sends the chat request and returns the raw assistant content
    async fn complete(&self, dish: &Dish, snapshot: &CatalogSnapshot) -> AppResult<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: Self::build_user_prompt(dish, snapshot),
                },
            ],
            max_tokens: MAX_COMPLETION_TOKENS,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OpenAI API returned status {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AppError::ExternalApi("No response from generative model".to_string()))
    }
}

/// Parses the model's JSON content into a pairing result
pub(crate) fn parse_content(
    dish: &Dish,
    snapshot: &CatalogSnapshot,
    content: &str,
) -> AppResult<PairingResult> {
    let parsed: GenerativePairingResponse = serde_json::from_str(content).map_err(|e| {
        AppError::ExternalApi(format!("Failed to parse generative response: {}", e))
    })?;
    map_response(dish, snapshot, parsed)
}

/// Resolves drink ids against the snapshot and normalises the model's answer.
///
/// Unknown and repeated ids are dropped. The result is rejected when nothing
/// usable is left or when it misses a category the catalog could have offered.
pub(crate) fn map_response(
    dish: &Dish,
    snapshot: &CatalogSnapshot,
    response: GenerativePairingResponse,
) -> AppResult<PairingResult> {
    let mut seen = HashSet::new();
    let mut pairings: Vec<Pairing> = Vec::new();

    for id in &response.selected_drink_ids {
        if !seen.insert(*id) {
            continue;
        }
        let Some(drink) = snapshot.get(*id) else {
            tracing::debug!(drink_id = *id, "Dropping unknown drink id from generative response");
            continue;
        };

        let info = response.pairing_explanations.get(&id.to_string());
        let explanation = info
            .and_then(|i| i.explanation.as_deref())
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_EXPLANATION)
            .to_string();
        let match_score = info
            .and_then(|i| i.match_score)
            .unwrap_or(DEFAULT_MATCH_SCORE)
            .clamp(1, 100) as u8;

        pairings.push(Pairing {
            drink: DrinkSummary::from(drink),
            explanation,
            match_score,
        });
    }

    pairings.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    pairings.truncate(MAX_PAIRINGS);

    if pairings.is_empty() {
        return Err(AppError::ExternalApi(
            "Generative response selected no known drinks".to_string(),
        ));
    }

    let result = PairingResult {
        dish: dish.as_str().to_string(),
        dish_analysis: normalise_analysis(response.dish_analysis)?,
        pairings,
    };

    if snapshot.has_both_categories() && !result.is_category_balanced() {
        return Err(AppError::ExternalApi(
            "Generative response is missing an alcoholic or non-alcoholic pick".to_string(),
        ));
    }

    Ok(result)
}

/// Keeps 3 to 5 non-blank characteristics, padding with generic ones
fn normalise_analysis(analysis: DishAnalysis) -> AppResult<DishAnalysis> {
    let flavour_profile = analysis.flavour_profile.trim().to_string();
    if flavour_profile.is_empty() {
        return Err(AppError::ExternalApi(
            "Generative response has an empty flavour profile".to_string(),
        ));
    }

    let mut key_characteristics: Vec<String> = analysis
        .key_characteristics
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .take(MAX_KEY_CHARACTERISTICS)
        .collect();

    for generic in DEFAULT_KEY_CHARACTERISTICS {
        if key_characteristics.len() >= MIN_KEY_CHARACTERISTICS {
            break;
        }
        if !key_characteristics.iter().any(|c| c.eq_ignore_ascii_case(generic)) {
            key_characteristics.push(generic.to_string());
        }
    }

    Ok(DishAnalysis {
        flavour_profile,
        key_characteristics,
    })
}

#[async_trait::async_trait]
impl PairingProvider for OpenAiProvider {
    async fn recommend(&self, dish: &Dish, snapshot: &CatalogSnapshot) -> AppResult<PairingResult> {
        let content = self.complete(dish, snapshot).await?;
        tracing::debug!(response = %content, "Raw generative response");

        let result = parse_content(dish, snapshot, &content)?;

        tracing::info!(
            dish = %dish,
            pairings = result.pairings.len(),
            provider = "openai",
            "Generative pairing completed"
        );

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
