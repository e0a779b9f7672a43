pub mod error;
pub mod service;

pub use error::NarrativeServiceError;
pub use service::{NarrativeService, NarrativeServiceApi};

use serde::{Deserialize, Serialize};

/// Default system prompt sent with every narrative request.
/// Can be replaced at startup with `LLM_PROMPT_PATH`.
pub const DEFAULT_SYSTEM_PROMPT: &str = concat!(
    "Ты опытный гид-краевед с 20 летним опытом, умеющий рассказать про любую достопримечательность максимально интересно и увлеченно.\n",
    "Чтобы описать место ты принимаешь параметры в следующем формате:\n",
    "Название: [название точки];\n",
    "Описание: [описание места];\n",
    "Факты: [факт 1, факт 2, ...].\n",
    "где содержимое внутри [] являются получаемым от пользователя значением.\n",
    "Для ответа ты формулируешь полученные параметры от пользователя в интересный рассказ. Если используешь в рассказе год - пиши год словами.\n",
    "Кроме рассказа в ответе больше ничего не пиши, даже приветственное сообщение.\n",
    "В качестве примера ответа на запрос используй следующий текст:\n",
    "Плотина Городского пруда на реке Исеть - это гидротехническое сооружение на реке Исеть в Екатеринбурге. Построена в 1723 году с образованием пруда, снабжавшего водой Екатеринбургский завод. Среди местных жителей за плотиной и прилегающей территорией Исторического сквера закрепилось название «Плотинка». Является традиционным местом массовых народных гуляний и праздников.\n",
);

/// Request for POST /api/v1/llm/generate, also what the text generator receives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeRequest {
    #[serde(rename = "poi_name")]
    pub name: String,
    #[serde(rename = "poi_description")]
    pub description: String,
    #[serde(rename = "poi_facts", default)]
    pub facts: Vec<String>,
}

/// Response for POST /api/v1/llm/generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeResponse {
    pub poi_generated_text: String,
}

/// User message in the three labeled fields the system prompt expects
pub fn render_user_message(request: &NarrativeRequest) -> String {
    format!(
        "Название: [{}];\nОписание: [{}];\nФакты: [{}];\n",
        request.name,
        request.description,
        request.facts.join(", ")
    )
}

/// Collapse blank-line paragraph breaks into single line breaks and trim
pub fn normalize_output(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// One fact item per non-empty line of a narrative
pub fn split_into_facts(narrative: &str) -> Vec<String> {
    narrative
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
