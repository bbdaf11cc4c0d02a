use serde::{Deserialize, Serialize};
use title_lab::{AnalysisReport, TitleError, TitleRequest, TitleScore};

#[derive(Debug, Deserialize)]
pub struct ApiAnalyzeRequest {
    pub competitor_title: Option<String>,
    pub keyword: Option<String>,
    pub count: Option<usize>,
    pub seed: Option<u64>,
    pub request_id: Option<String>,
}

impl ApiAnalyzeRequest {
    pub fn into_request(self) -> Result<(TitleRequest, Option<u64>), TitleError> {
        let competitor_title = self.competitor_title.unwrap_or_default().trim().to_string();
        let keyword = self.keyword.unwrap_or_default().trim().to_string();

        let mut request = TitleRequest::new(competitor_title, keyword);
        if let Some(count) = self.count {
            request = request.with_count(count);
        }
        request.validate()?;
        Ok((request, self.seed))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiAnalyzeResponse {
    pub request_id: String,
    #[serde(flatten)]
    pub report: AnalysisReport,
}

#[derive(Debug, Deserialize)]
pub struct ApiScoreRequest {
    pub title: Option<String>,
}

impl ApiScoreRequest {
    pub fn into_title(self) -> Result<String, TitleError> {
        let title = self.title.unwrap_or_default().trim().to_string();
        if title.is_empty() {
            return Err(TitleError::Input("title is required".to_string()));
        }
        Ok(title)
    }
}

#[derive(Debug, Serialize)]
pub struct ApiScoreResponse {
    #[serde(flatten)]
    pub score: TitleScore,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub kind: &'static str,
    pub error: String,
}

impl From<&TitleError> for ApiError {
    fn from(err: &TitleError) -> Self {
        Self {
            kind: err.kind(),
            error: err.to_string(),
        }
    }
}
