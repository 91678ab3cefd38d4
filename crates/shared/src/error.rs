use serde::{Deserialize, Serialize};

/// Error envelope the generation backend returns alongside non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub detail: String,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_backend_detail_envelope() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"detail": "OPENAI_API_KEY is not set"}"#).expect("parse");
        assert_eq!(body.detail, "OPENAI_API_KEY is not set");
    }
}
