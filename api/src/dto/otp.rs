use serde::{Deserialize, Serialize};

/// Body of `POST /api/issue-otp`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueOtpRequest {
    /// Address to send the code to; absent is treated like empty
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of `POST /api/verify-otp`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: Option<String>,

    /// Submitted code, compared verbatim
    #[serde(default)]
    pub otp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let issue: IssueOtpRequest = serde_json::from_str("{}").unwrap();
        assert!(issue.email.is_none());

        let verify: VerifyOtpRequest =
            serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(verify.email.as_deref(), Some("a@x.com"));
        assert!(verify.otp.is_none());
    }

    #[test]
    fn test_numeric_otp_is_rejected() {
        // Codes are strings; a JSON number is a wrong-shape body
        let result = serde_json::from_str::<VerifyOtpRequest>(r#"{"email":"a@x.com","otp":123456}"#);
        assert!(result.is_err());
    }
}
