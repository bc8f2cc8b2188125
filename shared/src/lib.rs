use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 分析服务的分析接口路径
pub const ANALYZE_PATH: &str = "/analyze";
/// multipart 表单中图片字段的名称
pub const ANALYZE_FIELD: &str = "image";
/// 身份服务要求每个请求都携带的公钥头
pub const HEADER_API_KEY: &str = "apikey";

// =========================================================
// 分析结果 (Analysis Models)
// =========================================================

/// 远程分析服务返回的诊断结果
///
/// 服务对"非番茄叶片"等判定只返回 `disease`，因此其余字段可缺省，
/// 原样透传，不做额外校验。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub disease: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
}

/// 分析服务的错误响应体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

// =========================================================
// 身份模型 (Identity Models)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// 身份服务签发的会话
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// 有效期（秒）
    #[serde(default)]
    pub expires_in: i64,
    /// 过期时间点（Unix 秒）
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_at: Option<DateTime<Utc>>,
    pub refresh_token: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// 当前登录用户的邮箱
    pub fn email(&self) -> Option<&str> {
        self.user.email.as_deref()
    }

    /// 服务端未返回 `expires_at` 时，根据 `expires_in` 补全
    pub fn with_expiry_from(mut self, now: DateTime<Utc>) -> Self {
        if self.expires_at.is_none() && self.expires_in > 0 {
            self.expires_at = Some(now + TimeDelta::seconds(self.expires_in));
        }
        self
    }

    /// 会话是否会在 `margin` 内过期
    ///
    /// 未知过期时间的会话视为永不过期。
    pub fn expires_within(&self, now: DateTime<Utc>, margin: TimeDelta) -> bool {
        match self.expires_at {
            Some(at) => at <= now + margin,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_analysis_result_optional_fields() {
        let full: AnalysisResult = serde_json::from_str(
            r#"{"disease":"Leaf Blight","confidence":0.92,"treatment":"Apply copper fungicide"}"#,
        )
        .unwrap();
        assert_eq!(full.confidence, Some(0.92));
        assert_eq!(full.treatment.as_deref(), Some("Apply copper fungicide"));

        let bare: AnalysisResult = serde_json::from_str(r#"{"disease":"Not a tomato leaf"}"#).unwrap();
        assert_eq!(bare.disease, "Not a tomato leaf");
        assert!(bare.confidence.is_none());
        assert!(bare.treatment.is_none());
    }

    #[test]
    fn test_session_decodes_gotrue_payload() {
        let session: Session = serde_json::from_str(
            r#"{
                "access_token": "jwt",
                "token_type": "bearer",
                "expires_in": 3600,
                "expires_at": 1700003600,
                "refresh_token": "r1",
                "user": { "id": "u-1", "email": "grower@example.com", "role": "authenticated" }
            }"#,
        )
        .unwrap();

        assert_eq!(session.email(), Some("grower@example.com"));
        assert_eq!(session.expires_at, Some(at(1_700_003_600)));
    }

    #[test]
    fn test_session_expiry_window() {
        let session = Session {
            access_token: "jwt".into(),
            token_type: "bearer".into(),
            expires_in: 3600,
            expires_at: None,
            refresh_token: "r1".into(),
            user: User {
                id: "u-1".into(),
                email: None,
            },
        }
        .with_expiry_from(at(1_000));

        assert_eq!(session.expires_at, Some(at(4_600)));
        assert!(!session.expires_within(at(1_000), TimeDelta::seconds(60)));
        assert!(session.expires_within(at(4_550), TimeDelta::seconds(60)));
    }
}
